//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with in-memory store)
//!
//! The login gate is an extractor ([`RequireAdminAuth`]) rather than a layer,
//! so the login page, static assets and health checks stay reachable.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    AdminAuthRejection, LOGIN_PATH, RequireAdminAuth, clear_admin_authenticated,
    is_authenticated, set_admin_authenticated,
};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
