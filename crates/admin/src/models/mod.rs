//! Domain models for admin.

pub mod session;

pub use session::AUTHENTICATED;
pub use session::keys as session_keys;
