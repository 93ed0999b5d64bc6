//! Authentication gate for the admin console.
//!
//! The gate is a session flag, not a credential: a successful password check
//! stores `adminAuth = "true"` and logout removes it. Nothing re-validates the
//! flag against the API afterwards.

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AUTHENTICATED, session_keys};

/// Login page path.
pub const LOGIN_PATH: &str = "/login";

/// `HX-Request` request header, set by htmx on every request it makes.
const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

/// `HX-Redirect` response header.
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

/// Extractor that requires the login flag.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_: RequireAdminAuth) -> impl IntoResponse {
///     "admin only"
/// }
/// ```
pub struct RequireAdminAuth;

/// Error returned when the login flag is missing.
#[derive(Debug, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// Redirect to login page (full page loads).
    RedirectToLogin,
    /// Ask htmx to navigate to the login page (fragment requests).
    HtmxRedirect,
    /// No session layer in front of the handler.
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::HtmxRedirect => (
                StatusCode::OK,
                [(HX_REDIRECT, HeaderValue::from_static(LOGIN_PATH))],
            )
                .into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        if is_authenticated(session).await {
            return Ok(Self);
        }

        if parts.headers.contains_key(HX_REQUEST) {
            Err(AdminAuthRejection::HtmxRedirect)
        } else {
            Err(AdminAuthRejection::RedirectToLogin)
        }
    }
}

/// Whether the session carries the login flag.
///
/// An unreadable session counts as logged out.
pub async fn is_authenticated(session: &Session) -> bool {
    session
        .get::<String>(session_keys::ADMIN_AUTH)
        .await
        .ok()
        .flatten()
        .is_some_and(|flag| flag == AUTHENTICATED)
}

/// Set the login flag.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_authenticated(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::ADMIN_AUTH, AUTHENTICATED)
        .await
}

/// Clear the login flag (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin_authenticated(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::ADMIN_AUTH)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, body::Body, extract::Request, routing::get};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|_: RequireAdminAuth| async { "panel" }))
            .layer(SessionManagerLayer::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn test_page_load_redirects_to_login() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()["location"], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_htmx_request_gets_hx_redirect() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[HX_REDIRECT], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_missing_session_layer_is_unauthorized() {
        let app = Router::new().route("/", get(|_: RequireAdminAuth| async { "panel" }));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_flag_round_trip() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert!(!is_authenticated(&session).await);

        set_admin_authenticated(&session).await.unwrap();
        assert!(is_authenticated(&session).await);
        assert_eq!(
            session
                .get::<String>(session_keys::ADMIN_AUTH)
                .await
                .unwrap()
                .as_deref(),
            Some("true")
        );

        clear_admin_authenticated(&session).await.unwrap();
        assert!(!is_authenticated(&session).await);
    }

    #[tokio::test]
    async fn test_other_flag_values_are_logged_out() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session
            .insert(session_keys::ADMIN_AUTH, "yes")
            .await
            .unwrap();
        assert!(!is_authenticated(&session).await);
    }
}
