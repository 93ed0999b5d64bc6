//! Login and logout.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{
    LOGIN_PATH, clear_admin_authenticated, is_authenticated, set_admin_authenticated,
};
use crate::state::AppState;
use crate::views::LoginTemplate;

/// Shown when the API rejects the password without a message.
pub const INVALID_PASSWORD: &str = "Invalid password";

/// Shown when the login call itself fails.
pub const LOGIN_FAILED: &str = "Login failed";

/// Login form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    password: String,
}

/// Render the login page, or go straight to the panel when already logged in.
///
/// GET /login
pub async fn login_page(session: Session) -> Response {
    if is_authenticated(&session).await {
        return Redirect::to("/").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Check the password against the API.
///
/// POST /login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password);

    let error = match state.api().login(&password).await {
        Ok(reply) if reply.success => {
            session.cycle_id().await?;
            set_admin_authenticated(&session).await?;
            tracing::info!("Admin logged in");
            return Ok(Redirect::to("/").into_response());
        }
        Ok(reply) => {
            tracing::info!("Admin password rejected");
            reply
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| INVALID_PASSWORD.to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin login call failed");
            LOGIN_FAILED.to_string()
        }
    };

    Ok((StatusCode::UNAUTHORIZED, LoginTemplate { error: Some(error) }).into_response())
}

/// Clear the flag and return to the login page.
///
/// POST /logout
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_admin_authenticated(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    Redirect::to(LOGIN_PATH)
}
