//! htmx response helpers for the console.
//!
//! Console controls post to the dispatcher or a form endpoint with
//! `hx-swap="none"`; the reply is a batch of fragments whose roots carry an
//! `id` and `hx-swap-oob="true"`. Alerts travel in `HX-Trigger`.

use askama::Template;
use axum::{
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use steppe_market_core::Notice;

/// `HX-Trigger` response header.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Fragments plus an optional notice.
#[derive(Debug, Default)]
pub struct HtmxResponse {
    body: String,
    notice: Option<Notice>,
}

impl HtmxResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A reply that only raises a blocking alert.
    #[must_use]
    pub fn alert(message: impl Into<String>) -> Self {
        Self::new().notice(Notice::alert(message))
    }

    /// Render a fragment template and append it.
    ///
    /// # Errors
    ///
    /// Returns the template's render error.
    pub fn fragment(mut self, template: &impl Template) -> Result<Self, askama::Error> {
        template.render_into(&mut self.body)?;
        self.body.push('\n');
        Ok(self)
    }

    #[must_use]
    pub fn notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for HtmxResponse {
    fn into_response(self) -> Response {
        let mut response = Html(self.body).into_response();
        if let Some(notice) = self.notice {
            match HeaderValue::from_str(&notice.trigger_header()) {
                Ok(value) => {
                    response.headers_mut().insert(HX_TRIGGER, value);
                }
                Err(e) => tracing::warn!(error = %e, "Notice could not be encoded as a header"),
            }
        }
        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_sets_trigger_header() {
        let response = HtmxResponse::alert("Failed to save category").into_response();
        let trigger = response.headers()[HX_TRIGGER].to_str().unwrap();
        assert!(trigger.contains("\"alert\""));
        assert!(trigger.contains("Failed to save category"));
    }

    #[test]
    fn test_plain_fragments_have_no_trigger() {
        let response = HtmxResponse::new().into_response();
        assert!(response.headers().get(HX_TRIGGER).is_none());
    }
}
