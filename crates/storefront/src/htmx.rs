//! Out-of-band htmx responses.
//!
//! Every storefront interaction posts to one dispatcher and gets back a batch
//! of fragments. Each fragment's root element carries an `id` and
//! `hx-swap-oob="true"`, so htmx swaps them into place by ID regardless of
//! which control fired the request. Notices ride along in `HX-Trigger`.

use askama::Template;
use axum::{
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use steppe_market_core::Notice;

/// `HX-Trigger` response header.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// A batch of out-of-band fragments plus an optional notice.
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

    /// Render a fragment template and append it to the batch.
    ///
    /// # Errors
    ///
    /// Returns the template's render error.
    pub fn fragment(mut self, template: &impl Template) -> Result<Self, askama::Error> {
        template.render_into(&mut self.body)?;
        self.body.push('\n');
        Ok(self)
    }

    /// Attach a notice. A later notice replaces an earlier one.
    #[must_use]
    pub fn notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    /// The rendered fragments.
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

    #[derive(Template)]
    #[template(source = r#"<span id="probe" hx-swap-oob="true">{{ n }}</span>"#, ext = "html")]
    struct Probe {
        n: u32,
    }

    #[test]
    fn test_fragments_concatenate() {
        let response = HtmxResponse::new()
            .fragment(&Probe { n: 1 })
            .unwrap()
            .fragment(&Probe { n: 2 })
            .unwrap();
        assert_eq!(response.body().matches("id=\"probe\"").count(), 2);
    }

    #[test]
    fn test_notice_becomes_trigger_header() {
        let response = HtmxResponse::new()
            .notice(Notice::toast("Added to cart"))
            .into_response();
        let trigger = response.headers()[HX_TRIGGER].to_str().unwrap();
        assert!(trigger.contains("\"notice\""));
        assert!(trigger.contains("Added to cart"));
    }

    #[test]
    fn test_no_notice_no_header() {
        let response = HtmxResponse::new().into_response();
        assert!(response.headers().get(HX_TRIGGER).is_none());
    }
}
