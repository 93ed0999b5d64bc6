//! User-facing notices.
//!
//! A notice is either a blocking alert (errors, checkout confirmation) or a
//! transient toast that dismisses itself. Front-ends deliver them to the page
//! as an `HX-Trigger` event named [`NOTICE_EVENT`].

use serde::Serialize;

/// Client-side event name carried in `HX-Trigger`.
pub const NOTICE_EVENT: &str = "notice";

/// How long a toast stays on screen.
pub const TOAST_DISMISS_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Alert,
    Toast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_ms: Option<u64>,
}

impl Notice {
    /// A blocking alert.
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Alert,
            message: message.into(),
            dismiss_ms: None,
        }
    }

    /// A toast that auto-dismisses after [`TOAST_DISMISS_MS`].
    pub fn toast(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Toast,
            message: message.into(),
            dismiss_ms: Some(TOAST_DISMISS_MS),
        }
    }

    /// `HX-Trigger` header value: `{"notice": {...}}`.
    ///
    /// Header values must be visible ASCII, so anything outside that range is
    /// written as a JSON `\uXXXX` escape.
    #[must_use]
    pub fn trigger_header(&self) -> String {
        let payload = serde_json::json!({ NOTICE_EVENT: self });
        escape_non_ascii(&payload.to_string())
    }
}

fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() && !ch.is_ascii_control() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_carries_dismiss_delay() {
        let header = Notice::toast("Added to cart").trigger_header();
        let value: serde_json::Value = serde_json::from_str(&header).unwrap();
        assert_eq!(value["notice"]["kind"], "toast");
        assert_eq!(value["notice"]["message"], "Added to cart");
        assert_eq!(value["notice"]["dismissMs"], 2000);
    }

    #[test]
    fn test_alert_has_no_dismiss_delay() {
        let header = Notice::alert("Your cart is empty").trigger_header();
        let value: serde_json::Value = serde_json::from_str(&header).unwrap();
        assert_eq!(value["notice"]["kind"], "alert");
        assert!(value["notice"].get("dismissMs").is_none());
    }

    #[test]
    fn test_header_is_ascii_and_round_trips() {
        let message = "Order placed!\n\nTotal: 1\u{a0}000\u{a0}₸";
        let header = Notice::alert(message).trigger_header();

        assert!(header.bytes().all(|b| (0x20..0x7f).contains(&b)));
        let value: serde_json::Value = serde_json::from_str(&header).unwrap();
        assert_eq!(value["notice"]["message"], message);
    }
}
