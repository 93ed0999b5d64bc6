//! Image upload forwarding.
//!
//! The product form's file input posts the whole form as multipart; only the
//! `file` part is forwarded. A returned `url` fills the image path field and
//! its preview.

use axum::extract::{Multipart, State};
use tracing::instrument;

use crate::api::Upload;
use crate::error::{AppError, Result};
use crate::htmx::HtmxResponse;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;
use crate::views::ImageFieldTemplate;

/// Alert prefix for a rejected upload.
pub const UPLOAD_FAILED: &str = "Image upload failed";

/// Fallback detail when the API gives no error text.
const UNKNOWN_ERROR: &str = "Unknown error";

/// POST /upload
#[instrument(skip_all)]
pub async fn upload(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<HtmxResponse> {
    let Some(upload) = read_file_part(&mut multipart).await? else {
        // Selection cleared: nothing to send
        return Ok(HtmxResponse::new());
    };

    match state.api().upload(upload).await {
        Ok(reply) => match reply.url {
            Some(url) => {
                tracing::info!(%url, "Image uploaded");
                Ok(HtmxResponse::new().fragment(&ImageFieldTemplate { image_path: url })?)
            }
            None => {
                let detail = reply.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                tracing::warn!(%detail, "Image upload rejected");
                Ok(HtmxResponse::alert(format!("{UPLOAD_FAILED}: {detail}")))
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Image upload failed");
            Ok(HtmxResponse::alert(UPLOAD_FAILED))
        }
    }
}

/// The `file` part, or `None` when no file was picked.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<Upload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if filename.is_empty() && bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Upload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}
