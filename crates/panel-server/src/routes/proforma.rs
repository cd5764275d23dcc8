//! Pro-forma upload route.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::routing::post;
use axum::{Json, Router};
use panel_core::Error;
use panel_ingest::{extract_pro_forma, ExtractedFieldSet, RawDocument};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "proForma";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/extract-pro-forma-data", post(extract_pro_forma_data))
}

/// POST /api/extract-pro-forma-data — extract candidate fields from a PDF
/// or DOCX pro-forma.
async fn extract_pro_forma_data(
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<ExtractedFieldSet>> {
    let mut multipart = multipart?;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        debug!(
            "Received {} ({}, {} bytes)",
            filename,
            content_type,
            bytes.len()
        );
        upload = Some(RawDocument::new(bytes.to_vec(), content_type));
        break;
    }

    let Some(doc) = upload else {
        return Err(Error::InvalidRequest("No file uploaded".into()).into());
    };

    // Decoding is CPU-bound; keep it off the async workers.
    let extraction = tokio::task::spawn_blocking(move || extract_pro_forma(&doc))
        .await
        .map_err(|e| Error::Internal(format!("extraction task failed: {}", e)))?
        .map_err(ApiError)?;

    info!(
        "Pro-forma processed, {} field(s) missing",
        extraction.fields.missing().len()
    );
    Ok(Json(extraction.fields))
}
