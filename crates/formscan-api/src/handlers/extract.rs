use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use formscan_core::models::OcrResult;
use formscan_extract::{export, ExportFormat, ExtractionMapper};

use super::templates::parse_template_id;
use crate::dto::ExtractQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Apply a stored template to an OCR result
pub async fn extract_fields(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
    Query(query): Query<ExtractQuery>,
    Json(ocr): Json<OcrResult>,
) -> Result<Response, ApiError> {
    let id = parse_template_id(&template_id)?;
    let template = state.store.get(id).await?;

    tracing::info!(
        template = %id,
        pages = ocr.pages.len(),
        page = ?query.page,
        format = %query.format,
        "Extracting fields"
    );

    let mapper = ExtractionMapper::new(state.mapper_options.with_page(query.page));
    let result = tokio::task::spawn_blocking(move || mapper.map_parallel(&template, &ocr))
        .await
        .map_err(|e| ApiError::internal("Extraction task failed").with_details(e.to_string()))??;

    if result.has_warnings() {
        tracing::debug!(warnings = result.warnings.len(), "Extraction finished with warnings");
    }

    match query.format {
        ExportFormat::Json => Ok(Json(result).into_response()),
        format => {
            let body = export(&result, format)?;
            Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
        }
    }
}
