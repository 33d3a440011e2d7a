use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use formscan_core::models::{NewTemplate, Template, TemplateId, TemplateUpdate};

use crate::error::ApiError;
use crate::state::AppState;

pub(crate) fn parse_template_id(raw: &str) -> Result<TemplateId, ApiError> {
    raw.parse()
        .map_err(|e: formscan_core::FormscanError| {
            ApiError::bad_request("Invalid template ID format").with_details(e.to_string())
        })
}

pub async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewTemplate>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    tracing::info!(name = %request.name, fields = request.fields.len(), "Creating template");

    let template = state.store.create(request).await?;

    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let mut templates = state.store.list().await?;
    templates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));

    tracing::debug!(count = templates.len(), "Listing templates");
    Ok(Json(templates))
}

pub async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let id = parse_template_id(&template_id)?;
    Ok(Json(state.store.get(id).await?))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
    Json(update): Json<TemplateUpdate>,
) -> Result<Json<Template>, ApiError> {
    let id = parse_template_id(&template_id)?;
    if update.is_empty() {
        return Err(ApiError::bad_request("Update must change at least one attribute"));
    }

    tracing::info!(id = %id, "Updating template");
    Ok(Json(state.store.update(id, update).await?))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(template_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_template_id(&template_id)?;

    tracing::info!(id = %id, "Deleting template");
    state.store.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
