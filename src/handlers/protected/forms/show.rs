use axum::extract::{Path, State};
use axum::response::Json;
use uuid::Uuid;

use crate::database::repository::FormRepository;
use crate::error::ApiError;
use crate::AppState;

use super::FormResponse;

/// GET /api/v1/kpa/forms/:id - show a single form by id
pub async fn form_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResponse>, ApiError> {
    let form_id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::bad_request("Invalid form id: expected a UUID"))?;

    let repository = FormRepository::new(state.pool.clone());
    let form = repository.get_by_id(form_id).await?;

    Ok(Json(FormResponse {
        success: true,
        message: "KPA form retrieved successfully".to_string(),
        form_id: form.id,
        data: form,
    }))
}
