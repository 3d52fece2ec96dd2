use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;

use crate::database::models::NewKpaForm;
use crate::database::repository::FormRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

use super::FormResponse;

/// POST /api/v1/kpa/forms - create a form. The score is derived server-side;
/// a payload that fails validation never reaches the INSERT.
pub async fn form_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(input): Json<NewKpaForm>,
) -> Result<(StatusCode, Json<FormResponse>), ApiError> {
    let repository = FormRepository::new(state.pool.clone());
    let form = repository.create(&input, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(FormResponse {
            success: true,
            message: "KPA form created successfully".to_string(),
            form_id: form.id,
            data: form,
        }),
    ))
}
