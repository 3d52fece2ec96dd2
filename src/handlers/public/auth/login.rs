use axum::extract::State;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/v1/auth/login - exchange phone number + password for a bearer
/// token. Unknown users and wrong passwords are the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let service = AuthService::new(UserRepository::new(state.pool.clone()), state.tokens.clone());
    let session = service.login(&body.phone_number, &body.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token: session.token,
        user_id: session.user_id,
        expires_at: session.expires_at,
    }))
}
