use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::database::models::KpaForm;
use crate::database::repository::FormRepository;
use crate::error::ApiError;
use crate::filter::{FormFilter, Page};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FormListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<KpaForm>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /api/v1/kpa/forms - filtered, paginated listing, newest first.
/// The echoed page/limit are the applied values, after any capping.
pub async fn form_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<FormListResponse>, ApiError> {
    let page = Page::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(state.config.api.default_page_size),
        state.config.api.max_page_size,
    )?;
    let filter = FormFilter::from_query(query.employee_id, query.department);

    let repository = FormRepository::new(state.pool.clone());
    let (forms, total_count) = repository.list(&filter, &page).await?;

    Ok(Json(FormListResponse {
        success: true,
        message: "KPA forms retrieved successfully".to_string(),
        data: forms,
        total_count,
        page: page.number(),
        limit: page.size(),
    }))
}
