// KPA form endpoints: create, filtered/paginated list, show.
pub mod create;
pub mod list;
pub mod show;

pub use create::form_create;
pub use list::form_list;
pub use show::form_show;

use serde::Serialize;
use uuid::Uuid;

use crate::database::models::KpaForm;

/// Envelope for single-form responses.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub success: bool,
    pub message: String,
    pub form_id: Uuid,
    pub data: KpaForm,
}
