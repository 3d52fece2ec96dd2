pub mod form;
pub mod user;

pub use form::{compute_score, KpaForm, NewKpaForm};
pub use user::User;
