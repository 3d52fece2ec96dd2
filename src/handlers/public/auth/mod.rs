// Token acquisition endpoints.
pub mod login;

pub use login::login_post;
