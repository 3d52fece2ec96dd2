pub mod errors;
pub mod password;
pub mod service;
pub mod token;

pub use errors::AuthError;
pub use service::{AuthService, LoginError, LoginSession};
pub use token::{Claims, IssuedToken, TokenService};
