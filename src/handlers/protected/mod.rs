// Handlers behind the bearer-token gate. Every request arriving here carries
// the AuthUser extension inserted by the middleware.
pub mod forms;
