// Handlers reachable without a token: liveness checks and token acquisition.
pub mod auth;
pub mod health;
