use thiserror::Error;

/// Why a credential was rejected.
///
/// The distinction only exists server-side (logs, tests). The HTTP layer
/// collapses every variant to a uniform 401 so callers cannot tell which
/// check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing header, wrong scheme, empty or structurally invalid token.
    #[error("credentials are missing or malformed")]
    Malformed,

    /// Token was once valid but its expiry has passed.
    #[error("token has expired")]
    Expired,

    /// Token body does not match its signature (tampered or foreign secret).
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// Unknown user or wrong password at login.
    #[error("invalid phone number or password")]
    InvalidCredentials,
}
