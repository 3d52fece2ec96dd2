use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::pool::StorageError;
use crate::database::repository::UserRepository;

use super::{password, AuthError, TokenService};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Exchanges phone number + password for a signed bearer token.
pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Unknown phone numbers and wrong passwords take the same exit so the
    /// endpoint cannot be used to enumerate registered users.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<LoginSession, LoginError> {
        let Some(user) = self.users.find_by_phone(phone_number).await? else {
            // Same-cost rejection: response timing must not separate unknown
            // numbers from wrong passwords.
            let _ = password::verify_password(password, miss_digest());
            tracing::warn!("Login attempt for unknown phone number");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginSession {
            user_id: user.id,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}

/// Digest verified when the phone number is unknown, so both reject paths pay
/// for a full bcrypt comparison. Built once; the plaintext is irrelevant and
/// the result is always discarded.
fn miss_digest() -> &'static str {
    static DIGEST: OnceLock<String> = OnceLock::new();
    DIGEST
        .get_or_init(|| password::hash_password("placeholder").unwrap_or_default())
        .as_str()
}
