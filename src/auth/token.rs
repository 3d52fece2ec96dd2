use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token together with its expiry, so callers can report
/// the expiry without re-decoding the token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 bearer tokens.
///
/// The signing secret is injected at construction and lives only inside the
/// derived keys; nothing else in the process reads it afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign a token for the given user, expiring `ttl` from now.
    pub fn issue(&self, user_id: Uuid) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Decode and validate a bearer token, returning the subject user id.
    ///
    /// The failure taxonomy is deliberately distinguishable here even though
    /// the HTTP layer flattens it: expiry, signature mismatch, and structural
    /// garbage are different conditions for logs and tests.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(data) => Ok(data.claims.sub),
            Err(err) => Err(match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                _ => AuthError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 24)
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let tokens = service();
        let user_id = Uuid::new_v4();

        let issued = tokens.issue(user_id).unwrap();
        assert_eq!(tokens.verify(&issued.token).unwrap(), user_id);
    }

    #[test]
    fn test_issued_expiry_matches_ttl() {
        let issued = service().issue(Uuid::new_v4()).unwrap();
        let remaining = issued.expires_at - Utc::now();
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }

    #[test]
    fn test_expired_token_is_detected() {
        let tokens = service();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert_eq!(tokens.verify(&stale), Err(AuthError::Expired));
    }

    #[test]
    fn test_foreign_secret_is_signature_invalid() {
        let tokens = service();
        let foreign = TokenService::new("some-other-secret", 24)
            .issue(Uuid::new_v4())
            .unwrap();

        assert_eq!(tokens.verify(&foreign.token), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify("not-a-token"), Err(AuthError::Malformed));
        assert_eq!(tokens.verify(""), Err(AuthError::Malformed));
        assert_eq!(tokens.verify("a.b"), Err(AuthError::Malformed));
    }
}
