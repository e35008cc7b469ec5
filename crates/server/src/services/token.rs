//! Session token service.
//!
//! Issues and verifies the signed, time-bound token carried in the `token`
//! cookie. Verification is a pure function of the token and the signing
//! secret; it performs no I/O. The service is constructed once from
//! configuration and injected via application state - the secret is never a
//! mutable global.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ratestore_core::{Role, UserId};

/// Errors from token issuance or verification.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token's expiry has passed.
    #[error("token expired")]
    Expired,
    /// Bad signature or malformed token.
    #[error("invalid token")]
    Invalid,
    /// Signing failed (unexpected).
    #[error("token signing failed")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated account.
    pub sub: UserId,
    /// The account's role at issue time.
    pub role: Role,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Issues and verifies HMAC-SHA256 session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: an expired token is expired.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a signed token for an account.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, user_id: UserId, role: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an expired token and
    /// `TokenError::Invalid` for a bad signature or malformed token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(ttl: Duration) -> TokenService {
        TokenService::new(&SecretString::from("test-secret"), ttl)
    }

    #[test]
    fn issue_verify_round_trip() {
        let tokens = service(Duration::days(7));

        for role in Role::ALL {
            let user_id = UserId::generate();
            let token = tokens.issue(user_id, role).unwrap();
            let claims = tokens.verify(&token).unwrap();

            assert_eq!(claims.sub, user_id);
            assert_eq!(claims.role, role);
            assert!(claims.exp > claims.iat);
        }
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tokens = service(Duration::days(7));
        let token = tokens.issue(UserId::generate(), Role::NormalUser).unwrap();

        // Alter the last character of the signature.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(tokens.verify(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let tokens = service(Duration::days(7));
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(tokens.verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative lifetime: the token is born expired.
        let tokens = service(Duration::seconds(-60));
        let token = tokens.issue(UserId::generate(), Role::NormalUser).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = service(Duration::days(7));
        let verifier = TokenService::new(&SecretString::from("other-secret"), Duration::days(7));

        let token = issuer.issue(UserId::generate(), Role::SystemAdmin).unwrap();
        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }
}
