//! HS256 bearer tokens.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default token lifetime in seconds (7 days).
pub const DEFAULT_TOKEN_TTL: u64 = 604_800;

/// Identity carried by a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: i32,
    pub is_staff: bool,
    pub exp: u64,
}

/// A freshly issued token with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: u64,
}

/// Errors returned by [`TokenKeys::issue`] and [`TokenKeys::validate`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user id as a decimal string |
/// | `staff` | custom | staff flag |
/// | `exp` | `exp` | seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub staff: bool,
    pub exp: u64,
}

struct KeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

/// Signing and verification keys derived from the shared secret.
///
/// Cheap to clone; stored in the service state and pulled out by the
/// [`Identity`](crate::identity::Identity) extractor via `FromRef`.
#[derive(Clone)]
pub struct TokenKeys(Arc<KeysInner>);

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl_secs", &self.0.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self(Arc::new(KeysInner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }))
    }

    pub fn ttl_secs(&self) -> u64 {
        self.0.ttl_secs
    }

    /// Issue a token for the given user, expiring after the configured TTL.
    pub fn issue(&self, user_id: i32, is_staff: bool) -> Result<IssuedToken, AuthError> {
        self.issue_with_exp(user_id, is_staff, now_secs() + self.0.ttl_secs)
    }

    /// Issue a token with an explicit expiry timestamp.
    pub fn issue_with_exp(
        &self,
        user_id: i32,
        is_staff: bool,
        exp: u64,
    ) -> Result<IssuedToken, AuthError> {
        let claims = JwtClaims {
            sub: user_id.to_string(),
            staff: is_staff,
            exp,
        };
        let token =
            encode(&Header::default(), &claims, &self.0.encoding).map_err(AuthError::Signing)?;
        Ok(IssuedToken { token, exp })
    }

    /// Validate a bearer token: HS256, `exp` checked (default 60s leeway),
    /// `exp` + `sub` required.
    pub fn validate(&self, token: &str) -> Result<TokenInfo, AuthError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<JwtClaims>(token, &self.0.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::Malformed)?;
        Ok(TokenInfo {
            user_id,
            is_staff: data.claims.staff,
            exp: data.claims.exp,
        })
    }
}
