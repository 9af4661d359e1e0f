//! Mock auth helpers for integration tests.
//!
//! Handlers authenticate callers from `Authorization: Bearer <jwt>`. In tests,
//! `MockAuth` signs a token with [`TEST_JWT_SECRET`] so no login round-trip is
//! needed. Build the service state with [`test_keys`] so the signatures match.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use foodgram_auth_types::token::TokenKeys;

/// Secret shared by `MockAuth` and [`test_keys`].
pub const TEST_JWT_SECRET: &str = "foodgram-test-secret";

/// Token keys matching the tokens minted by [`MockAuth`].
pub fn test_keys() -> TokenKeys {
    TokenKeys::new(TEST_JWT_SECRET, 3600)
}

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: i32,
    pub is_staff: bool,
}

impl MockAuth {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: false,
        }
    }

    pub fn staff(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: true,
        }
    }

    /// Signed bearer token for this identity.
    pub fn token(&self) -> String {
        test_keys()
            .issue(self.user_id, self.is_staff)
            .map(|issued| issued.token)
            .unwrap_or_else(|e| panic!("failed to sign test token: {e}"))
    }

    /// `Authorization` header value, e.g. `Bearer eyJ...`.
    pub fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .unwrap_or_else(|e| panic!("invalid header value: {e}"))
    }

    /// Return headers as if the client had logged in.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.header_value());
        map
    }
}
