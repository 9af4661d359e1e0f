use anyhow::Context as _;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use foodgram_auth_types::token::{IssuedToken, TokenKeys};
use foodgram_domain::user::normalize_email;

use crate::domain::repository::UserRepository;
use crate::error::FoodgramError;

/// Hash a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, FoodgramError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenKeys,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<IssuedToken, FoodgramError> {
        let email = normalize_email(&input.email).ok_or(FoodgramError::InvalidCredentials)?;
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(FoodgramError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(FoodgramError::InvalidCredentials);
        }
        let issued = self
            .tokens
            .issue(user.id, user.is_staff)
            .context("issue auth token")?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(issued)
    }
}
