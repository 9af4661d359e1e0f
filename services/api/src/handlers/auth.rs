use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;
use foodgram_core::extract::JsonBody;

use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

// ── POST /api/auth/token/login/ ──────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, FoodgramError> {
    let uc = LoginUseCase {
        users: state.user_repo(),
        tokens: state.tokens.clone(),
    };
    let issued = uc
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        auth_token: issued.token,
    }))
}

// ── POST /api/auth/token/logout/ ─────────────────────────────────────────────

/// Tokens are stateless; logging out only requires a valid token and the
/// client discards it.
pub async fn logout(identity: Identity) -> StatusCode {
    tracing::info!(user_id = identity.user_id, "user logged out");
    StatusCode::NO_CONTENT
}
