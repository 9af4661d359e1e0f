use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;
use foodgram_core::extract::{JsonBody, PathParam, QueryParams};
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{Profile, User};
use crate::error::FoodgramError;
use crate::handlers::pagination::PageResponse;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetPasswordInput,
    SetPasswordUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl From<Profile> for UserResponse {
    fn from(profile: Profile) -> Self {
        Self {
            email: profile.user.email,
            id: profile.user.id,
            username: profile.user.username,
            first_name: profile.user.first_name,
            last_name: profile.user.last_name,
            is_subscribed: profile.is_subscribed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredUserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ── POST /api/users/ ─────────────────────────────────────────────────────────

pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), FoodgramError> {
    let uc = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users/ ──────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<Identity>,
    State(state): State<AppState>,
    uri: Uri,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<PageResponse<UserResponse>>, FoodgramError> {
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = uc
        .execute(
            identity.map(|i| i.user_id),
            PageRequest::new(query.page, query.limit),
        )
        .await?;
    Ok(Json(PageResponse::from_page(page, &uri, UserResponse::from)))
}

// ── GET /api/users/{id}/ ─────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<Identity>,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let profile = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(profile.into()))
}

// ── GET /api/users/me/ ───────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    let profile = uc
        .execute(Some(identity.user_id), identity.user_id)
        .await?;
    Ok(Json(profile.into()))
}

// ── POST /api/users/set_password/ ────────────────────────────────────────────

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SetPasswordRequest>,
) -> Result<StatusCode, FoodgramError> {
    let uc = SetPasswordUseCase {
        users: state.user_repo(),
    };
    uc.execute(
        identity.user_id,
        SetPasswordInput {
            current_password: body.current_password,
            new_password: body.new_password,
        },
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
