use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri},
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;
use foodgram_core::extract::{PathParam, QueryParams};
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::Subscription;
use crate::error::FoodgramError;
use crate::handlers::pagination::PageResponse;
use crate::handlers::recipe::RecipeShortResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::subscription::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};

/// Author profile followed by a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub author: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            author: sub.author.into(),
            recipes: sub
                .recipes
                .into_iter()
                .map(RecipeShortResponse::from)
                .collect(),
            recipes_count: sub.recipes_count,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct SubscriptionListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u32>,
}

// ── POST /api/users/{id}/subscribe/ ──────────────────────────────────────────

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(author_id): PathParam<i32>,
    QueryParams(query): QueryParams<RecipesLimitQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), FoodgramError> {
    let uc = SubscribeUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
        subscriptions: state.subscription_repo(),
    };
    let sub = uc
        .execute(identity.user_id, author_id, query.recipes_limit)
        .await?;
    Ok((StatusCode::CREATED, Json(sub.into())))
}

// ── DELETE /api/users/{id}/subscribe/ ────────────────────────────────────────

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(author_id): PathParam<i32>,
) -> Result<StatusCode, FoodgramError> {
    let uc = UnsubscribeUseCase {
        users: state.user_repo(),
        subscriptions: state.subscription_repo(),
    };
    uc.execute(identity.user_id, author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/users/subscriptions/ ────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    uri: Uri,
    QueryParams(query): QueryParams<SubscriptionListQuery>,
) -> Result<Json<PageResponse<SubscriptionResponse>>, FoodgramError> {
    let uc = ListSubscriptionsUseCase {
        recipes: state.recipe_repo(),
        subscriptions: state.subscription_repo(),
    };
    let page = uc
        .execute(
            identity.user_id,
            PageRequest::new(query.page, query.limit),
            query.recipes_limit,
        )
        .await?;
    Ok(Json(PageResponse::from_page(
        page,
        &uri,
        SubscriptionResponse::from,
    )))
}
