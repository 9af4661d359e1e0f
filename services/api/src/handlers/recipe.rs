use axum::{
    Json,
    extract::State,
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::Identity;
use foodgram_core::extract::{JsonBody, PathParam, QueryParams};
use foodgram_domain::pagination::PageRequest;
use foodgram_domain::recipe::{IngredientAmount, RecipeDraft};

use crate::domain::types::{Recipe, RecipeIngredient, RecipeList, RecipeView};
use crate::error::FoodgramError;
use crate::handlers::pagination::PageResponse;
use crate::handlers::tag::TagResponse;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase, RecipePatch,
    RecipeQuery, UpdateRecipeUseCase,
};
use crate::usecase::recipe_list::{AddToRecipeListUseCase, RemoveFromRecipeListUseCase};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(item: RecipeIngredient) -> Self {
        Self {
            id: item.ingredient.id,
            name: item.ingredient.name,
            measurement_unit: item.ingredient.measurement_unit,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeView> for RecipeResponse {
    fn from(view: RecipeView) -> Self {
        Self {
            id: view.recipe.id,
            tags: view.tags.into_iter().map(TagResponse::from).collect(),
            author: view.author.into(),
            ingredients: view
                .ingredients
                .into_iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            is_favorited: view.is_favorited,
            is_in_shopping_cart: view.is_in_shopping_cart,
            name: view.recipe.name,
            image: view.recipe.image,
            text: view.recipe.text,
            cooking_time: view.recipe.cooking_time,
        }
    }
}

/// Abbreviated representation used by list toggles and subscriptions.
#[derive(Debug, Serialize)]
pub struct RecipeShortResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<Recipe> for RecipeShortResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            image: recipe.image,
            cooking_time: recipe.cooking_time,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i64,
}

impl From<IngredientAmountRequest> for IngredientAmount {
    fn from(req: IngredientAmountRequest) -> Self {
        Self {
            id: req.id,
            amount: req.amount,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    pub tags: Vec<i32>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}

impl From<CreateRecipeRequest> for RecipeDraft {
    fn from(req: CreateRecipeRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            text: req.text,
            cooking_time: req.cooking_time,
            tags: req.tags,
            ingredients: req.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub tags: Option<Vec<i32>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(req: UpdateRecipeRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            text: req.text,
            cooking_time: req.cooking_time,
            tags: req.tags,
            ingredients: req
                .ingredients
                .map(|items| items.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "foodgram_core::serde::optional_flag")]
    pub is_favorited: Option<bool>,
    #[serde(default, deserialize_with = "foodgram_core::serde::optional_flag")]
    pub is_in_shopping_cart: Option<bool>,
}

// ── GET /api/recipes/ ────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<Identity>,
    State(state): State<AppState>,
    uri: Uri,
    QueryParams(query): QueryParams<RecipeListQuery>,
) -> Result<Json<PageResponse<RecipeResponse>>, FoodgramError> {
    let uc = ListRecipesUseCase {
        reader: state.recipe_reader(),
    };
    let page = PageRequest::new(query.page, query.limit);
    let filters = RecipeQuery {
        author: query.author,
        tags: query.tags,
        is_favorited: query.is_favorited,
        is_in_shopping_cart: query.is_in_shopping_cart,
    };
    let result = uc
        .execute(identity.map(|i| i.user_id), filters, page)
        .await?;
    Ok(Json(PageResponse::from_page(result, &uri, RecipeResponse::from)))
}

// ── GET /api/recipes/{id}/ ───────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<Identity>,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let uc = GetRecipeUseCase {
        reader: state.recipe_reader(),
    };
    let view = uc.execute(identity.map(|i| i.user_id), id).await?;
    Ok(Json(view.into()))
}

// ── POST /api/recipes/ ───────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let recipe = uc.execute(identity.user_id, body.into()).await?;
    let view = state
        .recipe_reader()
        .present_one(Some(identity.user_id), recipe)
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── PATCH /api/recipes/{id}/ ─────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(body): JsonBody<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
    };
    let recipe = uc.execute(identity, id, body.into()).await?;
    let view = state
        .recipe_reader()
        .present_one(Some(identity.user_id), recipe)
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /api/recipes/{id}/ ────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, FoodgramError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    uc.execute(identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Favorites / shopping cart ────────────────────────────────────────────────

async fn add_to_list(
    state: AppState,
    list: RecipeList,
    user_id: i32,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    let uc = AddToRecipeListUseCase {
        recipes: state.recipe_repo(),
        lists: state.recipe_list_repo(),
    };
    let recipe = uc.execute(list, user_id, recipe_id).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

async fn remove_from_list(
    state: AppState,
    list: RecipeList,
    user_id: i32,
    recipe_id: i32,
) -> Result<StatusCode, FoodgramError> {
    let uc = RemoveFromRecipeListUseCase {
        recipes: state.recipe_repo(),
        lists: state.recipe_list_repo(),
    };
    uc.execute(list, user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/{id}/favorite/
pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    add_to_list(state, RecipeList::Favorites, identity.user_id, id).await
}

/// DELETE /api/recipes/{id}/favorite/
pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_from_list(state, RecipeList::Favorites, identity.user_id, id).await
}

/// POST /api/recipes/{id}/shopping_cart/
pub async fn add_to_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    add_to_list(state, RecipeList::ShoppingCart, identity.user_id, id).await
}

/// DELETE /api/recipes/{id}/shopping_cart/
pub async fn remove_from_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_from_list(state, RecipeList::ShoppingCart, identity.user_id, id).await
}

// ── GET /api/recipes/download_shopping_cart/ ─────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, FoodgramError> {
    let uc = DownloadShoppingListUseCase {
        lists: state.recipe_list_repo(),
    };
    let body = uc.execute(identity.user_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        body,
    ))
}
