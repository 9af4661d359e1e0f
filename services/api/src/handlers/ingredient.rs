use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use foodgram_core::extract::{PathParam, QueryParams};

use crate::domain::types::Ingredient;
use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::ingredient::{GetIngredientUseCase, SearchIngredientsUseCase};

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct IngredientQuery {
    pub name: Option<String>,
}

// ── GET /api/ingredients/ ────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IngredientQuery>,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let uc = SearchIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let found = uc.execute(query.name.as_deref()).await?;
    Ok(Json(found.into_iter().map(IngredientResponse::from).collect()))
}

// ── GET /api/ingredients/{id}/ ───────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let uc = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
