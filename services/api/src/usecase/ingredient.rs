use crate::domain::repository::IngredientRepository;
use crate::domain::types::Ingredient;
use crate::error::FoodgramError;

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        self.repo.search(name).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::IngredientNotFound)
    }
}
