use crate::domain::repository::{RecipeListRepository, RecipeRepository};
use crate::domain::types::{Recipe, RecipeList};
use crate::error::FoodgramError;

fn already_present(list: RecipeList) -> FoodgramError {
    match list {
        RecipeList::Favorites => FoodgramError::AlreadyFavorited,
        RecipeList::ShoppingCart => FoodgramError::AlreadyInShoppingCart,
    }
}

fn not_present(list: RecipeList) -> FoodgramError {
    match list {
        RecipeList::Favorites => FoodgramError::NotFavorited,
        RecipeList::ShoppingCart => FoodgramError::NotInShoppingCart,
    }
}

// ── AddToRecipeList ──────────────────────────────────────────────────────────

pub struct AddToRecipeListUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> AddToRecipeListUseCase<R, L> {
    /// Add a recipe to the user's favorites or shopping cart. Adding a recipe
    /// that is already present is an error, not a no-op.
    pub async fn execute(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<Recipe, FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if !self.lists.add(list, user_id, recipe_id).await? {
            return Err(already_present(list));
        }
        tracing::info!(?list, user_id, recipe_id, "recipe added to list");
        Ok(recipe)
    }
}

// ── RemoveFromRecipeList ─────────────────────────────────────────────────────

pub struct RemoveFromRecipeListUseCase<R: RecipeRepository, L: RecipeListRepository> {
    pub recipes: R,
    pub lists: L,
}

impl<R: RecipeRepository, L: RecipeListRepository> RemoveFromRecipeListUseCase<R, L> {
    pub async fn execute(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<(), FoodgramError> {
        if self.recipes.find_by_id(recipe_id).await?.is_none() {
            return Err(FoodgramError::RecipeNotFound);
        }
        if !self.lists.remove(list, user_id, recipe_id).await? {
            return Err(not_present(list));
        }
        tracing::info!(?list, user_id, recipe_id, "recipe removed from list");
        Ok(())
    }
}
