use foodgram_domain::shopping_list::render;

use crate::domain::repository::RecipeListRepository;
use crate::error::FoodgramError;

// ── DownloadShoppingList ─────────────────────────────────────────────────────

pub struct DownloadShoppingListUseCase<L: RecipeListRepository> {
    pub lists: L,
}

impl<L: RecipeListRepository> DownloadShoppingListUseCase<L> {
    /// Render the summed ingredients of the user's shopping cart as text.
    /// An empty cart is an error rather than an empty list.
    pub async fn execute(&self, user_id: i32) -> Result<String, FoodgramError> {
        let items = self.lists.shopping_totals(user_id).await?;
        if items.is_empty() {
            return Err(FoodgramError::EmptyShoppingCart);
        }
        Ok(render(&items))
    }
}
