use foodgram_api::domain::types::RecipeList;
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::shopping_list::DownloadShoppingListUseCase;

use crate::helpers::{
    BROWN_SUGAR, EGGS, FLOUR, MemoryDb, SUGAR_G, SUGAR_TBSP, TAG_BREAKFAST, TAG_LUNCH,
};

#[tokio::test]
async fn should_sum_amounts_across_cart_recipes() {
    let db = MemoryDb::seeded();
    let pancakes = db.add_recipe(1, "Pancakes", &[TAG_BREAKFAST], &[(FLOUR, 200), (EGGS, 2)]);
    let cake = db.add_recipe(
        1,
        "Cake",
        &[TAG_BREAKFAST],
        &[(FLOUR, 300), (EGGS, 4), (SUGAR_G, 150), (SUGAR_TBSP, 2)],
    );
    let tea = db.add_recipe(1, "Tea", &[TAG_LUNCH], &[(BROWN_SUGAR, 10)]);
    db.mark(RecipeList::ShoppingCart, 2, pancakes.id);
    db.mark(RecipeList::ShoppingCart, 2, cake.id);
    // Other users' carts and favorites are ignored.
    db.mark(RecipeList::ShoppingCart, 3, tea.id);
    db.mark(RecipeList::Favorites, 2, tea.id);

    let uc = DownloadShoppingListUseCase { lists: db.lists() };
    let text = uc.execute(2).await.unwrap();

    assert_eq!(
        text,
        "Shopping list:\n\n\
         ~ eggs - 6 (pcs)\n\
         ~ flour - 500 (g)\n\
         ~ sugar - 150 (g)\n\
         ~ sugar - 2 (tbsp)\n\
         \nFoodgram\nHappy shopping!\n"
    );
}

#[tokio::test]
async fn should_reject_empty_cart() {
    let db = MemoryDb::seeded();
    let recipe = db.add_recipe(1, "Tea", &[TAG_LUNCH], &[(BROWN_SUGAR, 10)]);
    db.mark(RecipeList::Favorites, 2, recipe.id);

    let uc = DownloadShoppingListUseCase { lists: db.lists() };
    let err = uc.execute(2).await.unwrap_err();
    assert!(matches!(err, FoodgramError::EmptyShoppingCart), "got {err:?}");
}
