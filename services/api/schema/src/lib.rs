pub mod favorites;
pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipes;
pub mod shopping_carts;
pub mod subscriptions;
pub mod tags;
pub mod users;
