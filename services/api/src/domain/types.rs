use chrono::{DateTime, Utc};

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Fields required to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

/// Stored recipe row, without its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// An ingredient as used by a particular recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Validated recipe payload ready to be written, with amounts narrowed to
/// the column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWrite {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<i32>,
    pub ingredients: Vec<(i32, i32)>,
}

/// Recipe list filters. `favorited_by` / `in_cart_of` restrict the result to
/// the given user's favorites / shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub author: Option<i32>,
    pub tags: Vec<String>,
    pub favorited_by: Option<i32>,
    pub in_cart_of: Option<i32>,
}

/// The two per-user recipe collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

/// A user as seen by a particular caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub is_subscribed: bool,
}

/// A recipe with its author, tags and ingredient amounts, plus the caller's
/// favorite/cart flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub author: Profile,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// An author the caller follows, with a preview of their recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub author: Profile,
    pub recipes: Vec<Recipe>,
    pub recipes_count: u64,
}
