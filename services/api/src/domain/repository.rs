#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::shopping_list::ShoppingListItem;

use crate::domain::types::{
    Ingredient, NewUser, Recipe, RecipeFilter, RecipeIngredient, RecipeList, RecipeWrite, Tag,
    User,
};
use crate::error::FoodgramError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError>;
    /// Lookup by the normalized (lower-case) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FoodgramError>;
    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError>;
    /// All users ordered by id.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError>;
}

/// Repository for tags. Tags are managed out of band; the API only reads them.
pub trait TagRepository: Send + Sync {
    /// All tags ordered by id.
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError>;
    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError>;
}

/// Repository for ingredients. Read-only, like tags.
pub trait IngredientRepository: Send + Sync {
    /// Case-insensitive name search: prefix matches first, then other
    /// substring matches, each group ordered by name. `None` lists all.
    async fn search(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError>;
    /// The subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError>;
}

/// Repository for recipes and their tag/ingredient associations.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError>;

    /// Filtered recipes, newest first.
    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError>;

    /// An author's recipes, newest first, truncated to `limit` if given.
    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<Recipe>, FoodgramError>;

    /// Recipe counts keyed by author id. Authors without recipes are absent.
    async fn count_by_authors(
        &self,
        author_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, FoodgramError>;

    /// Insert the recipe row and its associations in one transaction.
    async fn create(&self, author_id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError>;

    /// Overwrite the recipe row and replace all of its associations in one
    /// transaction.
    async fn update(&self, id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError>;

    /// Delete a recipe. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, FoodgramError>;

    /// Tags of each recipe, keyed by recipe id, each list ordered by tag id.
    async fn tags_of(&self, recipe_ids: &[i32]) -> Result<HashMap<i32, Vec<Tag>>, FoodgramError>;

    /// Ingredient amounts of each recipe, keyed by recipe id, each list
    /// ordered by ingredient name.
    async fn ingredients_of(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredient>>, FoodgramError>;
}

/// Repository for the favorites and shopping-cart collections.
pub trait RecipeListRepository: Send + Sync {
    /// Add a recipe. Returns `false` if it was already present.
    async fn add(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError>;

    /// Remove a recipe. Returns `false` if it was not present.
    async fn remove(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError>;

    /// The subset of `recipe_ids` present in the user's list.
    async fn marked(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError>;

    /// Ingredient amounts summed over every recipe in the user's shopping
    /// cart, one item per (name, unit), ordered by name then unit.
    async fn shopping_totals(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError>;
}

/// Repository for follower → author subscriptions.
pub trait SubscriptionRepository: Send + Sync {
    /// Returns `false` if the subscription already existed.
    async fn subscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError>;

    /// Returns `false` if there was no subscription.
    async fn unsubscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError>;

    /// The subset of `author_ids` the user follows.
    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError>;

    /// Authors the user follows, ordered by author id.
    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError>;
}
