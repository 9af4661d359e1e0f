use std::collections::{HashMap, HashSet};

use anyhow::Context as _;

use foodgram_auth_types::identity::Identity;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::recipe::{FieldErrors, IngredientAmount, RecipeDraft};

use crate::domain::repository::{
    IngredientRepository, RecipeListRepository, RecipeRepository, SubscriptionRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{Recipe, RecipeFilter, RecipeList, RecipeView, RecipeWrite};
use crate::error::FoodgramError;
use crate::usecase::user::profiles;

// ── RecipeReader ─────────────────────────────────────────────────────────────

/// Builds full recipe representations for a caller: author profile, tags,
/// ingredient amounts and the caller's favorite/cart flags.
pub struct RecipeReader<R, U, L, S> {
    pub recipes: R,
    pub users: U,
    pub lists: L,
    pub subscriptions: S,
}

impl<R, U, L, S> RecipeReader<R, U, L, S>
where
    R: RecipeRepository,
    U: UserRepository,
    L: RecipeListRepository,
    S: SubscriptionRepository,
{
    /// Present `recipes` in the given order.
    pub async fn present(
        &self,
        caller: Option<i32>,
        recipes: Vec<Recipe>,
    ) -> Result<Vec<RecipeView>, FoodgramError> {
        if recipes.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<i32> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut tags = self.recipes.tags_of(&ids).await?;
        let mut ingredients = self.recipes.ingredients_of(&ids).await?;
        let authors = self.users.find_by_ids(&author_ids).await?;
        let authors: HashMap<i32, _> = profiles(&self.subscriptions, caller, authors)
            .await?
            .into_iter()
            .map(|p| (p.user.id, p))
            .collect();
        let (favorited, in_cart) = match caller {
            Some(user_id) => (
                self.lists.marked(RecipeList::Favorites, user_id, &ids).await?,
                self.lists
                    .marked(RecipeList::ShoppingCart, user_id, &ids)
                    .await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        recipes
            .into_iter()
            .map(|recipe| -> Result<RecipeView, FoodgramError> {
                let author = authors
                    .get(&recipe.author_id)
                    .cloned()
                    .with_context(|| format!("author of recipe {} not found", recipe.id))?;
                Ok(RecipeView {
                    tags: tags.remove(&recipe.id).unwrap_or_default(),
                    ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                    is_favorited: favorited.contains(&recipe.id),
                    is_in_shopping_cart: in_cart.contains(&recipe.id),
                    author,
                    recipe,
                })
            })
            .collect()
    }

    pub async fn present_one(
        &self,
        caller: Option<i32>,
        recipe: Recipe,
    ) -> Result<RecipeView, FoodgramError> {
        let id = recipe.id;
        self.present(caller, vec![recipe])
            .await?
            .pop()
            .with_context(|| format!("recipe {id} vanished while presenting"))
            .map_err(FoodgramError::from)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

/// Query-string filters for the recipe list.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub author: Option<i32>,
    pub tags: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

impl RecipeQuery {
    /// Resolve the query into repository filters. The favorite and cart
    /// filters apply only to an authenticated caller asking for `true`.
    pub fn into_filter(self, caller: Option<i32>) -> RecipeFilter {
        let mine = |flag: Option<bool>| caller.filter(|_| flag == Some(true));
        RecipeFilter {
            author: self.author,
            favorited_by: mine(self.is_favorited),
            in_cart_of: mine(self.is_in_shopping_cart),
            tags: self.tags,
        }
    }
}

pub struct ListRecipesUseCase<R, U, L, S> {
    pub reader: RecipeReader<R, U, L, S>,
}

impl<R, U, L, S> ListRecipesUseCase<R, U, L, S>
where
    R: RecipeRepository,
    U: UserRepository,
    L: RecipeListRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        caller: Option<i32>,
        query: RecipeQuery,
        page: PageRequest,
    ) -> Result<Page<RecipeView>, FoodgramError> {
        let filter = query.into_filter(caller);
        let page = self.reader.recipes.list(&filter, page).await?;
        let items = self.reader.present(caller, page.items).await?;
        Ok(Page {
            items,
            count: page.count,
            request: page.request,
        })
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R, U, L, S> {
    pub reader: RecipeReader<R, U, L, S>,
}

impl<R, U, L, S> GetRecipeUseCase<R, U, L, S>
where
    R: RecipeRepository,
    U: UserRepository,
    L: RecipeListRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(&self, caller: Option<i32>, id: i32) -> Result<RecipeView, FoodgramError> {
        let recipe = self
            .reader
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        self.reader.present_one(caller, recipe).await
    }
}

// ── Draft validation ─────────────────────────────────────────────────────────

/// Validate a draft against the stored tags and ingredients and narrow it to
/// the column types.
async fn check_draft<T: TagRepository, I: IngredientRepository>(
    tags: &T,
    ingredients: &I,
    draft: &RecipeDraft,
) -> Result<RecipeWrite, FoodgramError> {
    let ingredient_ids: Vec<i32> = draft.ingredients.iter().map(|i| i.id).collect();
    let known_ingredients = ingredients.existing_ids(&ingredient_ids).await?;
    let known_tags = tags.existing_ids(&draft.tags).await?;
    draft.validate(&known_ingredients, &known_tags)?;

    let amounts = draft
        .ingredients
        .iter()
        .map(|i| i32::try_from(i.amount).map(|amount| (i.id, amount)))
        .collect::<Result<Vec<_>, _>>()
        .context("ingredient amount out of range after validation")?;
    Ok(RecipeWrite {
        name: draft.name.trim().to_owned(),
        image: draft.image.clone(),
        text: draft.text.clone(),
        cooking_time: i32::try_from(draft.cooking_time)
            .context("cooking time out of range after validation")?,
        tags: draft.tags.clone(),
        ingredients: amounts,
    })
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct CreateRecipeUseCase<R, T, I> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> CreateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(&self, author_id: i32, draft: RecipeDraft) -> Result<Recipe, FoodgramError> {
        let write = check_draft(&self.tags, &self.ingredients, &draft).await?;
        let recipe = self.recipes.create(author_id, &write).await?;
        tracing::info!(recipe_id = recipe.id, author_id, "recipe created");
        Ok(recipe)
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

/// Partial update: scalar fields fall back to the stored values, while tags
/// and ingredients must always be sent.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
    pub tags: Option<Vec<i32>>,
    pub ingredients: Option<Vec<IngredientAmount>>,
}

impl RecipePatch {
    fn merge(self, current: &Recipe) -> Result<RecipeDraft, FieldErrors> {
        let mut missing = FieldErrors::new();
        if self.tags.is_none() {
            missing.add("tags", "this field is required");
        }
        if self.ingredients.is_none() {
            missing.add("ingredients", "this field is required");
        }
        missing.into_result()?;
        Ok(RecipeDraft {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            image: self.image.unwrap_or_else(|| current.image.clone()),
            text: self.text.unwrap_or_else(|| current.text.clone()),
            cooking_time: self
                .cooking_time
                .unwrap_or_else(|| i64::from(current.cooking_time)),
            tags: self.tags.unwrap_or_default(),
            ingredients: self.ingredients.unwrap_or_default(),
        })
    }
}

pub struct UpdateRecipeUseCase<R, T, I> {
    pub recipes: R,
    pub tags: T,
    pub ingredients: I,
}

impl<R, T, I> UpdateRecipeUseCase<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub async fn execute(
        &self,
        identity: Identity,
        id: i32,
        patch: RecipePatch,
    ) -> Result<Recipe, FoodgramError> {
        let current = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if !identity.can_modify(current.author_id) {
            return Err(FoodgramError::Forbidden);
        }
        let draft = patch.merge(&current)?;
        let write = check_draft(&self.tags, &self.ingredients, &draft).await?;
        let recipe = self.recipes.update(id, &write).await?;
        tracing::info!(recipe_id = id, user_id = identity.user_id, "recipe updated");
        Ok(recipe)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DeleteRecipeUseCase<R> {
    pub async fn execute(&self, identity: Identity, id: i32) -> Result<(), FoodgramError> {
        let current = self
            .recipes
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if !identity.can_modify(current.author_id) {
            return Err(FoodgramError::Forbidden);
        }
        if !self.recipes.delete(id).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        tracing::info!(recipe_id = id, user_id = identity.user_id, "recipe deleted");
        Ok(())
    }
}
