use std::collections::{HashMap, HashSet};

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, Func, OnConflict, Query},
};

use foodgram_api_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts,
    subscriptions, tags, users,
};
use foodgram_core::sea_ext::WithPage as _;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::recipe::FieldErrors;
use foodgram_domain::shopping_list::ShoppingListItem;

use crate::domain::repository::{
    IngredientRepository, RecipeListRepository, RecipeRepository, SubscriptionRepository,
    TagRepository, UserRepository,
};
use crate::domain::types::{
    Ingredient, NewUser, Recipe, RecipeFilter, RecipeIngredient, RecipeList, RecipeWrite, Tag,
    User,
};
use crate::error::FoodgramError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FoodgramError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let model = users::ActiveModel {
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_staff: Set(false),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match model {
            Ok(model) => Ok(user_from_model(model)),
            // Lost a race against a concurrent registration with the same email or username.
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(message)) => {
                    Err(duplicate_user(&message).into())
                }
                _ => Err(anyhow::Error::new(err).context("create user").into()),
            },
        }
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        let page = page.clamped();
        let query = users::Entity::find();
        let count = query.clone().count(&self.db).await.context("count users")?;
        let models = query
            .order_by_asc(users::Column::Id)
            .with_page(page)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            count,
            request: page,
        })
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }
}

/// Name the offending field from a `users` unique-violation message.
fn duplicate_user(message: &str) -> FieldErrors {
    if message.contains("username") {
        FieldErrors::single("username", "a user with that username already exists")
    } else {
        FieldErrors::single("email", "a user with that email already exists")
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        is_staff: model.is_staff,
        date_joined: model.date_joined,
    }
}

// ── Tag repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTagRepository {
    pub db: DatabaseConnection,
}

impl TagRepository for DbTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError> {
        let model = tags::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tag by id")?;
        Ok(model.map(tag_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = tags::Entity::find()
            .select_only()
            .column(tags::Column::Id)
            .filter(tags::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing tag ids")?;
        Ok(found.into_iter().collect())
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        color: model.color,
        slug: model.slug,
    }
}

// ── Ingredient repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIngredientRepository {
    pub db: DatabaseConnection,
}

impl IngredientRepository for DbIngredientRepository {
    async fn search(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            let models = ingredients::Entity::find()
                .order_by_asc(ingredients::Column::Name)
                .all(&self.db)
                .await
                .context("list ingredients")?;
            return Ok(models.into_iter().map(ingredient_from_model).collect());
        };

        let needle = escape_like(&name.to_lowercase());
        let prefix = format!("{needle}%");
        let lower_name = || Expr::expr(Func::lower(Expr::col(ingredients::Column::Name)));

        let mut models = ingredients::Entity::find()
            .filter(lower_name().like(prefix.clone()))
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("search ingredients by prefix")?;
        let inner = ingredients::Entity::find()
            .filter(lower_name().like(format!("%{needle}%")))
            .filter(lower_name().not_like(prefix))
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("search ingredients by substring")?;
        models.extend(inner);
        Ok(models.into_iter().map(ingredient_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        let model = ingredients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find ingredient by id")?;
        Ok(model.map(ingredient_from_model))
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = ingredients::Entity::find()
            .select_only()
            .column(ingredients::Column::Id)
            .filter(ingredients::Column::Id.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find existing ingredient ids")?;
        Ok(found.into_iter().collect())
    }
}

fn ingredient_from_model(model: ingredients::Model) -> Ingredient {
    Ingredient {
        id: model.id,
        name: model.name,
        measurement_unit: model.measurement_unit,
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── Recipe repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError> {
        let page = page.clamped();
        let mut query = recipes::Entity::find();
        if let Some(author_id) = filter.author {
            query = query.filter(recipes::Column::AuthorId.eq(author_id));
        }
        if !filter.tags.is_empty() {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                        .from(recipe_tags::Entity)
                        .inner_join(
                            tags::Entity,
                            Expr::col((tags::Entity, tags::Column::Id))
                                .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                        )
                        .and_where(
                            Expr::col((tags::Entity, tags::Column::Slug))
                                .is_in(filter.tags.iter().cloned()),
                        )
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.favorited_by {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(favorites::Column::RecipeId)
                        .from(favorites::Entity)
                        .and_where(favorites::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(user_id) = filter.in_cart_of {
            query = query.filter(
                recipes::Column::Id.in_subquery(
                    Query::select()
                        .column(shopping_carts::Column::RecipeId)
                        .from(shopping_carts::Entity)
                        .and_where(shopping_carts::Column::UserId.eq(user_id))
                        .to_owned(),
                ),
            );
        }

        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::Id)
            .with_page(page)
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(Page {
            items: models.into_iter().map(recipe_from_model).collect(),
            count,
            request: page,
        })
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(u64::from(limit));
        }
        let models = query
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn count_by_authors(
        &self,
        author_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, FoodgramError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(i32, i64)> = recipes::Entity::find()
            .select_only()
            .column(recipes::Column::AuthorId)
            .column_as(Expr::col(recipes::Column::Id).count(), "recipes_count")
            .filter(recipes::Column::AuthorId.is_in(author_ids.iter().copied()))
            .group_by(recipes::Column::AuthorId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count recipes by author")?;
        Ok(rows
            .into_iter()
            .map(|(author_id, count)| (author_id, count.max(0) as u64))
            .collect())
    }

    async fn create(&self, author_id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError> {
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        author_id: Set(author_id),
                        name: Set(recipe.name.clone()),
                        image: Set(recipe.image.clone()),
                        text: Set(recipe.text.clone()),
                        cooking_time: Set(recipe.cooking_time),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_associations(txn, model.id, &recipe).await?;
                    Ok(model)
                })
            })
            .await
            .context("create recipe with tags and ingredients")?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError> {
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                let recipe = recipe.clone();
                Box::pin(async move {
                    let model = recipes::ActiveModel {
                        id: Set(id),
                        name: Set(recipe.name.clone()),
                        image: Set(recipe.image.clone()),
                        text: Set(recipe.text.clone()),
                        cooking_time: Set(recipe.cooking_time),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    recipe_tags::Entity::delete_many()
                        .filter(recipe_tags::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    recipe_ingredients::Entity::delete_many()
                        .filter(recipe_ingredients::Column::RecipeId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_associations(txn, id, &recipe).await?;
                    Ok(model)
                })
            })
            .await
            .context("update recipe with tags and ingredients")?;
        Ok(recipe_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected > 0)
    }

    async fn tags_of(&self, recipe_ids: &[i32]) -> Result<HashMap<i32, Vec<Tag>>, FoodgramError> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(tags::Entity)
            .order_by_asc(recipe_tags::Column::TagId)
            .all(&self.db)
            .await
            .context("load recipe tags")?;

        let mut by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in rows {
            if let Some(tag) = tag {
                by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag_from_model(tag));
            }
        }
        Ok(by_recipe)
    }

    async fn ingredients_of(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredient>>, FoodgramError> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?;

        let mut by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for (link, ingredient) in rows {
            if let Some(ingredient) = ingredient {
                by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(RecipeIngredient {
                        ingredient: ingredient_from_model(ingredient),
                        amount: link.amount,
                    });
            }
        }
        Ok(by_recipe)
    }
}

async fn insert_associations(
    txn: &DatabaseTransaction,
    recipe_id: i32,
    recipe: &RecipeWrite,
) -> Result<(), DbErr> {
    if !recipe.tags.is_empty() {
        recipe_tags::Entity::insert_many(recipe.tags.iter().map(|&tag_id| {
            recipe_tags::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(tag_id),
            }
        }))
        .exec_without_returning(txn)
        .await?;
    }
    if !recipe.ingredients.is_empty() {
        recipe_ingredients::Entity::insert_many(recipe.ingredients.iter().map(
            |&(ingredient_id, amount)| recipe_ingredients::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(ingredient_id),
                amount: Set(amount),
            },
        ))
        .exec_without_returning(txn)
        .await?;
    }
    Ok(())
}

fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        image: model.image,
        text: model.text,
        cooking_time: model.cooking_time,
        created_at: model.created_at,
    }
}

// ── Favorites / shopping cart repository ─────────────────────────────────────

#[derive(Clone)]
pub struct DbRecipeListRepository {
    pub db: DatabaseConnection,
}

impl RecipeListRepository for DbRecipeListRepository {
    async fn add(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        let now = Utc::now();
        // ON CONFLICT DO NOTHING: a concurrent duplicate reports "already present"
        // instead of a unique violation.
        let inserted = match list {
            RecipeList::Favorites => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .context("add recipe to list")?;
        Ok(inserted > 0)
    }

    async fn remove(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        let result = match list {
            RecipeList::Favorites => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .context("remove recipe from list")?;
        Ok(result.rows_affected > 0)
    }

    async fn marked(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = recipe_ids.iter().copied();
        let found: Vec<i32> = match list {
            RecipeList::Favorites => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
            RecipeList::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(ids))
                    .into_tuple()
                    .all(&self.db)
                    .await
            }
        }
        .context("find marked recipes")?;
        Ok(found.into_iter().collect())
    }

    async fn shopping_totals(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError> {
        #[derive(Debug, FromQueryResult)]
        struct TotalRow {
            name: String,
            measurement_unit: String,
            amount: i64,
        }

        let sql = r#"
            SELECT i.name, i.measurement_unit, SUM(ri.amount)::BIGINT AS amount
                FROM shopping_carts sc
                JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
                JOIN ingredients i ON i.id = ri.ingredient_id
                WHERE sc.user_id = $1
                GROUP BY i.name, i.measurement_unit
                ORDER BY i.name, i.measurement_unit
            "#;

        let rows = TotalRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("sum shopping cart ingredients")?;

        Ok(rows
            .into_iter()
            .map(|row| ShoppingListItem {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }
}

// ── Subscription repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SubscriptionRepository for DbSubscriptionRepository {
    async fn subscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let inserted = subscriptions::Entity::insert(subscriptions::ActiveModel {
            user_id: Set(user_id),
            author_id: Set(author_id),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([
                subscriptions::Column::UserId,
                subscriptions::Column::AuthorId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("create subscription")?;
        Ok(inserted > 0)
    }

    async fn unsubscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        let result = subscriptions::Entity::delete_many()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .context("delete subscription")?;
        Ok(result.rows_affected > 0)
    }

    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<i32> = subscriptions::Entity::find()
            .select_only()
            .column(subscriptions::Column::AuthorId)
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.is_in(author_ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find subscribed authors")?;
        Ok(found.into_iter().collect())
    }

    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError> {
        let page = page.clamped();
        let query = users::Entity::find().filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(subscriptions::Column::AuthorId)
                    .from(subscriptions::Entity)
                    .and_where(subscriptions::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count subscriptions")?;
        let models = query
            .order_by_asc(users::Column::Id)
            .with_page(page)
            .all(&self.db)
            .await
            .context("list subscribed authors")?;
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            count,
            request: page,
        })
    }
}
