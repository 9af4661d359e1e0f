use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, TimeZone, Utc};

use foodgram_api::domain::repository::{
    IngredientRepository, RecipeListRepository, RecipeRepository, SubscriptionRepository,
    TagRepository, UserRepository,
};
use foodgram_api::domain::types::{
    Ingredient, NewUser, Recipe, RecipeFilter, RecipeIngredient, RecipeList, RecipeWrite, Tag,
    User,
};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::recipe::RecipeReader;
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::recipe::FieldErrors;
use foodgram_domain::shopping_list::ShoppingListItem;

// ── In-memory tables ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
    /// (recipe_id, tag_id)
    pub recipe_tags: Vec<(i32, i32)>,
    /// (recipe_id, ingredient_id, amount)
    pub recipe_ingredients: Vec<(i32, i32, i32)>,
    /// (user_id, recipe_id)
    pub favorites: BTreeSet<(i32, i32)>,
    /// (user_id, recipe_id)
    pub carts: BTreeSet<(i32, i32)>,
    /// (user_id, author_id)
    pub subscriptions: BTreeSet<(i32, i32)>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn list_mut(&mut self, list: RecipeList) -> &mut BTreeSet<(i32, i32)> {
        match list {
            RecipeList::Favorites => &mut self.favorites,
            RecipeList::ShoppingCart => &mut self.carts,
        }
    }

    fn insert_associations(&mut self, recipe_id: i32, recipe: &RecipeWrite) {
        self.recipe_tags
            .extend(recipe.tags.iter().map(|&tag_id| (recipe_id, tag_id)));
        self.recipe_ingredients.extend(
            recipe
                .ingredients
                .iter()
                .map(|&(ingredient_id, amount)| (recipe_id, ingredient_id, amount)),
        );
    }

    fn tag_slugs(&self, recipe_id: i32) -> Vec<String> {
        self.recipe_tags
            .iter()
            .filter(|(r, _)| *r == recipe_id)
            .filter_map(|(_, t)| self.tags.iter().find(|tag| tag.id == *t))
            .filter_map(|tag| tag.slug.clone())
            .collect()
    }
}

/// Shared in-memory store backing every mock repository.
///
/// Clones share the same tables, so a test can seed data, run a use case
/// through the mocks and then inspect the result.
#[derive(Clone, Default)]
pub struct MemoryDb(Arc<Mutex<Tables>>);

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the standard catalog from [`seed_catalog`].
    pub fn seeded() -> Self {
        let db = Self::new();
        seed_catalog(&db);
        db
    }

    pub fn lock(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap()
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo { db: self.clone() }
    }

    pub fn tags(&self) -> MockTagRepo {
        MockTagRepo { db: self.clone() }
    }

    pub fn ingredients(&self) -> MockIngredientRepo {
        MockIngredientRepo { db: self.clone() }
    }

    pub fn recipes(&self) -> MockRecipeRepo {
        MockRecipeRepo { db: self.clone() }
    }

    pub fn lists(&self) -> MockRecipeListRepo {
        MockRecipeListRepo { db: self.clone() }
    }

    pub fn subscriptions(&self) -> MockSubscriptionRepo {
        MockSubscriptionRepo { db: self.clone() }
    }

    pub fn reader(
        &self,
    ) -> RecipeReader<MockRecipeRepo, MockUserRepo, MockRecipeListRepo, MockSubscriptionRepo> {
        RecipeReader {
            recipes: self.recipes(),
            users: self.users(),
            lists: self.lists(),
            subscriptions: self.subscriptions(),
        }
    }

    pub fn add_user(&self, id: i32, username: &str) -> User {
        let user = test_user(id, username);
        let mut tables = self.lock();
        tables.next_id = tables.next_id.max(id);
        tables.users.push(user.clone());
        user
    }

    /// Insert a recipe with the given tag and (ingredient, amount) ids.
    /// Later calls get a later `created_at`.
    pub fn add_recipe(
        &self,
        author_id: i32,
        name: &str,
        tags: &[i32],
        ingredients: &[(i32, i32)],
    ) -> Recipe {
        let mut tables = self.lock();
        let id = tables.next_id();
        let recipe = Recipe {
            id,
            author_id,
            name: name.into(),
            image: format!("recipes/{id}.png"),
            text: format!("How to cook {name}."),
            cooking_time: 15,
            created_at: base_time() + Duration::minutes(i64::from(id)),
        };
        tables.recipes.push(recipe.clone());
        tables.insert_associations(
            id,
            &RecipeWrite {
                name: recipe.name.clone(),
                image: recipe.image.clone(),
                text: recipe.text.clone(),
                cooking_time: recipe.cooking_time,
                tags: tags.to_vec(),
                ingredients: ingredients.to_vec(),
            },
        );
        recipe
    }

    pub fn mark(&self, list: RecipeList, user_id: i32, recipe_id: i32) {
        self.lock().list_mut(list).insert((user_id, recipe_id));
    }

    pub fn follow(&self, user_id: i32, author_id: i32) {
        self.lock().subscriptions.insert((user_id, author_id));
    }
}

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let count = items.len() as u64;
    let items = items
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.limit as usize)
        .collect();
    Page {
        items,
        count,
        request,
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Placeholder hash that never verifies. Use [`with_password`] for login tests.
pub const NO_PASSWORD: &str = "!";

pub fn test_user(id: i32, username: &str) -> User {
    User {
        id,
        email: format!("{username}@example.com"),
        username: username.into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        password_hash: NO_PASSWORD.into(),
        is_staff: false,
        date_joined: base_time(),
    }
}

/// Give an existing user a real Argon2 hash of `password`.
pub fn with_password(db: &MemoryDb, user_id: i32, password: &str) {
    let hash = foodgram_api::usecase::auth::hash_password(password).unwrap();
    let mut tables = db.lock();
    let user = tables.users.iter_mut().find(|u| u.id == user_id).unwrap();
    user.password_hash = hash;
}

pub const TAG_BREAKFAST: i32 = 1;
pub const TAG_LUNCH: i32 = 2;
pub const TAG_DINNER: i32 = 3;

pub const FLOUR: i32 = 11;
pub const EGGS: i32 = 12;
pub const SUGAR_G: i32 = 13;
pub const SUGAR_TBSP: i32 = 14;
pub const BROWN_SUGAR: i32 = 15;

/// Three tags and a handful of ingredients. Ids stay below the ids handed
/// out for users and recipes.
pub fn seed_catalog(db: &MemoryDb) {
    let mut tables = db.lock();
    for (id, name, slug, color) in [
        (TAG_BREAKFAST, "Breakfast", "breakfast", "#E26C2D"),
        (TAG_LUNCH, "Lunch", "lunch", "#49B64E"),
        (TAG_DINNER, "Dinner", "dinner", "#8775D2"),
    ] {
        tables.tags.push(Tag {
            id,
            name: name.into(),
            color: Some(color.into()),
            slug: Some(slug.into()),
        });
    }
    for (id, name, unit) in [
        (FLOUR, "flour", "g"),
        (EGGS, "eggs", "pcs"),
        (SUGAR_G, "sugar", "g"),
        (SUGAR_TBSP, "sugar", "tbsp"),
        (BROWN_SUGAR, "brown sugar", "g"),
    ] {
        tables.ingredients.push(Ingredient {
            id,
            name: name.into(),
            measurement_unit: unit.into(),
        });
    }
    tables.next_id = 100;
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub db: MemoryDb,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        Ok(self.db.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError> {
        Ok(self.db.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let mut tables = self.db.lock();
        // Mirrors the unique keys on users.email and users.username.
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(FieldErrors::single(
                "username",
                "a user with that username already exists",
            )
            .into());
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(
                FieldErrors::single("email", "a user with that email already exists").into(),
            );
        }
        let created = User {
            id: tables.next_id(),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password_hash: user.password_hash.clone(),
            is_staff: false,
            date_joined: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        let mut users = self.db.lock().users.clone();
        users.sort_by_key(|u| u.id);
        Ok(paginate(users, page))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        let mut tables = self.db.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(FoodgramError::UserNotFound)?;
        user.password_hash = password_hash.into();
        Ok(())
    }
}

// ── MockTagRepo ──────────────────────────────────────────────────────────────

pub struct MockTagRepo {
    pub db: MemoryDb,
}

impl TagRepository for MockTagRepo {
    async fn list(&self) -> Result<Vec<Tag>, FoodgramError> {
        let mut tags = self.db.lock().tags.clone();
        tags.sort_by_key(|t| t.id);
        Ok(tags)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, FoodgramError> {
        Ok(self.db.lock().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .tags
            .iter()
            .map(|t| t.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── MockIngredientRepo ───────────────────────────────────────────────────────

pub struct MockIngredientRepo {
    pub db: MemoryDb,
}

impl IngredientRepository for MockIngredientRepo {
    async fn search(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let mut all = self.db.lock().ingredients.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let Some(needle) = name.map(str::to_lowercase) else {
            return Ok(all);
        };
        let (prefix, rest): (Vec<_>, Vec<_>) = all
            .into_iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .partition(|i| i.name.to_lowercase().starts_with(&needle));
        Ok(prefix.into_iter().chain(rest).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .ingredients
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

// ── MockRecipeRepo ───────────────────────────────────────────────────────────

pub struct MockRecipeRepo {
    pub db: MemoryDb,
}

impl RecipeRepository for MockRecipeRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError> {
        Ok(self.db.lock().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError> {
        let tables = self.db.lock();
        let mut found: Vec<Recipe> = tables
            .recipes
            .iter()
            .filter(|r| filter.author.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tags.is_empty()
                    || tables
                        .tag_slugs(r.id)
                        .iter()
                        .any(|slug| filter.tags.contains(slug))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| tables.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| tables.carts.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(found, page))
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let mut found: Vec<Recipe> = self
            .db
            .lock()
            .recipes
            .iter()
            .filter(|r| r.author_id == author_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_by_authors(
        &self,
        author_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, FoodgramError> {
        let mut counts = HashMap::new();
        for recipe in &self.db.lock().recipes {
            if author_ids.contains(&recipe.author_id) {
                *counts.entry(recipe.author_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn create(&self, author_id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError> {
        let mut tables = self.db.lock();
        let id = tables.next_id();
        let created = Recipe {
            id,
            author_id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
            created_at: Utc::now(),
        };
        tables.recipes.push(created.clone());
        tables.insert_associations(id, recipe);
        Ok(created)
    }

    async fn update(&self, id: i32, recipe: &RecipeWrite) -> Result<Recipe, FoodgramError> {
        let mut tables = self.db.lock();
        let stored = tables
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("recipe {id} vanished during update"))?;
        stored.name = recipe.name.clone();
        stored.image = recipe.image.clone();
        stored.text = recipe.text.clone();
        stored.cooking_time = recipe.cooking_time;
        let updated = stored.clone();
        tables.recipe_tags.retain(|(r, _)| *r != id);
        tables.recipe_ingredients.retain(|(r, _, _)| *r != id);
        tables.insert_associations(id, recipe);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        let mut tables = self.db.lock();
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        if tables.recipes.len() == before {
            return Ok(false);
        }
        tables.recipe_tags.retain(|(r, _)| *r != id);
        tables.recipe_ingredients.retain(|(r, _, _)| *r != id);
        tables.favorites.retain(|(_, r)| *r != id);
        tables.carts.retain(|(_, r)| *r != id);
        Ok(true)
    }

    async fn tags_of(&self, recipe_ids: &[i32]) -> Result<HashMap<i32, Vec<Tag>>, FoodgramError> {
        let tables = self.db.lock();
        let mut out: HashMap<i32, Vec<Tag>> = HashMap::new();
        for &(recipe_id, tag_id) in &tables.recipe_tags {
            if !recipe_ids.contains(&recipe_id) {
                continue;
            }
            if let Some(tag) = tables.tags.iter().find(|t| t.id == tag_id) {
                out.entry(recipe_id).or_default().push(tag.clone());
            }
        }
        for tags in out.values_mut() {
            tags.sort_by_key(|t| t.id);
        }
        Ok(out)
    }

    async fn ingredients_of(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredient>>, FoodgramError> {
        let tables = self.db.lock();
        let mut out: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for &(recipe_id, ingredient_id, amount) in &tables.recipe_ingredients {
            if !recipe_ids.contains(&recipe_id) {
                continue;
            }
            if let Some(ingredient) = tables.ingredients.iter().find(|i| i.id == ingredient_id) {
                out.entry(recipe_id).or_default().push(RecipeIngredient {
                    ingredient: ingredient.clone(),
                    amount,
                });
            }
        }
        for items in out.values_mut() {
            items.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));
        }
        Ok(out)
    }
}

// ── MockRecipeListRepo ───────────────────────────────────────────────────────

pub struct MockRecipeListRepo {
    pub db: MemoryDb,
}

impl RecipeListRepository for MockRecipeListRepo {
    async fn add(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        Ok(self.db.lock().list_mut(list).insert((user_id, recipe_id)))
    }

    async fn remove(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_id: i32,
    ) -> Result<bool, FoodgramError> {
        Ok(self.db.lock().list_mut(list).remove(&(user_id, recipe_id)))
    }

    async fn marked(
        &self,
        list: RecipeList,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError> {
        let mut tables = self.db.lock();
        Ok(tables
            .list_mut(list)
            .iter()
            .filter(|(u, r)| *u == user_id && recipe_ids.contains(r))
            .map(|(_, r)| *r)
            .collect())
    }

    async fn shopping_totals(&self, user_id: i32) -> Result<Vec<ShoppingListItem>, FoodgramError> {
        let tables = self.db.lock();
        let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
        for &(_, recipe_id) in tables.carts.iter().filter(|(u, _)| *u == user_id) {
            for &(r, ingredient_id, amount) in &tables.recipe_ingredients {
                if r != recipe_id {
                    continue;
                }
                if let Some(i) = tables.ingredients.iter().find(|i| i.id == ingredient_id) {
                    *totals
                        .entry((i.name.clone(), i.measurement_unit.clone()))
                        .or_insert(0) += i64::from(amount);
                }
            }
        }
        Ok(totals
            .into_iter()
            .map(|((name, measurement_unit), amount)| ShoppingListItem {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }
}

// ── MockSubscriptionRepo ─────────────────────────────────────────────────────

pub struct MockSubscriptionRepo {
    pub db: MemoryDb,
}

impl SubscriptionRepository for MockSubscriptionRepo {
    async fn subscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        Ok(self.db.lock().subscriptions.insert((user_id, author_id)))
    }

    async fn unsubscribe(&self, user_id: i32, author_id: i32) -> Result<bool, FoodgramError> {
        Ok(self.db.lock().subscriptions.remove(&(user_id, author_id)))
    }

    async fn subscribed_among(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError> {
        Ok(self
            .db
            .lock()
            .subscriptions
            .iter()
            .filter(|(u, a)| *u == user_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }

    async fn list_authors(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError> {
        let tables = self.db.lock();
        let authors: Vec<User> = tables
            .subscriptions
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, a)| tables.users.iter().find(|user| user.id == *a))
            .cloned()
            .collect();
        Ok(paginate(authors, page))
    }
}
