use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{Profile, Subscription, User};
use crate::error::FoodgramError;

async fn subscription_view<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u32>,
    recipes_count: u64,
) -> Result<Subscription, FoodgramError> {
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    Ok(Subscription {
        author: Profile {
            user: author,
            is_subscribed: true,
        },
        recipes: preview,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<U, R, S> {
    pub users: U,
    pub recipes: R,
    pub subscriptions: S,
}

impl<U, R, S> SubscribeUseCase<U, R, S>
where
    U: UserRepository,
    R: RecipeRepository,
    S: SubscriptionRepository,
{
    pub async fn execute(
        &self,
        user_id: i32,
        author_id: i32,
        recipes_limit: Option<u32>,
    ) -> Result<Subscription, FoodgramError> {
        if user_id == author_id {
            return Err(FoodgramError::SelfSubscription);
        }
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        if !self.subscriptions.subscribe(user_id, author_id).await? {
            return Err(FoodgramError::AlreadySubscribed);
        }
        tracing::info!(user_id, author_id, "subscribed");

        let counts = self.recipes.count_by_authors(&[author_id]).await?;
        let count = counts.get(&author_id).copied().unwrap_or(0);
        subscription_view(&self.recipes, author, recipes_limit, count).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> UnsubscribeUseCase<U, S> {
    pub async fn execute(&self, user_id: i32, author_id: i32) -> Result<(), FoodgramError> {
        if user_id == author_id {
            return Err(FoodgramError::SelfSubscription);
        }
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(FoodgramError::UserNotFound);
        }
        if !self.subscriptions.unsubscribe(user_id, author_id).await? {
            return Err(FoodgramError::NotSubscribed);
        }
        tracing::info!(user_id, author_id, "unsubscribed");
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<R: RecipeRepository, S: SubscriptionRepository> {
    pub recipes: R,
    pub subscriptions: S,
}

impl<R: RecipeRepository, S: SubscriptionRepository> ListSubscriptionsUseCase<R, S> {
    pub async fn execute(
        &self,
        user_id: i32,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<Subscription>, FoodgramError> {
        let page = self.subscriptions.list_authors(user_id, page).await?;
        let author_ids: Vec<i32> = page.items.iter().map(|u| u.id).collect();
        let counts = self.recipes.count_by_authors(&author_ids).await?;

        let mut items = Vec::with_capacity(page.items.len());
        for author in page.items {
            let count = counts.get(&author.id).copied().unwrap_or(0);
            items.push(subscription_view(&self.recipes, author, recipes_limit, count).await?);
        }
        Ok(Page {
            items,
            count: page.count,
            request: page.request,
        })
    }
}
