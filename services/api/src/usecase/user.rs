use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_domain::recipe::FieldErrors;
use foodgram_domain::user::{MAX_NAME_LEN, normalize_email, validate_username};

use crate::domain::repository::{SubscriptionRepository, UserRepository};
use crate::domain::types::{NewUser, Profile, User};
use crate::error::FoodgramError;
use crate::usecase::auth::{hash_password, verify_password};

/// Wrap users as seen by `caller`, resolving `is_subscribed` in one query.
pub async fn profiles<S: SubscriptionRepository>(
    subscriptions: &S,
    caller: Option<i32>,
    users: Vec<User>,
) -> Result<Vec<Profile>, FoodgramError> {
    let followed = match caller {
        Some(caller_id) => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            subscriptions.subscribed_among(caller_id, &ids).await?
        }
        None => Default::default(),
    };
    Ok(users
        .into_iter()
        .map(|user| Profile {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, FoodgramError> {
        let mut errors = FieldErrors::new();

        // An empty string marks an unparseable address.
        let email = normalize_email(&input.email).unwrap_or_default();
        if email.is_empty() {
            errors.add("email", "enter a valid email address");
        } else if self.users.find_by_email(&email).await?.is_some() {
            errors.add("email", "a user with that email already exists");
        }

        let username = input.username.trim();
        if !validate_username(username) {
            errors.add(
                "username",
                "enter a valid username: up to 150 letters, digits and @/./+/-/_ only, not \"me\"",
            );
        } else if self.users.find_by_username(username).await?.is_some() {
            errors.add("username", "a user with that username already exists");
        }

        check_name(&mut errors, "first_name", &input.first_name);
        check_name(&mut errors, "last_name", &input.last_name);
        if input.password.is_empty() {
            errors.add("password", "password must not be empty");
        }

        errors.into_result()?;

        let user = self
            .users
            .create(&NewUser {
                email,
                username: username.to_owned(),
                first_name: input.first_name.trim().to_owned(),
                last_name: input.last_name.trim().to_owned(),
                password_hash: hash_password(&input.password)?,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

fn check_name(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "this field must not be empty");
    } else if value.chars().count() > MAX_NAME_LEN {
        errors.add(
            field,
            format!("ensure this field has no more than {MAX_NAME_LEN} characters"),
        );
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> GetUserUseCase<U, S> {
    pub async fn execute(&self, caller: Option<i32>, id: i32) -> Result<Profile, FoodgramError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        let mut found = profiles(&self.subscriptions, caller, vec![user]).await?;
        found.pop().ok_or(FoodgramError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, S: SubscriptionRepository> {
    pub users: U,
    pub subscriptions: S,
}

impl<U: UserRepository, S: SubscriptionRepository> ListUsersUseCase<U, S> {
    pub async fn execute(
        &self,
        caller: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<Profile>, FoodgramError> {
        let page = self.users.list(page).await?;
        let items = profiles(&self.subscriptions, caller, page.items).await?;
        Ok(Page {
            items,
            count: page.count,
            request: page.request,
        })
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    pub async fn execute(&self, user_id: i32, input: SetPasswordInput) -> Result<(), FoodgramError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;

        let mut errors = FieldErrors::new();
        if !verify_password(&input.current_password, &user.password_hash) {
            errors.add("current_password", "invalid password");
        }
        if input.new_password.is_empty() {
            errors.add("new_password", "password must not be empty");
        }
        errors.into_result()?;

        let hash = hash_password(&input.new_password)?;
        self.users.update_password(user_id, &hash).await?;
        tracing::info!(user_id, "password changed");
        Ok(())
    }
}
