use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use foodgram_auth_types::token::TokenKeys;

use crate::infra::db::{
    DbIngredientRepository, DbRecipeListRepository, DbRecipeRepository,
    DbSubscriptionRepository, DbTagRepository, DbUserRepository,
};
use crate::usecase::recipe::RecipeReader;

pub type DbRecipeReader = RecipeReader<
    DbRecipeRepository,
    DbUserRepository,
    DbRecipeListRepository,
    DbSubscriptionRepository,
>;

/// Shared application state passed to every handler via axum `State`.
///
/// `FromRef` lets the `Identity` extractor pull `TokenKeys` and the readiness
/// probe pull the `DatabaseConnection`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_list_repo(&self) -> DbRecipeListRepository {
        DbRecipeListRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_reader(&self) -> DbRecipeReader {
        RecipeReader {
            recipes: self.recipe_repo(),
            users: self.user_repo(),
            lists: self.recipe_list_repo(),
            subscriptions: self.subscription_repo(),
        }
    }
}
