use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use foodgram_domain::recipe::FieldErrors;

/// Foodgram API error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    #[error("validation failed")]
    Validation(#[from] FieldErrors),
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("recipe is already in favorites")]
    AlreadyFavorited,
    #[error("recipe is not in favorites")]
    NotFavorited,
    #[error("recipe is already in the shopping cart")]
    AlreadyInShoppingCart,
    #[error("recipe is not in the shopping cart")]
    NotInShoppingCart,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("already subscribed to this author")]
    AlreadySubscribed,
    #[error("not subscribed to this author")]
    NotSubscribed,
    #[error("shopping cart is empty")]
    EmptyShoppingCart,
    #[error("unable to log in with provided credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::NotFavorited => "NOT_FAVORITED",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::EmptyShoppingCart => "EMPTY_SHOPPING_CART",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::RecipeNotFound
            | Self::UserNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_)
            | Self::AlreadyFavorited
            | Self::NotFavorited
            | Self::AlreadyInShoppingCart
            | Self::NotInShoppingCart
            | Self::SelfSubscription
            | Self::AlreadySubscribed
            | Self::NotSubscribed
            | Self::EmptyShoppingCart
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref fields) = self {
            body["fields"] = serde_json::to_value(fields).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
