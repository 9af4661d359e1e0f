//! Recipe write payloads and their validation rules.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

/// Maximum length of a recipe name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Smallest accepted cooking time (minutes) and ingredient amount.
pub const MIN_COOKING_TIME: i64 = 1;
pub const MIN_AMOUNT: i64 = 1;

/// An ingredient reference with its amount, as sent by the client.
///
/// Numbers are kept as `i64` so out-of-range values reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub id: i32,
    pub amount: i64,
}

/// A complete recipe payload, validated as a whole before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Per-field validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed")]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a single message.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl RecipeDraft {
    /// Validate the draft against the set of existing ingredient and tag ids.
    ///
    /// Every offending field is reported; the draft is accepted only if no
    /// field has an error.
    pub fn validate(
        &self,
        known_ingredients: &HashSet<i32>,
        known_tags: &HashSet<i32>,
    ) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "name must not be empty");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.add(
                "name",
                format!("name must be at most {MAX_NAME_LEN} characters"),
            );
        }
        if self.text.trim().is_empty() {
            errors.add("text", "text must not be empty");
        }
        if self.image.trim().is_empty() {
            errors.add("image", "image must not be empty");
        }
        if self.cooking_time < MIN_COOKING_TIME {
            errors.add("cooking_time", "cooking time must be at least 1 minute");
        } else if self.cooking_time > i64::from(i32::MAX) {
            errors.add("cooking_time", "cooking time is too large");
        }

        self.validate_ingredients(known_ingredients, &mut errors);
        self.validate_tags(known_tags, &mut errors);

        errors.into_result()
    }

    fn validate_ingredients(&self, known: &HashSet<i32>, errors: &mut FieldErrors) {
        if self.ingredients.is_empty() {
            errors.add("ingredients", "add at least one ingredient");
            return;
        }
        let mut seen = HashSet::with_capacity(self.ingredients.len());
        for item in &self.ingredients {
            if !known.contains(&item.id) {
                errors.add("ingredients", format!("ingredient {} does not exist", item.id));
            }
            if !seen.insert(item.id) {
                errors.add(
                    "ingredients",
                    format!("ingredient {} is listed more than once", item.id),
                );
            }
            if item.amount < MIN_AMOUNT {
                errors.add(
                    "ingredients",
                    format!("amount of ingredient {} must be at least 1", item.id),
                );
            } else if item.amount > i64::from(i32::MAX) {
                errors.add(
                    "ingredients",
                    format!("amount of ingredient {} is too large", item.id),
                );
            }
        }
    }

    fn validate_tags(&self, known: &HashSet<i32>, errors: &mut FieldErrors) {
        if self.tags.is_empty() {
            errors.add("tags", "add at least one tag");
            return;
        }
        let mut seen = HashSet::with_capacity(self.tags.len());
        for &tag in &self.tags {
            if !known.contains(&tag) {
                errors.add("tags", format!("tag {tag} does not exist"));
            }
            if !seen.insert(tag) {
                errors.add("tags", format!("tag {tag} is listed more than once"));
            }
        }
    }
}
