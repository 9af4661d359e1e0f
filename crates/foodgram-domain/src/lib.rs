//! Domain types and rules shared across Foodgram crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never depend on axum or sea-orm here.

pub mod pagination;
pub mod recipe;
pub mod shopping_list;
pub mod user;
