//! Test utilities for Foodgram services.
//!
//! Provides `MockAuth` for minting bearer headers and a JSON fixture loader.
//! Import in `#[cfg(test)]` blocks or `tests/` only, never in production code.

pub mod auth;
pub mod fixture;
