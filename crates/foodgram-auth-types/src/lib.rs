//! Auth types shared across Foodgram crates.
//!
//! Provides bearer-token (JWT) issuance and validation and the `Identity` extractor.

pub mod identity;
pub mod token;
