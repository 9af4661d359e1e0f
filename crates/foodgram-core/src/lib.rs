//! Shared HTTP plumbing for Foodgram services: errors, extractors, health
//! probes, request-id/trace middleware, tracing setup and sea-orm helpers.

pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
