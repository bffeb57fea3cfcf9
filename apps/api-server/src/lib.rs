//! # Scribe API Server
//!
//! Actix-web HTTP surface over the post store. Handlers own input trimming
//! and validation; the store itself trusts its callers.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
