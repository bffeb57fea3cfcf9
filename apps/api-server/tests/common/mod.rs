//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use api_server::state::AppState;
use scribe_infra::InMemoryStorage;

/// Fresh application state over an empty in-memory backend.
pub fn test_state() -> AppState {
    AppState::with_storage(Arc::new(InMemoryStorage::new()))
}
