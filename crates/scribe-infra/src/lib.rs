//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains the local key-value storage backends.

pub mod storage;

pub use storage::{FileStorage, InMemoryStorage};
