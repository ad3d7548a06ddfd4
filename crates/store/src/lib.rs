//! Headless content store client and repositories.
//!
//! All persistence lives in an external content store reached over HTTP.
//! This crate provides:
//! - The `ContentStore` abstraction and its query types
//! - `HttpContentStore`, the remote client
//! - `MemoryContentStore`, an in-process stand-in for tests and local runs
//! - Typed repositories for users, categories, and transactions

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod object;
pub mod repositories;

pub use client::ContentStore;
pub use error::StoreError;
pub use http::HttpContentStore;
pub use memory::MemoryContentStore;
pub use object::{NewObject, ObjectPatch, ObjectQuery, StoredObject};
pub use repositories::{CategoryRepository, TransactionRepository, UserRecord, UserRepository};

use std::sync::Arc;

use tally_shared::config::{StoreBackend, StoreConfig};

/// Builds the store selected by configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn connect(config: &StoreConfig) -> Result<Arc<dyn ContentStore>, StoreError> {
    match config.backend {
        StoreBackend::Http => Ok(Arc::new(HttpContentStore::new(config)?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryContentStore::new())),
    }
}
