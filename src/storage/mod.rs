//! Storage Module
//!
//! A namespaced key/value abstraction used as the durable tier of the step cache.
//!
//! ## Core Concepts
//! - **Namespaces**: Every value lives under `(namespace, key)`; the step cache uses `"QueryCache"`.
//! - **Values**: JSON strings. `StorageJsonExt` layers typed reads/writes on top and reports
//!   undecodable values as `StorageError::Corrupted`.
//! - **Backends**: `InMemoryStorage` ships with the crate; other backends implement `StorageService`.

pub mod memory;
pub mod service;

pub use memory::InMemoryStorage;
pub use service::{StorageError, StorageJsonExt, StorageService};
