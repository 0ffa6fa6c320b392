//! Federated Dictionary Query Library
//!
//! This library crate defines the query aggregation pipeline: a lookup is fanned out to every
//! registered search engine that serves the requested dictionaries and languages, the step
//! results are cached, and the combined entries are merged, grouped and ranked.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`language`**: Interned, dialect-aware languages and bilingual dictionaries.
//! - **`entry`**: The dictionary entry model engines produce.
//! - **`engine`**: The `SearchEngine` capability trait and the `EngineRegistry`.
//! - **`storage`**: The namespaced key/value service backing the durable step cache.
//! - **`executor`**: Plan execution strategies and the two-tier step cache.
//! - **`query`**: Requests, planning, collection, responses and the `QueryService` entry point.
//! - **`aggregation`**: Merging, grouping and ordering of collected entries.
//! - **`config`**: `PipelineConfig`.
//! - **`error`**: Request-level errors.

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod executor;
pub mod language;
pub mod query;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;
