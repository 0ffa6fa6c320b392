//! Dictionary Entry Model
//!
//! Value types produced by search engines and consumed by the aggregation pipeline.
//! Everything here is plain data: `Clone`, comparable, and serializable so step results can be
//! written to the durable cache as JSON.
//!
//! ## Submodules
//! - **`types`**: Word classes (`EntryType`) and grammatical tags (gender, number, case, forms).
//! - **`object`**: `DictionaryObject`, the annotated single-language word or phrase.
//! - **`entries`**: Bilingual and monolingual entries, synonyms and external content.
//! - **`result`**: `EngineQueryResult`, the payload one engine returns for one query step.

pub mod entries;
pub mod object;
pub mod result;
pub mod types;

pub use entries::{BilingualEntry, ExternalContent, MonolingualEntry, SynonymEntry, SynonymGroup};
pub use object::DictionaryObject;
pub use result::{BilingualQueryResult, EngineQueryResult, MonolingualQueryResult};
pub use types::{EntryType, GrammaticalCase, GrammaticalForm, GrammaticalGender, GrammaticalNumber};

#[cfg(test)]
mod tests;
