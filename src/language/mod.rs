//! Languages and Bilingual Dictionaries
//!
//! Every entry that flows through the pipeline is tagged with a `Language`, and every
//! bilingual lookup targets a `BilingualDictionary` (a language pair plus a direction flag).
//!
//! ## Submodules
//! - **`language`**: Interned language values with optional dialects (`no_bo`, `no_ny`).
//! - **`dictionary`**: Language pairs, their query-string syntax (`de<>en`, `de-en`) and inversion.

pub mod dictionary;
pub mod language;

pub use dictionary::{BilingualDictionary, resolve_dictionaries, sort_by_priority};
pub use language::{Language, LanguageError};

#[cfg(test)]
mod tests;
