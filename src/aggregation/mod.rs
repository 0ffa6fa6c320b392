//! Result Aggregation
//!
//! Post-processing applied to everything the engines returned for a request.
//!
//! ## Architecture Overview
//! 1. **Merge**: near-duplicate entries from different engines are folded into one.
//! 2. **Group**: merged bilingual entries are partitioned (none / by word class / by dictionary).
//! 3. **Order**: entries inside each group are ranked against the query string.
//!
//! ## Submodules
//! - **`normalize`**: Language- and word-class-specific general-form normalization.
//! - **`merge`**: The generic merge engine and the similar-recommendation merger.
//! - **`sourced`**: Entries tagged with the engines that produced them.
//! - **`group`**: Grouping strategies and `ResultGroup`.
//! - **`order`**: Ordering strategies, `ResultEntry` and monolingual ordering.
//! - **`distance`**: Levenshtein edit distance.

pub mod distance;
pub mod group;
pub mod merge;
pub mod normalize;
pub mod order;
pub mod sourced;

pub use group::{GroupingStrategy, GroupingType, ResultGroup};
pub use merge::{DictionaryObjectMerger, EntryMerger, MergeableEntry, SimilarElementsMerger};
pub use normalize::{NormalizationService, Normalizer, NormalizerError, PrefixNormalizer};
pub use order::{OrderStrategy, OrderType, ResultEntry, order_monolingual_entries};
pub use sourced::SourcedEntry;

#[cfg(test)]
mod tests;
