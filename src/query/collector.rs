//! Flattening of step results into typed buckets.
//!
//! Nothing is merged or de-duplicated here. Failed steps carry the empty sentinel result and
//! therefore contribute nothing.

use super::types::QueryStepResult;
use crate::aggregation::SourcedEntry;
use crate::entry::{BilingualEntry, DictionaryObject, ExternalContent, MonolingualEntry, SynonymEntry};

/// Everything the steps of one plan returned, concatenated in plan order.
#[derive(Debug, Clone, Default)]
pub struct CollectedResults {
    pub bilingual_entries: Vec<SourcedEntry<BilingualEntry>>,
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub external_contents: Vec<ExternalContent>,
    pub synonym_entries: Vec<SynonymEntry>,
}

pub fn collect_results(results: &[QueryStepResult]) -> CollectedResults {
    CollectedResults {
        bilingual_entries: collect_bilingual_entries(results),
        monolingual_entries: collect_monolingual_entries(results),
        similar_recommendations: collect_similar_recommendations(results),
        external_contents: collect_external_contents(results),
        synonym_entries: collect_synonym_entries(results),
    }
}

/// Bilingual entries, each tagged with the engine that produced it.
pub fn collect_bilingual_entries(results: &[QueryStepResult]) -> Vec<SourcedEntry<BilingualEntry>> {
    results
        .iter()
        .flat_map(|result| {
            let engine_id = result.step.engine_id();
            result
                .result
                .bilingual_entries()
                .iter()
                .map(move |entry| SourcedEntry::new(entry.clone(), engine_id))
        })
        .collect()
}

/// Entries of monolingual results only; bilingual results contribute none.
pub fn collect_monolingual_entries(results: &[QueryStepResult]) -> Vec<MonolingualEntry> {
    results
        .iter()
        .flat_map(|result| result.result.monolingual_entries().iter().cloned())
        .collect()
}

pub fn collect_similar_recommendations(results: &[QueryStepResult]) -> Vec<DictionaryObject> {
    results
        .iter()
        .flat_map(|result| result.result.similar_recommendations().iter().cloned())
        .collect()
}

pub fn collect_external_contents(results: &[QueryStepResult]) -> Vec<ExternalContent> {
    results
        .iter()
        .flat_map(|result| result.result.external_contents().iter().cloned())
        .collect()
}

pub fn collect_synonym_entries(results: &[QueryStepResult]) -> Vec<SynonymEntry> {
    results
        .iter()
        .flat_map(|result| result.result.synonym_entries().iter().cloned())
        .collect()
}
