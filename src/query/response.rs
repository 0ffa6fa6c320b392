use super::statistics::QueryPerformanceStatistics;
use crate::aggregation::{GroupingType, ResultEntry, ResultGroup};
use crate::entry::{DictionaryObject, ExternalContent, MonolingualEntry, SynonymEntry};

use serde::Serialize;
use uuid::Uuid;

/// The assembled answer to one `QueryRequest`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub request_id: Uuid,
    pub query_string: String,
    pub statistics: QueryPerformanceStatistics,
    pub grouping_type: GroupingType,
    pub grouped_bilingual_results: Vec<ResultGroup<ResultEntry>>,
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub synonym_entries: Vec<SynonymEntry>,
    pub external_contents: Vec<ExternalContent>,
    pub similar_recommendations: Vec<DictionaryObject>,
}

impl QueryResponse {
    /// Every bilingual entry across all groups, in group order.
    pub fn bilingual_entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.grouped_bilingual_results
            .iter()
            .flat_map(|group| group.entries.iter())
    }

    pub fn bilingual_entry_count(&self) -> usize {
        self.grouped_bilingual_results.iter().map(ResultGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bilingual_entry_count() == 0
            && self.monolingual_entries.is_empty()
            && self.synonym_entries.is_empty()
            && self.external_contents.is_empty()
            && self.similar_recommendations.is_empty()
    }
}
