//! Ordering of grouped entries.

use super::distance::levenshtein_ignore_case;
use super::group::ResultGroup;
use super::sourced::SourcedEntry;
use crate::entry::{BilingualEntry, MonolingualEntry};

use serde::{Deserialize, Serialize};

/// A merged entry with its relevance score in `[0, 1]` and contributing engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub entry: BilingualEntry,
    pub score: f64,
    pub engines: Vec<String>,
}

impl ResultEntry {
    /// Scores outside `[0, 1]` are clamped; NaN becomes 0.
    pub fn new(sourced: SourcedEntry<BilingualEntry>, score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        Self {
            entry: sourced.entry,
            score,
            engines: sourced.engines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Closest to the query string first.
    #[default]
    Relevance,
    /// Keep the merge order.
    Passthrough,
}

impl OrderType {
    pub fn strategy(&self) -> &'static dyn OrderStrategy {
        match self {
            OrderType::Relevance => &LevenshteinRelevanceOrderStrategy,
            OrderType::Passthrough => &PassthroughOrderStrategy,
        }
    }
}

/// Reorders the entries inside each group; the groups themselves keep their order.
pub trait OrderStrategy: Send + Sync {
    fn sort_group(
        &self,
        group: ResultGroup<SourcedEntry<BilingualEntry>>,
        query: &str,
    ) -> ResultGroup<ResultEntry>;

    fn sort_groups(
        &self,
        groups: Vec<ResultGroup<SourcedEntry<BilingualEntry>>>,
        query: &str,
    ) -> Vec<ResultGroup<ResultEntry>> {
        groups
            .into_iter()
            .map(|group| self.sort_group(group, query))
            .collect()
    }
}

pub struct LevenshteinRelevanceOrderStrategy;

impl LevenshteinRelevanceOrderStrategy {
    /// `1 - d / (1 + d)` where `d` is the smaller case-insensitive edit distance between the
    /// query and either general form.
    pub fn score(entry: &BilingualEntry, query: &str) -> f64 {
        let distance = levenshtein_ignore_case(&entry.source.general_form, query)
            .min(levenshtein_ignore_case(&entry.target.general_form, query));
        let distance = distance as f64;
        1.0 - distance / (1.0 + distance)
    }
}

impl OrderStrategy for LevenshteinRelevanceOrderStrategy {
    fn sort_group(
        &self,
        group: ResultGroup<SourcedEntry<BilingualEntry>>,
        query: &str,
    ) -> ResultGroup<ResultEntry> {
        let mut scored: Vec<ResultEntry> = group
            .entries
            .into_iter()
            .map(|sourced| {
                let score = Self::score(&sourced.entry, query);
                ResultEntry::new(sourced, score)
            })
            .collect();
        // Stable, so equal scores keep their merge order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        ResultGroup {
            identifier: group.identifier,
            entries: scored,
        }
    }
}

pub struct PassthroughOrderStrategy;

impl OrderStrategy for PassthroughOrderStrategy {
    fn sort_group(
        &self,
        group: ResultGroup<SourcedEntry<BilingualEntry>>,
        _query: &str,
    ) -> ResultGroup<ResultEntry> {
        ResultGroup {
            identifier: group.identifier,
            entries: group
                .entries
                .into_iter()
                .map(|sourced| ResultEntry::new(sourced, 1.0))
                .collect(),
        }
    }
}

/// Sorts monolingual entries by ascending edit distance to the query, stable on ties.
pub fn order_monolingual_entries(
    mut entries: Vec<MonolingualEntry>,
    query: &str,
) -> Vec<MonolingualEntry> {
    entries.sort_by_cached_key(|entry| levenshtein_ignore_case(&entry.content.general_form, query));
    entries
}
