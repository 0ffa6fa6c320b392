//! Grouping of merged bilingual entries.

use super::sourced::SourcedEntry;
use crate::entry::{BilingualEntry, EntryType};
use crate::language::Language;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

pub const ALL_ENTRIES_GROUP: &str = "All bilingual entries";

/// A titled list of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup<T> {
    pub identifier: String,
    pub entries: Vec<T>,
}

impl<T> ResultGroup<T> {
    pub fn new(identifier: &str, entries: Vec<T>) -> Self {
        Self {
            identifier: identifier.to_string(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupingType {
    /// One group holding everything.
    #[default]
    None,
    /// One group per word class.
    EntryType,
    /// One group per language pair.
    Dictionary,
}

impl GroupingType {
    pub fn strategy(&self) -> &'static dyn GroupingStrategy {
        match self {
            GroupingType::None => &NoneGroupingStrategy,
            GroupingType::EntryType => &EntryTypeGroupingStrategy,
            GroupingType::Dictionary => &DictionaryGroupingStrategy,
        }
    }
}

/// Partitions entries into groups. Every input entry lands in exactly one group, and groups
/// keep the relative order of their entries. Empty groups are never produced.
pub trait GroupingStrategy: Send + Sync {
    fn group_entries(
        &self,
        entries: Vec<SourcedEntry<BilingualEntry>>,
    ) -> Vec<ResultGroup<SourcedEntry<BilingualEntry>>>;
}

pub struct NoneGroupingStrategy;

impl GroupingStrategy for NoneGroupingStrategy {
    fn group_entries(
        &self,
        entries: Vec<SourcedEntry<BilingualEntry>>,
    ) -> Vec<ResultGroup<SourcedEntry<BilingualEntry>>> {
        if entries.is_empty() {
            return Vec::new();
        }
        vec![ResultGroup::new(ALL_ENTRIES_GROUP, entries)]
    }
}

pub struct EntryTypeGroupingStrategy;

impl EntryTypeGroupingStrategy {
    pub fn group_identifier(entry_type: EntryType) -> String {
        match entry_type {
            EntryType::Unknown => "Unknown".to_string(),
            other => format!("{}s", other.display_name()),
        }
    }
}

impl GroupingStrategy for EntryTypeGroupingStrategy {
    fn group_entries(
        &self,
        entries: Vec<SourcedEntry<BilingualEntry>>,
    ) -> Vec<ResultGroup<SourcedEntry<BilingualEntry>>> {
        group_by_key(entries, |entry| entry.entry.entry_type, |entry_type| {
            Self::group_identifier(*entry_type)
        })
    }
}

pub struct DictionaryGroupingStrategy;

impl DictionaryGroupingStrategy {
    pub fn group_identifier(source: &Language, target: &Language) -> String {
        format!("{} - {}", display_label(source), display_label(target))
    }
}

impl GroupingStrategy for DictionaryGroupingStrategy {
    fn group_entries(
        &self,
        entries: Vec<SourcedEntry<BilingualEntry>>,
    ) -> Vec<ResultGroup<SourcedEntry<BilingualEntry>>> {
        group_by_key(
            entries,
            |entry| {
                (
                    entry.entry.source.language.clone(),
                    entry.entry.target.language.clone(),
                )
            },
            |(source, target)| Self::group_identifier(source, target),
        )
    }
}

fn display_label(language: &Language) -> String {
    match language.dialect_display_name() {
        Some(dialect) => format!("{} ({})", language.display_name(), dialect),
        None => language.display_name().to_string(),
    }
}

/// Buckets entries by `key` in first-seen order.
fn group_by_key<T, K, F, N>(entries: Vec<T>, key: F, name: N) -> Vec<ResultGroup<T>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    N: Fn(&K) -> String,
{
    let mut groups: Vec<ResultGroup<T>> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for entry in entries {
        let bucket = key(&entry);
        match index.get(&bucket) {
            Some(&position) => groups[position].entries.push(entry),
            None => {
                groups.push(ResultGroup::new(&name(&bucket), vec![entry]));
                index.insert(bucket, groups.len() - 1);
            }
        }
    }

    groups
}
