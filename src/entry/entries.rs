use super::object::DictionaryObject;
use super::types::EntryType;

use serde::{Deserialize, Serialize};

/// A translation pair. `source` and `target` always carry different languages once an
/// engine has produced them, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilingualEntry {
    pub source: DictionaryObject,
    pub target: DictionaryObject,
    pub entry_type: EntryType,
}

impl BilingualEntry {
    pub fn new(source: DictionaryObject, target: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            source,
            target,
            entry_type,
        }
    }

    /// Same entry with source and target swapped.
    pub fn inverted(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            entry_type: self.entry_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonolingualEntry {
    pub content: DictionaryObject,
    pub entry_type: EntryType,
}

impl MonolingualEntry {
    pub fn new(content: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            content,
            entry_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub base_meaning: DictionaryObject,
    pub synonyms: Vec<DictionaryObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub base_object: DictionaryObject,
    pub synonym_groups: Vec<SynonymGroup>,
}

/// Non-dictionary content an engine found for the query, e.g. a wiki article.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalContent {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
}
