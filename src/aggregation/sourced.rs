use super::merge::MergeableEntry;
use crate::entry::{DictionaryObject, EntryType};

use serde::{Deserialize, Serialize};

/// An entry together with the ids of the engines that produced it. Merging two sourced
/// entries unions their engine lists in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedEntry<T> {
    pub entry: T,
    pub engines: Vec<String>,
}

impl<T> SourcedEntry<T> {
    pub fn new(entry: T, engine_id: &str) -> Self {
        Self {
            entry,
            engines: vec![engine_id.to_string()],
        }
    }
}

impl<T: MergeableEntry> MergeableEntry for SourcedEntry<T> {
    fn entry_type(&self) -> EntryType {
        self.entry.entry_type()
    }

    fn with_entry_type(self, entry_type: EntryType) -> Self {
        Self {
            entry: self.entry.with_entry_type(entry_type),
            engines: self.engines,
        }
    }

    fn source_object(&self) -> &DictionaryObject {
        self.entry.source_object()
    }

    fn target_object(&self) -> Option<&DictionaryObject> {
        self.entry.target_object()
    }

    fn inverted(self) -> Self {
        Self {
            entry: self.entry.inverted(),
            engines: self.engines,
        }
    }

    fn merge_candidates(first: Self, rest: Vec<Self>) -> Self {
        let mut engines = first.engines;
        let mut entries = Vec::with_capacity(rest.len());
        for candidate in rest {
            for engine in candidate.engines {
                if !engines.contains(&engine) {
                    engines.push(engine);
                }
            }
            entries.push(candidate.entry);
        }

        Self {
            entry: T::merge_candidates(first.entry, entries),
            engines,
        }
    }
}
