use super::search_engine::SearchEngine;
use crate::entry::{
    BilingualEntry, BilingualQueryResult, DictionaryObject, EngineQueryResult, EntryType,
    MonolingualEntry, MonolingualQueryResult,
};
use crate::language::Language;

use async_trait::async_trait;

/// Engine that answers every lookup with the same canned entry. Used by the bootstrap binary
/// and as a smoke-test backend.
#[derive(Debug, Default, Clone)]
pub struct DummyEngine;

impl DummyEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SearchEngine for DummyEngine {
    async fn execute_bilingual_query(
        &self,
        _query: &str,
        input_language: &Language,
        output_language: &Language,
        _allow_both_way: bool,
    ) -> anyhow::Result<EngineQueryResult> {
        let entry = BilingualEntry::new(
            DictionaryObject::new(input_language.clone(), "foo"),
            DictionaryObject::new(output_language.clone(), "bar"),
            EntryType::Noun,
        );

        Ok(BilingualQueryResult {
            bilingual_entries: vec![entry],
            ..Default::default()
        }
        .into())
    }

    async fn execute_monolingual_query(
        &self,
        _query: &str,
        language: &Language,
    ) -> anyhow::Result<EngineQueryResult> {
        let entry = MonolingualEntry::new(
            DictionaryObject::new(language.clone(), "foo").with_description("placeholder entry"),
            EntryType::Noun,
        );

        Ok(MonolingualQueryResult {
            monolingual_entries: vec![entry],
            ..Default::default()
        }
        .into())
    }
}
