//! Test utilities shared by the module test suites.
//!
//! Provides a scriptable `FakeEngine` and small builders for entries and results.
//! Only compiled when running tests.

use crate::engine::SearchEngine;
use crate::entry::{
    BilingualEntry, BilingualQueryResult, DictionaryObject, EngineQueryResult, EntryType,
    MonolingualEntry, MonolingualQueryResult,
};
use crate::language::Language;

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Engine with a fixed answer, an optional failure and an optional delay. Counts its calls.
pub struct FakeEngine {
    calls: AtomicUsize,
    result: EngineQueryResult,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl FakeEngine {
    pub fn returning(result: EngineQueryResult) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            result,
            failure: None,
            delay: None,
        }
    }

    pub fn with_entries(entries: Vec<BilingualEntry>) -> Self {
        Self::returning(bilingual_result(entries))
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::returning(EngineQueryResult::empty())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self) -> anyhow::Result<EngineQueryResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(self.result.clone()),
        }
    }
}

#[async_trait]
impl SearchEngine for FakeEngine {
    async fn execute_bilingual_query(
        &self,
        _query: &str,
        _input_language: &Language,
        _output_language: &Language,
        _allow_both_way: bool,
    ) -> anyhow::Result<EngineQueryResult> {
        self.answer().await
    }

    async fn execute_monolingual_query(
        &self,
        _query: &str,
        _language: &Language,
    ) -> anyhow::Result<EngineQueryResult> {
        self.answer().await
    }
}

pub fn object(language: Language, general_form: &str) -> DictionaryObject {
    DictionaryObject::new(language, general_form)
}

pub fn de_en(german: &str, english: &str, entry_type: EntryType) -> BilingualEntry {
    BilingualEntry::new(
        object(Language::german(), german),
        object(Language::english(), english),
        entry_type,
    )
}

pub fn bilingual_result(entries: Vec<BilingualEntry>) -> EngineQueryResult {
    BilingualQueryResult {
        bilingual_entries: entries,
        ..Default::default()
    }
    .into()
}

pub fn monolingual_result(entries: Vec<MonolingualEntry>) -> EngineQueryResult {
    MonolingualQueryResult {
        monolingual_entries: entries,
        ..Default::default()
    }
    .into()
}
