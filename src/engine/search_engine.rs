use crate::entry::EngineQueryResult;
use crate::language::{BilingualDictionary, Language};

use async_trait::async_trait;

/// A dictionary backend. Implementations must tolerate concurrent calls.
///
/// Engines report failures through `anyhow::Error`; the execution layer turns them into failed
/// step results and never lets them escape the query.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn execute_bilingual_query(
        &self,
        query: &str,
        input_language: &Language,
        output_language: &Language,
        allow_both_way: bool,
    ) -> anyhow::Result<EngineQueryResult>;

    async fn execute_monolingual_query(
        &self,
        _query: &str,
        language: &Language,
    ) -> anyhow::Result<EngineQueryResult> {
        Err(anyhow::anyhow!(
            "monolingual lookups in {} are not supported by this engine",
            language
        ))
    }
}

/// What an engine declares it can serve when it is registered.
#[derive(Debug, Clone, Default)]
pub struct EngineCapabilities {
    pub dictionaries: Vec<BilingualDictionary>,
    pub monolingual_languages: Vec<Language>,
}

impl EngineCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, dictionary: BilingualDictionary) -> Self {
        self.dictionaries.push(dictionary);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.monolingual_languages.push(language);
        self
    }
}
