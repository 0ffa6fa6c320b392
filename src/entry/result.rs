use super::entries::{BilingualEntry, ExternalContent, MonolingualEntry, SynonymEntry};
use super::object::DictionaryObject;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BilingualQueryResult {
    pub bilingual_entries: Vec<BilingualEntry>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub external_contents: Vec<ExternalContent>,
    pub synonym_entries: Vec<SynonymEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonolingualQueryResult {
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub external_contents: Vec<ExternalContent>,
    pub synonym_entries: Vec<SynonymEntry>,
}

/// What one engine returned for one query step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineQueryResult {
    Bilingual(BilingualQueryResult),
    Monolingual(MonolingualQueryResult),
}

impl EngineQueryResult {
    /// Sentinel used for failed steps: a bilingual result with nothing in it.
    pub fn empty() -> Self {
        EngineQueryResult::Bilingual(BilingualQueryResult::default())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EngineQueryResult::Bilingual(result) => {
                result.bilingual_entries.is_empty()
                    && result.similar_recommendations.is_empty()
                    && result.external_contents.is_empty()
                    && result.synonym_entries.is_empty()
            }
            EngineQueryResult::Monolingual(result) => {
                result.monolingual_entries.is_empty()
                    && result.similar_recommendations.is_empty()
                    && result.external_contents.is_empty()
                    && result.synonym_entries.is_empty()
            }
        }
    }

    pub fn bilingual_entries(&self) -> &[BilingualEntry] {
        match self {
            EngineQueryResult::Bilingual(result) => &result.bilingual_entries,
            EngineQueryResult::Monolingual(_) => &[],
        }
    }

    pub fn monolingual_entries(&self) -> &[MonolingualEntry] {
        match self {
            EngineQueryResult::Bilingual(_) => &[],
            EngineQueryResult::Monolingual(result) => &result.monolingual_entries,
        }
    }

    pub fn similar_recommendations(&self) -> &[DictionaryObject] {
        match self {
            EngineQueryResult::Bilingual(result) => &result.similar_recommendations,
            EngineQueryResult::Monolingual(result) => &result.similar_recommendations,
        }
    }

    pub fn external_contents(&self) -> &[ExternalContent] {
        match self {
            EngineQueryResult::Bilingual(result) => &result.external_contents,
            EngineQueryResult::Monolingual(result) => &result.external_contents,
        }
    }

    pub fn synonym_entries(&self) -> &[SynonymEntry] {
        match self {
            EngineQueryResult::Bilingual(result) => &result.synonym_entries,
            EngineQueryResult::Monolingual(result) => &result.synonym_entries,
        }
    }
}

impl From<BilingualQueryResult> for EngineQueryResult {
    fn from(result: BilingualQueryResult) -> Self {
        EngineQueryResult::Bilingual(result)
    }
}

impl From<MonolingualQueryResult> for EngineQueryResult {
    fn from(result: MonolingualQueryResult) -> Self {
        EngineQueryResult::Monolingual(result)
    }
}
