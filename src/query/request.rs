use crate::aggregation::{GroupingType, OrderType};
use crate::error::QueryError;
use crate::language::{BilingualDictionary, Language};

use serde::{Deserialize, Serialize};

/// What the caller wants looked up. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    query_string: String,
    bilingual_dictionaries: Vec<BilingualDictionary>,
    monolingual_languages: Vec<Language>,
    grouping: GroupingType,
    ordering: OrderType,
}

impl QueryRequest {
    pub fn builder(query_string: &str) -> QueryRequestBuilder {
        QueryRequestBuilder::new(query_string)
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn bilingual_dictionaries(&self) -> &[BilingualDictionary] {
        &self.bilingual_dictionaries
    }

    pub fn monolingual_languages(&self) -> &[Language] {
        &self.monolingual_languages
    }

    pub fn grouping(&self) -> GroupingType {
        self.grouping
    }

    pub fn ordering(&self) -> OrderType {
        self.ordering
    }

    /// Checks a request that did not come through the builder (e.g. one deserialized from JSON).
///
/// Any query string is accepted, the empty one included. Engines decide what it matches.
    pub fn validate(&self) -> Result<(), QueryError> {
        if let Some(invalid) = self
            .bilingual_dictionaries
            .iter()
            .find(|dictionary| dictionary.source() == dictionary.target())
        {
            return Err(QueryError::InvalidRequest(format!(
                "dictionary {} uses the same language on both sides",
                invalid
            )));
        }
        Ok(())
    }
}

/// Builder for `QueryRequest`. Targets are de-duplicated in first-seen order.
#[derive(Debug, Clone)]
pub struct QueryRequestBuilder {
    query_string: String,
    bilingual_dictionaries: Vec<BilingualDictionary>,
    monolingual_languages: Vec<Language>,
    grouping: GroupingType,
    ordering: OrderType,
}

impl QueryRequestBuilder {
    pub fn new(query_string: &str) -> Self {
        Self {
            query_string: query_string.to_string(),
            bilingual_dictionaries: Vec::new(),
            monolingual_languages: Vec::new(),
            grouping: GroupingType::default(),
            ordering: OrderType::default(),
        }
    }

    pub fn dictionary(mut self, dictionary: BilingualDictionary) -> Self {
        if !self.bilingual_dictionaries.contains(&dictionary) {
            self.bilingual_dictionaries.push(dictionary);
        }
        self
    }

    pub fn dictionaries(self, dictionaries: impl IntoIterator<Item = BilingualDictionary>) -> Self {
        dictionaries
            .into_iter()
            .fold(self, |builder, dictionary| builder.dictionary(dictionary))
    }

    pub fn monolingual_language(mut self, language: Language) -> Self {
        if !self.monolingual_languages.contains(&language) {
            self.monolingual_languages.push(language);
        }
        self
    }

    pub fn grouping(mut self, grouping: GroupingType) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn ordering(mut self, ordering: OrderType) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn build(self) -> Result<QueryRequest, QueryError> {
        let request = QueryRequest {
            query_string: self.query_string,
            bilingual_dictionaries: self.bilingual_dictionaries,
            monolingual_languages: self.monolingual_languages,
            grouping: self.grouping,
            ordering: self.ordering,
        };
        request.validate()?;
        Ok(request)
    }
}
