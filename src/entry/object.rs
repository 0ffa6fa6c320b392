use super::types::{GrammaticalForm, GrammaticalGender};
use crate::language::Language;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single-language word or phrase plus the annotations an engine could provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryObject {
    pub language: Language,
    pub general_form: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub grammatical_gender: Option<GrammaticalGender>,
    #[serde(default)]
    pub additional_forms: BTreeMap<GrammaticalForm, String>,
    #[serde(default)]
    pub meanings: Vec<String>,
    #[serde(default)]
    pub syllabification: Vec<String>,
    #[serde(default)]
    pub alternate_forms: Vec<String>,
}

impl DictionaryObject {
    pub fn new(language: Language, general_form: &str) -> Self {
        Self {
            language,
            general_form: general_form.to_string(),
            description: None,
            domain: None,
            abbreviation: None,
            pronunciation: None,
            grammatical_gender: None,
            additional_forms: BTreeMap::new(),
            meanings: Vec::new(),
            syllabification: Vec::new(),
            alternate_forms: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub fn with_abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviation = Some(abbreviation.to_string());
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: &str) -> Self {
        self.pronunciation = Some(pronunciation.to_string());
        self
    }

    pub fn with_gender(mut self, gender: GrammaticalGender) -> Self {
        self.grammatical_gender = Some(gender);
        self
    }

    pub fn with_additional_form(mut self, form: GrammaticalForm, value: &str) -> Self {
        self.additional_forms.insert(form, value.to_string());
        self
    }

    pub fn with_meaning(mut self, meaning: &str) -> Self {
        self.meanings.push(meaning.to_string());
        self
    }

    pub fn with_syllabification(mut self, syllables: &[&str]) -> Self {
        self.syllabification = syllables.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_alternate_form(mut self, alternate: &str) -> Self {
        self.alternate_forms.push(alternate.to_string());
        self
    }
}
