use serde::{Deserialize, Serialize};
use std::fmt;

/// Word class of an entry. `Unknown` marks entries whose engine did not classify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    OtherWord,
    Unknown,
    Phrase,
    Example,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Pronoun,
    Interjection,
    Conjunction,
}

impl EntryType {
    pub const ALL: [EntryType; 12] = [
        EntryType::OtherWord,
        EntryType::Unknown,
        EntryType::Phrase,
        EntryType::Example,
        EntryType::Noun,
        EntryType::Verb,
        EntryType::Adjective,
        EntryType::Adverb,
        EntryType::Preposition,
        EntryType::Pronoun,
        EntryType::Interjection,
        EntryType::Conjunction,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EntryType::OtherWord => "Other word",
            EntryType::Unknown => "Unknown",
            EntryType::Phrase => "Phrase",
            EntryType::Example => "Example",
            EntryType::Noun => "Noun",
            EntryType::Verb => "Verb",
            EntryType::Adjective => "Adjective",
            EntryType::Adverb => "Adverb",
            EntryType::Preposition => "Preposition",
            EntryType::Pronoun => "Pronoun",
            EntryType::Interjection => "Interjection",
            EntryType::Conjunction => "Conjunction",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EntryType::Unknown)
    }

    /// Every classified type, in declaration order.
    pub fn known_types() -> impl Iterator<Item = EntryType> {
        Self::ALL.into_iter().filter(|entry_type| !entry_type.is_unknown())
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrammaticalGender {
    Masculine,
    Feminine,
    Neuter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrammaticalNumber {
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrammaticalCase {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    IndefiniteForm,
    DefiniteForm,
}

impl GrammaticalGender {
    pub fn form_identifier(&self) -> &'static str {
        match self {
            GrammaticalGender::Masculine => "masculine",
            GrammaticalGender::Feminine => "feminine",
            GrammaticalGender::Neuter => "neuter",
        }
    }
}

impl GrammaticalNumber {
    pub fn form_identifier(&self) -> &'static str {
        match self {
            GrammaticalNumber::Singular => "singular",
            GrammaticalNumber::Plural => "plural",
        }
    }
}

impl GrammaticalCase {
    pub fn form_identifier(&self) -> &'static str {
        match self {
            GrammaticalCase::Nominative => "nominative",
            GrammaticalCase::Genitive => "genitive",
            GrammaticalCase::Dative => "dative",
            GrammaticalCase::Accusative => "accusative",
            GrammaticalCase::IndefiniteForm => "indefinite_form",
            GrammaticalCase::DefiniteForm => "definite_form",
        }
    }
}

/// Tag for an inflected form, e.g. `"genitive plural"`. Serialized as its plain identifier
/// so it can be used as a JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrammaticalForm(String);

impl GrammaticalForm {
    pub fn new(identifier: &str) -> Self {
        Self(identifier.trim().to_lowercase())
    }

    /// Combines case, number and gender into one tag; `None` when all three are absent.
    pub fn noun(
        case: Option<GrammaticalCase>,
        number: Option<GrammaticalNumber>,
        gender: Option<GrammaticalGender>,
    ) -> Option<Self> {
        let parts: Vec<&str> = [
            case.map(|c| c.form_identifier()),
            number.map(|n| n.form_identifier()),
            gender.map(|g| g.form_identifier()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(Self(parts.join(" ")))
        }
    }

    pub fn form_identifier(&self) -> &str {
        &self.0
    }
}

impl From<GrammaticalCase> for GrammaticalForm {
    fn from(case: GrammaticalCase) -> Self {
        Self(case.form_identifier().to_string())
    }
}

impl fmt::Display for GrammaticalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
