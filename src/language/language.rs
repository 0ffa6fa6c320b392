//! Interned language values.
//!
//! A `Language` is a cheap, clonable handle. Two handles are equal when their identifier and
//! dialect match; the display names are descriptive only. Handles are interned by their
//! lowercased `identifier_with_dialect` so repeated lookups share one allocation.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+(_[A-Za-z]+)?$").expect("Invalid language identifier regex pattern")
});

/// Languages that exist before anything else is registered.
const PREDEFINED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("cn", "Chinese"),
    ("ru", "Russian"),
    ("no", "Norwegian"),
    ("sv", "Swedish"),
    ("fi", "Finnish"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("pl", "Polish"),
];

/// (language, dialect, dialect display name)
const PREDEFINED_DIALECTS: &[(&str, &str, &str)] =
    &[("no", "bo", "Bokmål"), ("no", "ny", "Nynorsk")];

static LANGUAGE_CACHE: Lazy<DashMap<String, Language>> = Lazy::new(|| {
    let cache = DashMap::new();
    for (identifier, display_name) in PREDEFINED_LANGUAGES {
        let language = Language::build(identifier, None, display_name, None);
        cache.insert(language.identifier_with_dialect(), language);
    }
    for (identifier, dialect, dialect_display_name) in PREDEFINED_DIALECTS {
        let display_name = PREDEFINED_LANGUAGES
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, name)| *name)
            .unwrap_or(*identifier);
        let language = Language::build(
            identifier,
            Some(*dialect),
            display_name,
            Some(*dialect_display_name),
        );
        cache.insert(language.identifier_with_dialect(), language);
    }
    cache
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("invalid language identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid dictionary query: '{0}'")]
    InvalidDictionaryQuery(String),
}

#[derive(Debug)]
struct LanguageInner {
    identifier: String,
    dialect: Option<String>,
    display_name: String,
    dialect_display_name: Option<String>,
}

#[derive(Clone)]
pub struct Language(Arc<LanguageInner>);

impl Language {
    pub fn english() -> Self {
        Self::predefined("en")
    }

    pub fn german() -> Self {
        Self::predefined("de")
    }

    pub fn french() -> Self {
        Self::predefined("fr")
    }

    pub fn spanish() -> Self {
        Self::predefined("es")
    }

    pub fn italian() -> Self {
        Self::predefined("it")
    }

    pub fn chinese() -> Self {
        Self::predefined("cn")
    }

    pub fn russian() -> Self {
        Self::predefined("ru")
    }

    pub fn norwegian() -> Self {
        Self::predefined("no")
    }

    pub fn norwegian_bokmal() -> Self {
        Self::predefined("no_bo")
    }

    pub fn norwegian_nynorsk() -> Self {
        Self::predefined("no_ny")
    }

    pub fn swedish() -> Self {
        Self::predefined("sv")
    }

    pub fn finnish() -> Self {
        Self::predefined("fi")
    }

    pub fn turkish() -> Self {
        Self::predefined("tr")
    }

    pub fn dutch() -> Self {
        Self::predefined("nl")
    }

    pub fn portuguese() -> Self {
        Self::predefined("pt")
    }

    pub fn polish() -> Self {
        Self::predefined("pl")
    }

    /// Looks up a language by its identifier, e.g. `"de"` or `"no_bo"`.
    ///
    /// Unknown but well-formed identifiers are interned on the fly, using the identifier
    /// itself as display name (or the parent's display name for dialects).
    pub fn by_id(identifier: &str) -> Result<Self, LanguageError> {
        let key = Self::validate(identifier)?;
        if let Some(existing) = LANGUAGE_CACHE.get(&key) {
            return Ok(existing.clone());
        }

        let (language, dialect) = match key.split_once('_') {
            Some((language, dialect)) => (language, Some(dialect)),
            None => (key.as_str(), None),
        };
        let display_name = match dialect {
            Some(_) => Self::by_id(language)?.display_name().to_string(),
            None => language.to_string(),
        };

        Ok(Self::intern(language, dialect, &display_name, dialect))
    }

    /// Registers a language without dialect. If the identifier is already known, the existing
    /// handle (and its display name) wins.
    pub fn for_simple_language(identifier: &str, display_name: &str) -> Result<Self, LanguageError> {
        let key = Self::validate(identifier)?;
        if key.contains('_') {
            return Err(LanguageError::InvalidIdentifier(identifier.to_string()));
        }
        Ok(Self::intern(&key, None, display_name, None))
    }

    pub fn for_dialect(
        identifier: &str,
        dialect: &str,
        display_name: &str,
        dialect_display_name: &str,
    ) -> Result<Self, LanguageError> {
        let key = Self::validate(&format!("{}_{}", identifier, dialect))?;
        let (language, dialect) = key
            .split_once('_')
            .ok_or_else(|| LanguageError::InvalidIdentifier(key.clone()))?;
        Ok(Self::intern(
            language,
            Some(dialect),
            display_name,
            Some(dialect_display_name),
        ))
    }

    pub fn identifier(&self) -> &str {
        &self.0.identifier
    }

    pub fn dialect(&self) -> Option<&str> {
        self.0.dialect.as_deref()
    }

    pub fn display_name(&self) -> &str {
        &self.0.display_name
    }

    pub fn dialect_display_name(&self) -> Option<&str> {
        self.0.dialect_display_name.as_deref()
    }

    pub fn identifier_with_dialect(&self) -> String {
        match &self.0.dialect {
            Some(dialect) => format!("{}_{}", self.0.identifier, dialect),
            None => self.0.identifier.clone(),
        }
    }

    /// The parent language, or `self` when there is no dialect.
    pub fn without_dialect(&self) -> Self {
        if self.0.dialect.is_none() {
            return self.clone();
        }
        LANGUAGE_CACHE
            .get(&self.0.identifier)
            .map(|language| language.clone())
            .unwrap_or_else(|| {
                Self::intern(&self.0.identifier, None, &self.0.display_name, None)
            })
    }

    fn validate(identifier: &str) -> Result<String, LanguageError> {
        let key = identifier.trim().to_lowercase();
        if IDENTIFIER_PATTERN.is_match(&key) {
            Ok(key)
        } else {
            Err(LanguageError::InvalidIdentifier(identifier.to_string()))
        }
    }

    fn predefined(key: &str) -> Self {
        LANGUAGE_CACHE
            .get(key)
            .map(|language| language.clone())
            .unwrap_or_else(|| Self::build(key, None, key, None))
    }

    fn intern(
        identifier: &str,
        dialect: Option<&str>,
        display_name: &str,
        dialect_display_name: Option<&str>,
    ) -> Self {
        let candidate = Self::build(identifier, dialect, display_name, dialect_display_name);
        LANGUAGE_CACHE
            .entry(candidate.identifier_with_dialect())
            .or_insert(candidate)
            .clone()
    }

    fn build(
        identifier: &str,
        dialect: Option<&str>,
        display_name: &str,
        dialect_display_name: Option<&str>,
    ) -> Self {
        Self(Arc::new(LanguageInner {
            identifier: identifier.to_lowercase(),
            dialect: dialect.map(str::to_lowercase),
            display_name: display_name.to_string(),
            dialect_display_name: dialect_display_name.map(str::to_string),
        }))
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.identifier == other.0.identifier && self.0.dialect == other.0.dialect)
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.identifier.hash(state);
        self.0.dialect.hash(state);
    }
}

impl PartialOrd for Language {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Language {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .identifier
            .cmp(&other.0.identifier)
            .then_with(|| self.0.dialect.cmp(&other.0.dialect))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier_with_dialect())
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language({})", self.identifier_with_dialect())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.identifier_with_dialect())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        Language::by_id(&identifier).map_err(D::Error::custom)
    }
}
