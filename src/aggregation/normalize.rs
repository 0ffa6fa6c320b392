//! General-form normalization.
//!
//! Before candidates are compared, their general forms are folded into a canonical shape
//! that depends on language and word class (English verbs get a leading "to ", Norwegian
//! verbs a leading "å "). Lookup falls back from a dialect to its parent language.

use crate::entry::EntryType;
use crate::language::Language;

use std::collections::HashMap;
use std::sync::Arc;

pub trait Normalizer: Send + Sync {
    fn language(&self) -> Language;

    fn entry_type(&self) -> EntryType;

    /// Rewrites an already trimmed, lowercased general form.
    fn normalize(&self, input: &str) -> String;
}

/// Prepends `prefix` unless the form already starts with it.
#[derive(Debug, Clone)]
pub struct PrefixNormalizer {
    language: Language,
    entry_type: EntryType,
    prefix: &'static str,
}

impl PrefixNormalizer {
    pub fn new(language: Language, entry_type: EntryType, prefix: &'static str) -> Self {
        Self {
            language,
            entry_type,
            prefix,
        }
    }

    pub fn english_verbs() -> Self {
        Self::new(Language::english(), EntryType::Verb, "to ")
    }

    pub fn norwegian_verbs() -> Self {
        Self::new(Language::norwegian(), EntryType::Verb, "å ")
    }
}

impl Normalizer for PrefixNormalizer {
    fn language(&self) -> Language {
        self.language.clone()
    }

    fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    fn normalize(&self, input: &str) -> String {
        if input.starts_with(self.prefix) {
            input.to_string()
        } else {
            format!("{}{}", self.prefix, input)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizerError {
    #[error("A normalizer for {entry_type} in {language} is already registered")]
    Duplicate { language: String, entry_type: EntryType },
}

pub struct NormalizationService {
    normalizers: HashMap<(Language, EntryType), Arc<dyn Normalizer>>,
}

impl NormalizationService {
    pub fn empty() -> Self {
        Self {
            normalizers: HashMap::new(),
        }
    }

    /// English and Norwegian verb normalizers.
    pub fn with_defaults() -> Self {
        let mut service = Self::empty();
        for normalizer in [
            PrefixNormalizer::english_verbs(),
            PrefixNormalizer::norwegian_verbs(),
        ] {
            // Distinct (language, type) pairs, cannot collide
            let _ = service.register(Arc::new(normalizer));
        }
        service
    }

    pub fn register(&mut self, normalizer: Arc<dyn Normalizer>) -> Result<(), NormalizerError> {
        let key = (normalizer.language(), normalizer.entry_type());
        if self.normalizers.contains_key(&key) {
            return Err(NormalizerError::Duplicate {
                language: key.0.identifier_with_dialect(),
                entry_type: key.1,
            });
        }
        tracing::debug!("Registered normalizer for {} {}", key.0, key.1);
        self.normalizers.insert(key, normalizer);
        Ok(())
    }

    /// Trims and lowercases `input`, then applies the normalizer registered for
    /// `(language, entry_type)` or, failing that, for the dialect's parent language.
    pub fn normalize(&self, input: &str, language: &Language, entry_type: EntryType) -> String {
        let base = input.trim().to_lowercase();
        let normalizer = self
            .normalizers
            .get(&(language.clone(), entry_type))
            .or_else(|| {
                language
                    .dialect()
                    .and_then(|_| self.normalizers.get(&(language.without_dialect(), entry_type)))
            });

        match normalizer {
            Some(normalizer) => normalizer.normalize(&base),
            None => base,
        }
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

impl Default for NormalizationService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
