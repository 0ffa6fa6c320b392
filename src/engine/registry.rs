//! Search Engine Registry
//!
//! Maps engine identifiers to engine handles, and dictionaries / languages to the engines
//! that serve them. The planner reads it on every query; registration happens at bootstrap.

use super::search_engine::{EngineCapabilities, SearchEngine};
use crate::language::{BilingualDictionary, Language, sort_by_priority};

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Search engine '{0}' is already registered")]
    DuplicateEngine(String),

    #[error("Dictionary {0} uses the same language on both sides")]
    InvalidDictionary(String),
}

pub struct EngineRegistry {
    engines: DashMap<String, Arc<dyn SearchEngine>>,
    /// Dictionary -> engine ids, in registration order.
    dictionary_engines: DashMap<BilingualDictionary, Vec<String>>,
    /// Language -> engine ids serving monolingual lookups, in registration order.
    language_engines: DashMap<Language, Vec<String>>,
}

impl EngineRegistry {
    /// Creates an empty registry, shared between the bootstrap code and the planner.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers an engine under `engine_id`.
    ///
    /// A bidirectional dictionary is also registered as its inverse and as both one-way
    /// dictionaries, so lookups in any direction find the engine.
    ///
    /// # Arguments
    /// * `engine_id`: Unique identifier, used as the engine tag on merged entries.
    /// * `engine`: Handle the executor calls.
    /// * `capabilities`: Dictionaries and monolingual languages the engine serves.
    ///
    /// # Returns
    /// `DuplicateEngine` when the id is taken, `InvalidDictionary` when a dictionary has the
    /// same language on both sides. Nothing is registered in either case.
    pub fn register(
        &self,
        engine_id: &str,
        engine: Arc<dyn SearchEngine>,
        capabilities: EngineCapabilities,
    ) -> Result<(), RegistryError> {
        if let Some(invalid) = capabilities
            .dictionaries
            .iter()
            .find(|dictionary| dictionary.source() == dictionary.target())
        {
            return Err(RegistryError::InvalidDictionary(invalid.query_string()));
        }

        match self.engines.entry(engine_id.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(RegistryError::DuplicateEngine(engine_id.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(engine);
            }
        }

        for dictionary in &capabilities.dictionaries {
            self.register_dictionary(engine_id, dictionary);
        }
        for language in &capabilities.monolingual_languages {
            add_unique(&self.language_engines, language.clone(), engine_id);
        }

        tracing::info!(
            "Registered search engine: {} ({} dictionaries, {} monolingual languages)",
            engine_id,
            capabilities.dictionaries.len(),
            capabilities.monolingual_languages.len()
        );
        Ok(())
    }

    fn register_dictionary(&self, engine_id: &str, dictionary: &BilingualDictionary) {
        add_unique(&self.dictionary_engines, dictionary.clone(), engine_id);

        if dictionary.is_bidirectional() {
            add_unique(&self.dictionary_engines, dictionary.inverse(), engine_id);
            let one_way = BilingualDictionary::one_way(
                dictionary.source().clone(),
                dictionary.target().clone(),
            );
            add_unique(&self.dictionary_engines, one_way.inverse(), engine_id);
            add_unique(&self.dictionary_engines, one_way, engine_id);
        }
    }

    /// Engines serving `dictionary`, in registration order.
    ///
    /// # Returns
    /// The engine ids, or an empty list when nothing serves the dictionary.
    pub fn engine_names_for_dictionary(&self, dictionary: &BilingualDictionary) -> Vec<String> {
        self.dictionary_engines
            .get(dictionary)
            .map(|names| names.value().clone())
            .unwrap_or_default()
    }

    /// Engines serving monolingual lookups in `language`, in registration order.
    ///
    /// # Returns
    /// The engine ids, or an empty list when no engine serves the language.
    pub fn engine_names_for_language(&self, language: &Language) -> Vec<String> {
        self.language_engines
            .get(language)
            .map(|names| names.value().clone())
            .unwrap_or_default()
    }

    /// Looks up the handle registered under `engine_id`.
    ///
    /// # Arguments
    /// * `engine_id`: Identifier passed to `register`.
    ///
    /// # Returns
    /// The engine handle, or `None` if no engine has that id.
    pub fn resolve_engine(&self, engine_id: &str) -> Option<Arc<dyn SearchEngine>> {
        self.engines.get(engine_id).map(|engine| engine.value().clone())
    }

    /// Checks whether an engine is registered under `engine_id`.
    pub fn has_engine(&self, engine_id: &str) -> bool {
        self.engines.contains_key(engine_id)
    }

    /// Number of registered engines.
    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Registered engine ids, sorted.
    pub fn registered_engine_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.engines.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Every servable dictionary, in display order.
    pub fn supported_dictionaries(&self) -> Vec<BilingualDictionary> {
        let dictionaries = self
            .dictionary_engines
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        sort_by_priority(dictionaries)
    }

    /// Languages with at least one monolingual engine, sorted by display name.
    pub fn supported_monolingual_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self
            .language_engines
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        languages.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.cmp(b))
        });
        languages
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self {
            engines: DashMap::new(),
            dictionary_engines: DashMap::new(),
            language_engines: DashMap::new(),
        }
    }
}

fn add_unique<K: Hash + Eq>(index: &DashMap<K, Vec<String>>, key: K, engine_id: &str) {
    let mut names = index.entry(key).or_default();
    if !names.iter().any(|name| name == engine_id) {
        names.push(engine_id.to_string());
    }
}
