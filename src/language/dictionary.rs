use super::language::{Language, LanguageError};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// `<source><>target` for bidirectional, `<source>-<target>` for one-way dictionaries.
static DICTIONARY_QUERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+(?:_[A-Za-z]+)?)(<>|-)([A-Za-z]+(?:_[A-Za-z]+)?)$")
        .expect("Invalid dictionary query regex pattern")
});

const BIDIRECTIONAL_SEPARATOR: &str = "<>";
const ONE_WAY_SEPARATOR: &str = "-";

/// An ordered language pair, optionally searchable in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BilingualDictionary {
    source: Language,
    target: Language,
    bidirectional: bool,
}

impl BilingualDictionary {
    pub fn new(source: Language, target: Language, bidirectional: bool) -> Self {
        Self {
            source,
            target,
            bidirectional,
        }
    }

    pub fn one_way(source: Language, target: Language) -> Self {
        Self::new(source, target, false)
    }

    pub fn bidirectional(source: Language, target: Language) -> Self {
        Self::new(source, target, true)
    }

    pub fn source(&self) -> &Language {
        &self.source
    }

    pub fn target(&self) -> &Language {
        &self.target
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Swaps source and target, keeping the direction flag.
    pub fn inverse(&self) -> Self {
        Self::new(self.target.clone(), self.source.clone(), self.bidirectional)
    }

    pub fn query_string(&self) -> String {
        let separator = if self.bidirectional {
            BIDIRECTIONAL_SEPARATOR
        } else {
            ONE_WAY_SEPARATOR
        };
        format!(
            "{}{}{}",
            self.source.identifier_with_dialect(),
            separator,
            self.target.identifier_with_dialect()
        )
    }

    /// Parses `de<>en` or `de-en`; the separator decides the direction flag.
    pub fn from_query_string(query: &str) -> Result<Self, LanguageError> {
        let (source, target, bidirectional) = Self::parse(query)?;
        Ok(Self::new(source, target, bidirectional))
    }

    /// Parses a dictionary query but overrides the direction flag.
    pub fn from_query_string_with_direction(
        query: &str,
        bidirectional: bool,
    ) -> Result<Self, LanguageError> {
        let (source, target, _) = Self::parse(query)?;
        Ok(Self::new(source, target, bidirectional))
    }

    fn parse(query: &str) -> Result<(Language, Language, bool), LanguageError> {
        let trimmed = query.trim();
        let captures = DICTIONARY_QUERY_PATTERN
            .captures(trimmed)
            .ok_or_else(|| LanguageError::InvalidDictionaryQuery(query.to_string()))?;

        let source = Language::by_id(&captures[1])?;
        let bidirectional = &captures[2] == BIDIRECTIONAL_SEPARATOR;
        let target = Language::by_id(&captures[3])?;

        Ok((source, target, bidirectional))
    }
}

impl fmt::Display for BilingualDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_string())
    }
}

/// Parses a comma separated list such as `"de-en,fr-en"`, forcing every dictionary's
/// direction flag to `bidirectional`. Empty items are skipped.
pub fn resolve_dictionaries(
    query: &str,
    bidirectional: bool,
) -> Result<Vec<BilingualDictionary>, LanguageError> {
    query
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| BilingualDictionary::from_query_string_with_direction(item, bidirectional))
        .collect()
}

/// Orders dictionaries for display.
///
/// Languages are ranked by how often they appear (targets count only for bidirectional
/// dictionaries). A bidirectional dictionary whose target outranks its source is shown
/// inverted (ties go to the smaller identifier), then the list is sorted by source and target
/// display name. Duplicates produced by the inversion are dropped.
pub fn sort_by_priority(dictionaries: Vec<BilingualDictionary>) -> Vec<BilingualDictionary> {
    let mut usage: HashMap<Language, usize> = HashMap::new();
    for dictionary in &dictionaries {
        *usage.entry(dictionary.source.clone()).or_default() += 1;
        if dictionary.bidirectional {
            *usage.entry(dictionary.target.clone()).or_default() += 1;
        }
    }

    let mut sorted: Vec<BilingualDictionary> = dictionaries
        .into_iter()
        .map(|dictionary| {
            let source_rank = usage.get(&dictionary.source).copied().unwrap_or(0);
            let target_rank = usage.get(&dictionary.target).copied().unwrap_or(0);
            let target_first = target_rank > source_rank
                || (target_rank == source_rank && dictionary.target < dictionary.source);
            if dictionary.bidirectional && target_first {
                dictionary.inverse()
            } else {
                dictionary
            }
        })
        .collect();

    sorted.sort_by(|a, b| {
        a.source
            .display_name()
            .cmp(b.source.display_name())
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.display_name().cmp(b.target.display_name()))
            .then_with(|| a.target.cmp(&b.target))
            .then_with(|| b.bidirectional.cmp(&a.bidirectional))
    });
    sorted.dedup();
    sorted
}
