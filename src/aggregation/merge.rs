//! Merging of near-duplicate entries.
//!
//! Entries are keyed by a `MergeCandidateIdentifier` (language pair, word class and
//! normalized general forms). Entries sharing a key are folded into one, attribute by
//! attribute. Bilingual entries are first turned so that every language pair reads in one
//! direction, and entries an engine left unclassified are attached to a classified group when
//! exactly one such group matches them.

use super::normalize::NormalizationService;
use crate::entry::{BilingualEntry, DictionaryObject, EntryType, GrammaticalForm, MonolingualEntry};
use crate::language::Language;

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

const JOIN_SEPARATOR: &str = ", ";

/// Collapses a list of elements into a list where similar elements are combined.
///
/// The output never has more elements than the input, and merging an already merged list
/// returns it unchanged.
pub trait SimilarElementsMerger<T> {
    fn merge(&self, elements: Vec<T>) -> Vec<T>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeCandidateIdentifier {
    pub source_language: Language,
    pub target_language: Option<Language>,
    pub entry_type: EntryType,
    pub source_form: String,
    pub target_form: Option<String>,
}

impl MergeCandidateIdentifier {
    /// Equality that ignores dialects on both languages.
    pub fn matches_ignoring_dialects(&self, other: &Self) -> bool {
        self.entry_type == other.entry_type
            && self.source_form == other.source_form
            && self.target_form == other.target_form
            && self.source_language.without_dialect() == other.source_language.without_dialect()
            && self.target_language.as_ref().map(Language::without_dialect)
                == other.target_language.as_ref().map(Language::without_dialect)
    }
}

/// An entry the generic merge engine can work on.
pub trait MergeableEntry: Sized {
    fn entry_type(&self) -> EntryType;

    fn with_entry_type(self, entry_type: EntryType) -> Self;

    fn source_object(&self) -> &DictionaryObject;

    /// `None` for single-language entries.
    fn target_object(&self) -> Option<&DictionaryObject>;

    /// Swaps source and target. Single-language entries return themselves.
    fn inverted(self) -> Self;

    /// Folds `rest` into `first`. Type and general forms come from `first`.
    fn merge_candidates(first: Self, rest: Vec<Self>) -> Self;
}

impl MergeableEntry for BilingualEntry {
    fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    fn source_object(&self) -> &DictionaryObject {
        &self.source
    }

    fn target_object(&self) -> Option<&DictionaryObject> {
        Some(&self.target)
    }

    fn inverted(self) -> Self {
        BilingualEntry::inverted(self)
    }

    fn merge_candidates(first: Self, rest: Vec<Self>) -> Self {
        let (sources, targets): (Vec<_>, Vec<_>) =
            rest.into_iter().map(|entry| (entry.source, entry.target)).unzip();
        BilingualEntry {
            source: merge_dictionary_objects(first.source, sources),
            target: merge_dictionary_objects(first.target, targets),
            entry_type: first.entry_type,
        }
    }
}

impl MergeableEntry for MonolingualEntry {
    fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    fn source_object(&self) -> &DictionaryObject {
        &self.content
    }

    fn target_object(&self) -> Option<&DictionaryObject> {
        None
    }

    fn inverted(self) -> Self {
        self
    }

    fn merge_candidates(first: Self, rest: Vec<Self>) -> Self {
        let contents = rest.into_iter().map(|entry| entry.content).collect();
        MonolingualEntry {
            content: merge_dictionary_objects(first.content, contents),
            entry_type: first.entry_type,
        }
    }
}

/// Merge engine for bilingual and monolingual entries.
pub struct EntryMerger<T> {
    normalizer: Arc<NormalizationService>,
    _entries: PhantomData<fn() -> T>,
}

impl<T: MergeableEntry> EntryMerger<T> {
    pub fn new(normalizer: Arc<NormalizationService>) -> Self {
        Self {
            normalizer,
            _entries: PhantomData,
        }
    }

    /// The key `entry` would have if it were of type `entry_type`.
    pub fn identifier_as(&self, entry: &T, entry_type: EntryType) -> MergeCandidateIdentifier {
        let source = entry.source_object();
        let target = entry.target_object();
        MergeCandidateIdentifier {
            source_language: source.language.clone(),
            target_language: target.map(|t| t.language.clone()),
            entry_type,
            source_form: self
                .normalizer
                .normalize(&source.general_form, &source.language, entry_type),
            target_form: target.map(|t| {
                self.normalizer
                    .normalize(&t.general_form, &t.language, entry_type)
            }),
        }
    }

    /// Groups entries by key in first-seen order, then folds unknown-type groups.
    fn find_candidates(&self, elements: Vec<T>) -> Vec<Vec<T>> {
        let mut groups: Vec<(MergeCandidateIdentifier, Vec<T>)> = Vec::new();
        let mut index: HashMap<MergeCandidateIdentifier, usize> = HashMap::new();

        for element in elements {
            let identifier = self.identifier_as(&element, element.entry_type());
            match index.get(&identifier) {
                Some(&position) => groups[position].1.push(element),
                None => {
                    index.insert(identifier.clone(), groups.len());
                    groups.push((identifier, vec![element]));
                }
            }
        }

        self.fold_unknown_groups(groups)
    }

    fn fold_unknown_groups(&self, groups: Vec<(MergeCandidateIdentifier, Vec<T>)>) -> Vec<Vec<T>> {
        let known: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, (identifier, _))| !identifier.entry_type.is_unknown())
            .map(|(position, _)| position)
            .collect();

        let mut destinations: Vec<Option<usize>> = vec![None; groups.len()];
        for (position, (identifier, members)) in groups.iter().enumerate() {
            if !identifier.entry_type.is_unknown() {
                continue;
            }
            let Some(representative) = members.first() else {
                continue;
            };

            let mut matches: Vec<usize> = Vec::new();
            for entry_type in EntryType::known_types() {
                let candidate = self.identifier_as(representative, entry_type);
                matches.extend(known.iter().copied().filter(|&other| {
                    let known_identifier = &groups[other].0;
                    known_identifier.entry_type == entry_type
                        && candidate.matches_ignoring_dialects(known_identifier)
                }));
            }

            match matches.as_slice() {
                [single] => destinations[position] = Some(*single),
                [] => {}
                ambiguous => tracing::debug!(
                    "Unknown-type entry '{}' matches {} groups, keeping it separate",
                    identifier.source_form,
                    ambiguous.len()
                ),
            }
        }

        let entry_types: Vec<EntryType> = groups.iter().map(|(id, _)| id.entry_type).collect();
        let mut slots: Vec<Option<Vec<T>>> =
            groups.into_iter().map(|(_, members)| Some(members)).collect();

        for (position, destination) in destinations.into_iter().enumerate() {
            let Some(destination) = destination else {
                continue;
            };
            let Some(moved) = slots[position].take() else {
                continue;
            };
            let entry_type = entry_types[destination];
            if let Some(target) = slots[destination].as_mut() {
                target.extend(moved.into_iter().map(|entry| entry.with_entry_type(entry_type)));
            }
        }

        slots.into_iter().flatten().collect()
    }
}

impl<T: MergeableEntry> SimilarElementsMerger<T> for EntryMerger<T> {
    fn merge(&self, elements: Vec<T>) -> Vec<T> {
        let input_len = elements.len();
        let groups = self.find_candidates(normalize_direction(elements));

        let merged: Vec<T> = groups
            .into_iter()
            .filter_map(|group| {
                let mut members = group.into_iter();
                let first = members.next()?;
                Some(T::merge_candidates(first, members.collect()))
            })
            .collect();

        tracing::trace!("Merged {} entries into {}", input_len, merged.len());
        merged
    }
}

/// Turns bilingual entries so that each language pair reads in the direction of its first
/// occurrence.
pub fn normalize_direction<T: MergeableEntry>(elements: Vec<T>) -> Vec<T> {
    let mut expected_source: HashMap<(Language, Language), Language> = HashMap::new();

    elements
        .into_iter()
        .map(|entry| {
            let Some(target) = entry.target_object().map(|t| t.language.clone()) else {
                return entry;
            };
            let source = entry.source_object().language.clone();

            let expected = expected_source
                .entry((source.clone(), target.clone()))
                .or_insert_with(|| source.clone())
                .clone();
            expected_source
                .entry((target, source.clone()))
                .or_insert_with(|| expected.clone());

            if expected == source {
                entry
            } else {
                entry.inverted()
            }
        })
        .collect()
}

/// Folds several views of the same word into one object.
///
/// Language and general form come from `first`. Text attributes keep one spelling per
/// distinct trimmed, lowercased value and are joined with ", ". List attributes are
/// de-duplicated the same way in first-seen order.
pub fn merge_dictionary_objects(
    first: DictionaryObject,
    rest: Vec<DictionaryObject>,
) -> DictionaryObject {
    if rest.is_empty() {
        return first;
    }

    let all: Vec<&DictionaryObject> = std::iter::once(&first).chain(rest.iter()).collect();

    let mut additional_values: BTreeMap<GrammaticalForm, Vec<&str>> = BTreeMap::new();
    for object in &all {
        for (form, value) in &object.additional_forms {
            additional_values
                .entry(form.clone())
                .or_default()
                .push(value.as_str());
        }
    }
    let additional_forms = additional_values
        .into_iter()
        .filter_map(|(form, values)| join_distinct(values).map(|joined| (form, joined)))
        .collect();

    DictionaryObject {
        language: first.language.clone(),
        general_form: first.general_form.clone(),
        description: join_distinct(all.iter().filter_map(|o| o.description.as_deref())),
        domain: join_distinct(all.iter().filter_map(|o| o.domain.as_deref())),
        abbreviation: join_distinct(all.iter().filter_map(|o| o.abbreviation.as_deref())),
        pronunciation: join_distinct(all.iter().filter_map(|o| o.pronunciation.as_deref())),
        grammatical_gender: all.iter().find_map(|o| o.grammatical_gender),
        additional_forms,
        meanings: distinct_values(all.iter().flat_map(|o| o.meanings.iter().map(String::as_str))),
        syllabification: all
            .iter()
            .find(|o| !o.syllabification.is_empty())
            .map(|o| o.syllabification.clone())
            .unwrap_or_default(),
        alternate_forms: distinct_values(
            all.iter().flat_map(|o| o.alternate_forms.iter().map(String::as_str)),
        ),
    }
}

fn comparison_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// First spelling of every distinct value, blanks dropped.
fn distinct_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut kept: Vec<String> = Vec::new();
    for value in values {
        let key = comparison_key(value);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        kept.push(value.trim().to_string());
    }
    kept
}

fn join_distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let kept = distinct_values(values);
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(JOIN_SEPARATOR))
    }
}

/// Merges similar recommendations: objects with the same language and normalized general form.
pub struct DictionaryObjectMerger;

impl SimilarElementsMerger<DictionaryObject> for DictionaryObjectMerger {
    fn merge(&self, elements: Vec<DictionaryObject>) -> Vec<DictionaryObject> {
        let mut groups: Vec<Vec<DictionaryObject>> = Vec::new();
        let mut index: HashMap<(Language, String), usize> = HashMap::new();

        for object in elements {
            let key = (object.language.clone(), comparison_key(&object.general_form));
            match index.get(&key) {
                Some(&position) => groups[position].push(object),
                None => {
                    index.insert(key, groups.len());
                    groups.push(vec![object]);
                }
            }
        }

        groups
            .into_iter()
            .filter_map(|group| {
                let mut members = group.into_iter();
                let first = members.next()?;
                Some(merge_dictionary_objects(first, members.collect()))
            })
            .collect()
    }
}
