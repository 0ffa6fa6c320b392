//! Aggregation Module Tests
//!
//! ## Test Scopes
//! - **Normalization**: verb prefixes and dialect fallback.
//! - **Merging**: direction normalization, candidate detection, unknown-type folding,
//!   attribute merging and idempotence.
//! - **Grouping**: the three grouping strategies.
//! - **Ordering**: relevance scores, stable ordering and monolingual ordering.

#[cfg(test)]
mod tests {
    use crate::aggregation::distance::{levenshtein, levenshtein_ignore_case};
    use crate::aggregation::group::{
        ALL_ENTRIES_GROUP, DictionaryGroupingStrategy, EntryTypeGroupingStrategy,
    };
    use crate::aggregation::merge::{merge_dictionary_objects, normalize_direction};
    use crate::aggregation::order::LevenshteinRelevanceOrderStrategy;
    use crate::aggregation::*;
    use crate::entry::*;
    use crate::language::Language;
    use crate::test_utils::{de_en, object};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn bilingual_merger() -> EntryMerger<BilingualEntry> {
        EntryMerger::new(Arc::new(NormalizationService::with_defaults()))
    }

    fn sourced(entry: BilingualEntry, engine: &str) -> SourcedEntry<BilingualEntry> {
        SourcedEntry::new(entry, engine)
    }

    // ============================================================
    // DISTANCE
    // ============================================================

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("haus", ""), 4);
        assert_eq!(levenshtein("", "haus"), 4);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("Straße", "Strasse"), 2);
        assert_eq!(levenshtein_ignore_case("HASE", "hase"), 0);
    }

    // ============================================================
    // NORMALIZATION
    // ============================================================

    #[test]
    fn test_english_verbs_get_to_prefix() {
        let service = NormalizationService::with_defaults();

        assert_eq!(service.normalize(" Run ", &Language::english(), EntryType::Verb), "to run");
        assert_eq!(service.normalize("to run", &Language::english(), EntryType::Verb), "to run");
        assert_eq!(service.normalize("Run", &Language::english(), EntryType::Noun), "run");
        assert_eq!(service.normalize("laufen", &Language::german(), EntryType::Verb), "laufen");
    }

    #[test]
    fn test_dialect_falls_back_to_parent_normalizer() {
        let service = NormalizationService::with_defaults();

        let normalized = service.normalize("Gå", &Language::norwegian_bokmal(), EntryType::Verb);

        assert_eq!(normalized, "å gå");
    }

    #[test]
    fn test_duplicate_normalizer_is_a_configuration_error() {
        let mut service = NormalizationService::with_defaults();

        let result = service.register(Arc::new(PrefixNormalizer::english_verbs()));

        assert!(matches!(result, Err(NormalizerError::Duplicate { .. })));
        assert_eq!(service.len(), 2);
    }

    // ============================================================
    // MERGING: direction and candidates
    // ============================================================

    #[test]
    fn test_direction_follows_first_occurrence() {
        let entries = vec![
            de_en("A", "A", EntryType::OtherWord),
            de_en("B", "B", EntryType::OtherWord).inverted(),
            BilingualEntry::new(
                object(Language::french(), "C"),
                object(Language::english(), "C"),
                EntryType::OtherWord,
            ),
        ];

        let normalized = normalize_direction(entries);

        assert_eq!(normalized.len(), 3);
        assert!(normalized[..2].iter().all(|e| e.source.language == Language::german()));
        assert_eq!(normalized[2].source.language, Language::french());
    }

    #[test]
    fn test_identical_entries_merge_across_direction_and_case() {
        // Scenario: {de:"Haus", en:"house"} and {en:"House", de:"haus"} from two engines
        let merged = bilingual_merger().merge(vec![
            de_en("Haus", "house", EntryType::Noun),
            de_en("haus", "House", EntryType::Noun).inverted(),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source.general_form, "Haus");
        assert_eq!(merged[0].target.general_form, "house");
    }

    #[test]
    fn test_different_types_do_not_merge() {
        let merged = bilingual_merger().merge(vec![
            de_en("A", "A", EntryType::OtherWord),
            de_en("A", "A", EntryType::OtherWord),
            de_en("A", "A", EntryType::Noun),
            de_en("B", "B", EntryType::OtherWord),
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].entry_type, EntryType::OtherWord);
        assert_eq!(merged[1].entry_type, EntryType::Noun);
    }

    #[test]
    fn test_verb_normalization_merges_prefixed_forms() {
        let merged = bilingual_merger().merge(vec![
            de_en("laufen", "to run", EntryType::Verb),
            de_en("laufen", "run", EntryType::Verb),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].target.general_form, "to run");
    }

    // ============================================================
    // MERGING: unknown-type reconciliation
    // ============================================================

    #[test]
    fn test_unknown_joins_single_matching_group() {
        let merged = bilingual_merger().merge(vec![
            de_en("A", "A", EntryType::Noun),
            de_en("A", "A", EntryType::Unknown).tap_description("bla"),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].entry_type, EntryType::Noun);
        assert_eq!(merged[0].source.description.as_deref(), Some("bla"));
    }

    #[test]
    fn test_unknown_stays_separate_when_ambiguous() {
        let merged = bilingual_merger().merge(vec![
            de_en("A", "A", EntryType::Noun),
            de_en("A", "A", EntryType::Adjective),
            de_en("A", "A", EntryType::Unknown),
        ]);

        assert_eq!(merged.len(), 3);
        assert!(merged.iter().any(|e| e.entry_type == EntryType::Unknown));
    }

    #[test]
    fn test_unknown_alone_is_kept() {
        let merged = bilingual_merger().merge(vec![de_en("A", "A", EntryType::Unknown)]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].entry_type, EntryType::Unknown);
    }

    #[test]
    fn test_unknown_matches_verb_after_type_normalization() {
        let merged = bilingual_merger().merge(vec![
            de_en("laufen", "to run", EntryType::Verb),
            de_en("laufen", "run", EntryType::Unknown),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].entry_type, EntryType::Verb);
    }

    #[test]
    fn test_unknown_matches_group_with_dialect() {
        let known = BilingualEntry::new(
            object(Language::norwegian_bokmal(), "hus"),
            object(Language::german(), "Haus"),
            EntryType::Noun,
        );
        let unknown = BilingualEntry::new(
            object(Language::norwegian(), "hus"),
            object(Language::german(), "Haus"),
            EntryType::Unknown,
        );

        let merged = bilingual_merger().merge(vec![known, unknown]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source.language, Language::norwegian_bokmal());
        assert_eq!(merged[0].entry_type, EntryType::Noun);
    }

    #[test]
    fn test_different_dialects_do_not_merge() {
        let bokmal = BilingualEntry::new(
            object(Language::norwegian_bokmal(), "hus"),
            object(Language::german(), "Haus"),
            EntryType::Noun,
        );
        let nynorsk = BilingualEntry::new(
            object(Language::norwegian_nynorsk(), "hus"),
            object(Language::german(), "Haus"),
            EntryType::Noun,
        );

        let merged = bilingual_merger().merge(vec![bokmal, nynorsk]);

        assert_eq!(merged.len(), 2);
    }

    // ============================================================
    // MERGING: attributes
    // ============================================================

    #[test]
    fn test_merge_dictionary_object_attributes() {
        // ARRANGE
        let genitive = GrammaticalForm::noun(Some(GrammaticalCase::Genitive), Some(GrammaticalNumber::Singular), None)
            .unwrap();
        let plural = GrammaticalForm::noun(
            Some(GrammaticalCase::Nominative),
            Some(GrammaticalNumber::Plural),
            Some(GrammaticalGender::Masculine),
        )
        .unwrap();
        let first = object(Language::german(), "Hund")
            .with_description("Tier")
            .with_abbreviation("H.")
            .with_domain("Haushalt")
            .with_meaning("Haustier")
            .with_meaning("Hund")
            .with_additional_form(plural.clone(), "Hunde")
            .with_additional_form(genitive.clone(), "Hunds");
        let second = object(Language::german(), "hund")
            .with_description("Säugetier")
            .with_gender(GrammaticalGender::Masculine)
            .with_abbreviation("hu.")
            .with_domain("Zool.")
            .with_meaning("hund")
            .with_additional_form(plural.clone(), "hunde")
            .with_additional_form(genitive.clone(), "Hundes")
            .with_syllabification(&["Hund"]);

        // ACT
        let merged = merge_dictionary_objects(first, vec![second]);

        // ASSERT
        assert_eq!(merged.general_form, "Hund");
        assert_eq!(merged.description.as_deref(), Some("Tier, Säugetier"));
        assert_eq!(merged.abbreviation.as_deref(), Some("H., hu."));
        assert_eq!(merged.domain.as_deref(), Some("Haushalt, Zool."));
        assert_eq!(merged.grammatical_gender, Some(GrammaticalGender::Masculine));
        assert_eq!(merged.meanings, vec!["Haustier", "Hund"]);
        assert_eq!(merged.additional_forms.get(&plural).map(String::as_str), Some("Hunde"));
        assert_eq!(merged.additional_forms.get(&genitive).map(String::as_str), Some("Hunds, Hundes"));
        assert_eq!(merged.syllabification, vec!["Hund"]);
    }

    #[test]
    fn test_merge_trims_and_deduplicates_case_insensitively() {
        let first = object(Language::english(), "dog")
            .with_description("animal")
            .with_alternate_form("doggy")
            .with_alternate_form("doggo");
        let second = object(Language::english(), "dog")
            .with_description("  Animal  ")
            .with_alternate_form("Doggo");

        let merged = merge_dictionary_objects(first, vec![second]);

        assert_eq!(merged.description.as_deref(), Some("animal"));
        assert_eq!(merged.alternate_forms, vec!["doggy", "doggo"]);
        assert_eq!(merged.pronunciation, None);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let merger = bilingual_merger();
        let input = vec![
            de_en("Haus", "house", EntryType::Noun).tap_description("Gebäude"),
            de_en("haus", "House", EntryType::Noun).tap_description("Heim"),
            de_en("A", "A", EntryType::Noun),
            de_en("A", "A", EntryType::Verb),
            de_en("A", "A", EntryType::Unknown),
        ];

        let once = merger.merge(input);
        let twice = merger.merge(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once[0].source.description.as_deref(), Some("Gebäude, Heim"));
    }

    /// Merged entries as a set of (type, sides sorted by language, forms lowercased).
    fn membership(entries: &[BilingualEntry]) -> BTreeSet<(String, Vec<(Language, String)>)> {
        entries
            .iter()
            .map(|entry| {
                let mut sides = vec![
                    (entry.source.language.clone(), entry.source.general_form.to_lowercase()),
                    (entry.target.language.clone(), entry.target.general_form.to_lowercase()),
                ];
                sides.sort();
                (entry.entry_type.display_name().to_string(), sides)
            })
            .collect()
    }

    #[test]
    fn test_merge_membership_ignores_input_order() {
        // ARRANGE: one pair in both directions, a foldable unknown and an ambiguous unknown
        let merger = bilingual_merger();
        let forward = vec![
            de_en("Haus", "house", EntryType::Noun),
            de_en("haus", "House", EntryType::Noun).inverted(),
            de_en("A", "A", EntryType::Noun),
            de_en("A", "A", EntryType::Unknown),
            de_en("B", "B", EntryType::Noun),
            de_en("B", "B", EntryType::Verb),
            de_en("B", "B", EntryType::Unknown),
        ];
        let reversed: Vec<BilingualEntry> = forward.iter().cloned().rev().collect();
        let mut rotated = forward.clone();
        rotated.rotate_left(3);

        // ACT
        let from_forward = merger.merge(forward);
        let from_reversed = merger.merge(reversed);
        let from_rotated = merger.merge(rotated);

        // ASSERT
        assert_eq!(from_forward.len(), 5);
        assert_eq!(from_reversed.len(), from_forward.len());
        assert_eq!(from_rotated.len(), from_forward.len());
        assert_eq!(membership(&from_reversed), membership(&from_forward));
        assert_eq!(membership(&from_rotated), membership(&from_forward));
    }

    #[test]
    fn test_distinct_entries_keep_full_length() {
        let input = vec![
            de_en("A", "a", EntryType::Noun),
            de_en("A", "a", EntryType::Verb),
            de_en("B", "b", EntryType::Noun),
            de_en("C", "c", EntryType::Unknown),
            BilingualEntry::new(
                object(Language::french(), "A"),
                object(Language::english(), "a"),
                EntryType::Noun,
            ),
        ];

        let merged = bilingual_merger().merge(input.clone());

        assert_eq!(merged.len(), input.len());
        assert_eq!(membership(&merged), membership(&input));
    }

    #[test]
    fn test_sourced_entries_union_engines() {
        let merger: EntryMerger<SourcedEntry<BilingualEntry>> =
            EntryMerger::new(Arc::new(NormalizationService::with_defaults()));

        let merged = merger.merge(vec![
            sourced(de_en("Haus", "house", EntryType::Noun), "leo"),
            sourced(de_en("Haus", "house", EntryType::Noun), "heinzelnisse"),
            sourced(de_en("Haus", "house", EntryType::Noun), "leo"),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].engines, vec!["leo", "heinzelnisse"]);
    }

    #[test]
    fn test_monolingual_entries_merge_by_form_and_type() {
        let merger: EntryMerger<MonolingualEntry> =
            EntryMerger::new(Arc::new(NormalizationService::with_defaults()));

        let merged = merger.merge(vec![
            MonolingualEntry::new(object(Language::german(), "Haus").with_meaning("Gebäude"), EntryType::Noun),
            MonolingualEntry::new(object(Language::german(), "haus").with_meaning("Heim"), EntryType::Noun),
            MonolingualEntry::new(object(Language::english(), "haus"), EntryType::Noun),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].content.meanings, vec!["Gebäude", "Heim"]);
    }

    #[test]
    fn test_similar_recommendations_merge_by_language_and_form() {
        let merged = DictionaryObjectMerger.merge(vec![
            object(Language::german(), "Hase").with_description("Tier"),
            object(Language::german(), "hase ").with_description("Nager"),
            object(Language::english(), "Hase"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].description.as_deref(), Some("Tier, Nager"));
    }

    // ============================================================
    // GROUPING
    // ============================================================

    #[test]
    fn test_none_grouping() {
        let entries = vec![
            sourced(de_en("Haus", "house", EntryType::Noun), "e"),
            sourced(de_en("laufen", "to run", EntryType::Verb), "e"),
        ];

        let groups = GroupingType::None.strategy().group_entries(entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].identifier, ALL_ENTRIES_GROUP);
        assert_eq!(groups[0].len(), 2);
        assert!(GroupingType::None.strategy().group_entries(vec![]).is_empty());
    }

    #[test]
    fn test_entry_type_grouping_names_and_order() {
        let entries = vec![
            sourced(de_en("laufen", "to run", EntryType::Verb), "e"),
            sourced(de_en("Haus", "house", EntryType::Noun), "e"),
            sourced(de_en("gehen", "to go", EntryType::Verb), "e"),
            sourced(de_en("x", "y", EntryType::Unknown), "e"),
        ];

        let groups = GroupingType::EntryType.strategy().group_entries(entries);

        let names: Vec<&str> = groups.iter().map(|g| g.identifier.as_str()).collect();
        assert_eq!(names, vec!["Verbs", "Nouns", "Unknown"]);
        assert_eq!(groups[0].entries[1].entry.source.general_form, "gehen");
        assert_eq!(EntryTypeGroupingStrategy::group_identifier(EntryType::OtherWord), "Other words");
    }

    #[test]
    fn test_dictionary_grouping() {
        let entries = vec![
            sourced(de_en("Haus", "house", EntryType::Noun), "e"),
            sourced(
                BilingualEntry::new(
                    object(Language::norwegian_bokmal(), "hus"),
                    object(Language::german(), "Haus"),
                    EntryType::Noun,
                ),
                "e",
            ),
            sourced(de_en("Baum", "tree", EntryType::Noun), "e"),
        ];

        let groups = GroupingType::Dictionary.strategy().group_entries(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].identifier, "German - English");
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].identifier, "Norwegian (Bokmål) - German");
        assert_eq!(
            DictionaryGroupingStrategy::group_identifier(&Language::french(), &Language::english()),
            "French - English"
        );
    }

    // ============================================================
    // ORDERING
    // ============================================================

    #[test]
    fn test_relevance_score() {
        let score = |source: &str, target: &str| {
            LevenshteinRelevanceOrderStrategy::score(&de_en(source, target, EntryType::Noun), "hase")
        };

        assert!((score("huse", "hause") - 0.5).abs() < 0.01);
        assert!((score("huse", "hase") - 1.0).abs() < 0.01);
        assert!((score("hus", "") - 0.3333).abs() < 0.01);
        assert!((score("hus", "HASE") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_relevance_ordering_within_group() {
        let group = ResultGroup::new(
            "",
            vec![
                sourced(de_en("huse", "hause", EntryType::Noun), "e"),
                sourced(de_en("hus", "", EntryType::Noun), "e"),
                sourced(de_en("huse", "hase", EntryType::Noun), "e"),
            ],
        );

        let sorted = OrderType::Relevance.strategy().sort_groups(vec![group], "hase");

        let sources: Vec<&str> = sorted[0]
            .entries
            .iter()
            .map(|e| e.entry.target.general_form.as_str())
            .collect();
        assert_eq!(sources, vec!["hase", "hause", ""]);
        assert!(sorted[0].entries.iter().all(|e| (0.0..=1.0).contains(&e.score)));
    }

    #[test]
    fn test_relevance_ties_keep_merge_order() {
        let group = ResultGroup::new(
            "g",
            vec![
                sourced(de_en("first", "a", EntryType::Noun), "e"),
                sourced(de_en("second", "b", EntryType::Noun), "e"),
            ],
        );

        let sorted = OrderType::Relevance.strategy().sort_group(group, "zzzzzzzz");

        assert_eq!(sorted.entries[0].entry.source.general_form, "first");
        assert_eq!(sorted.identifier, "g");
    }

    #[test]
    fn test_passthrough_keeps_order() {
        let group = ResultGroup::new(
            "g",
            vec![
                sourced(de_en("far", "away", EntryType::Noun), "e"),
                sourced(de_en("hase", "hare", EntryType::Noun), "e"),
            ],
        );

        let sorted = OrderType::Passthrough.strategy().sort_group(group, "hase");

        assert_eq!(sorted.entries[0].entry.source.general_form, "far");
        assert_eq!(sorted.entries[0].score, 1.0);
    }

    #[test]
    fn test_result_entry_clamps_score() {
        let entry = ResultEntry::new(sourced(de_en("a", "b", EntryType::Noun), "e"), 1.7);
        assert_eq!(entry.score, 1.0);
        let entry = ResultEntry::new(sourced(de_en("a", "b", EntryType::Noun), "e"), f64::NAN);
        assert_eq!(entry.score, 0.0);
    }

    #[test]
    fn test_monolingual_ordering_by_distance() {
        let entries = vec![
            MonolingualEntry::new(object(Language::german(), "Hausboot"), EntryType::Noun),
            MonolingualEntry::new(object(Language::german(), "Haus"), EntryType::Noun),
            MonolingualEntry::new(object(Language::german(), "Hase"), EntryType::Noun),
        ];

        let ordered = order_monolingual_entries(entries, "haus");

        let forms: Vec<&str> = ordered.iter().map(|e| e.content.general_form.as_str()).collect();
        assert_eq!(forms, vec!["Haus", "Hase", "Hausboot"]);
    }

    /// Small helper to attach a source description inline.
    trait TapDescription {
        fn tap_description(self, description: &str) -> Self;
    }

    impl TapDescription for BilingualEntry {
        fn tap_description(mut self, description: &str) -> Self {
            self.source.description = Some(description.to_string());
            self
        }
    }
}
