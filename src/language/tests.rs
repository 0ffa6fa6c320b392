//! Language Module Tests
//!
//! ## Test Scopes
//! - **Language**: interning, dialect handling and identifier validation.
//! - **BilingualDictionary**: query-string parsing, inversion and list resolution.

#[cfg(test)]
mod tests {
    use crate::language::{
        BilingualDictionary, Language, LanguageError, resolve_dictionaries, sort_by_priority,
    };
    use std::collections::HashSet;

    // ============================================================
    // LANGUAGE TESTS
    // ============================================================

    #[test]
    fn test_predefined_languages_are_interned() {
        let by_id = Language::by_id("de").unwrap();
        let constant = Language::german();

        assert_eq!(by_id, constant);
        assert_eq!(by_id.display_name(), "German");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let upper = Language::by_id("EN").unwrap();

        assert_eq!(upper, Language::english());
        assert_eq!(upper.identifier(), "en");
    }

    #[test]
    fn test_dialect_lookup_and_parent() {
        let bokmal = Language::by_id("no_bo").unwrap();

        assert_eq!(bokmal.identifier(), "no");
        assert_eq!(bokmal.dialect(), Some("bo"));
        assert_eq!(bokmal.dialect_display_name(), Some("Bokmål"));
        assert_eq!(bokmal.identifier_with_dialect(), "no_bo");
        assert_eq!(bokmal.without_dialect(), Language::norwegian());
        assert_ne!(bokmal, Language::norwegian_nynorsk());
    }

    #[test]
    fn test_language_without_dialect_is_its_own_parent() {
        let english = Language::english();
        assert_eq!(english.without_dialect(), english);
    }

    #[test]
    fn test_unknown_identifier_is_interned_on_the_fly() {
        let first = Language::by_id("la").unwrap();
        let second = Language::by_id("LA").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.display_name(), "la");
    }

    #[test]
    fn test_unknown_dialect_takes_parent_display_name() {
        let dialect = Language::by_id("de_ch").unwrap();

        assert_eq!(dialect.display_name(), "German");
        assert_eq!(dialect.without_dialect(), Language::german());
    }

    #[test]
    fn test_invalid_identifiers_are_rejected() {
        for invalid in ["", "d3", "de_", "_de", "de-en", "de_at_vienna"] {
            let result = Language::by_id(invalid);
            assert!(
                matches!(result, Err(LanguageError::InvalidIdentifier(_))),
                "'{}' should be rejected",
                invalid
            );
        }
    }

    #[test]
    fn test_simple_language_rejects_dialect_identifier() {
        assert!(Language::for_simple_language("xx_yy", "Broken").is_err());
        let custom = Language::for_simple_language("eo", "Esperanto").unwrap();
        assert_eq!(custom.display_name(), "Esperanto");
    }

    #[test]
    fn test_language_hash_uses_identity() {
        let mut set = HashSet::new();
        set.insert(Language::english());
        set.insert(Language::by_id("en").unwrap());
        set.insert(Language::by_id("no_bo").unwrap());

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_language_serializes_as_identifier() {
        let json = serde_json::to_string(&Language::norwegian_nynorsk()).unwrap();
        assert_eq!(json, "\"no_ny\"");

        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Language::norwegian_nynorsk());
    }

    // ============================================================
    // DICTIONARY TESTS
    // ============================================================

    #[test]
    fn test_parse_bidirectional_dictionary() {
        let dictionary = BilingualDictionary::from_query_string("de<>en").unwrap();

        assert_eq!(dictionary.source(), &Language::german());
        assert_eq!(dictionary.target(), &Language::english());
        assert!(dictionary.is_bidirectional());
        assert_eq!(dictionary.query_string(), "de<>en");
    }

    #[test]
    fn test_parse_one_way_dictionary_with_dialect() {
        let dictionary = BilingualDictionary::from_query_string("no_bo-de").unwrap();

        assert_eq!(dictionary.source(), &Language::norwegian_bokmal());
        assert!(!dictionary.is_bidirectional());
        assert_eq!(dictionary.to_string(), "no_bo-de");
    }

    #[test]
    fn test_parse_rejects_malformed_queries() {
        for invalid in ["de", "de<>", "de=en", "de<>en<>fr", "1-2"] {
            assert!(
                BilingualDictionary::from_query_string(invalid).is_err(),
                "'{}' should be rejected",
                invalid
            );
        }
    }

    #[test]
    fn test_inverse_swaps_languages() {
        let dictionary = BilingualDictionary::one_way(Language::german(), Language::english());
        let inverse = dictionary.inverse();

        assert_eq!(inverse.source(), &Language::english());
        assert_eq!(inverse.target(), &Language::german());
        assert!(!inverse.is_bidirectional());
        assert_eq!(inverse.inverse(), dictionary);
    }

    #[test]
    fn test_resolve_dictionaries_forces_direction() {
        let dictionaries = resolve_dictionaries("de-en, fr<>en,", true).unwrap();

        assert_eq!(dictionaries.len(), 2);
        assert!(dictionaries.iter().all(|d| d.is_bidirectional()));
        assert_eq!(dictionaries[1].source(), &Language::french());
    }

    #[test]
    fn test_resolve_dictionaries_fails_on_bad_item() {
        let result = resolve_dictionaries("de-en,nonsense", false);
        assert!(matches!(result, Err(LanguageError::InvalidDictionaryQuery(_))));
    }

    #[test]
    fn test_sort_by_priority_flips_towards_common_language() {
        // English is used by every dictionary, so it becomes the source of the bidirectional ones
        let dictionaries = vec![
            BilingualDictionary::bidirectional(Language::german(), Language::english()),
            BilingualDictionary::bidirectional(Language::french(), Language::english()),
            BilingualDictionary::one_way(Language::english(), Language::swedish()),
        ];

        let sorted = sort_by_priority(dictionaries);

        let rendered: Vec<String> = sorted.iter().map(|d| d.query_string()).collect();
        assert_eq!(rendered, vec!["en<>fr", "en<>de", "en-sv"]);
    }

    #[test]
    fn test_sort_by_priority_drops_duplicates_after_inversion() {
        let dictionaries = vec![
            BilingualDictionary::bidirectional(Language::german(), Language::english()),
            BilingualDictionary::bidirectional(Language::english(), Language::german()),
            BilingualDictionary::bidirectional(Language::english(), Language::french()),
        ];

        let sorted = sort_by_priority(dictionaries);

        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].query_string(), "en<>fr");
        assert_eq!(sorted[1].query_string(), "en<>de");
    }
}
