//! Entry Model Tests
//!
//! ## Test Scopes
//! - **Types**: entry type metadata and grammatical form tags.
//! - **Entries**: inversion and the engine result accessors.
//! - **Serialization**: results survive the JSON encoding used by the durable cache.

#[cfg(test)]
mod tests {
    use crate::entry::*;
    use crate::language::Language;

    fn haus() -> BilingualEntry {
        BilingualEntry::new(
            DictionaryObject::new(Language::german(), "Haus")
                .with_gender(GrammaticalGender::Neuter)
                .with_additional_form(
                    GrammaticalForm::noun(Some(GrammaticalCase::Genitive), Some(GrammaticalNumber::Singular), None)
                        .unwrap(),
                    "Hauses",
                ),
            DictionaryObject::new(Language::english(), "house"),
            EntryType::Noun,
        )
    }

    // ============================================================
    // TYPES
    // ============================================================

    #[test]
    fn test_known_types_exclude_unknown() {
        let known: Vec<EntryType> = EntryType::known_types().collect();

        assert_eq!(known.len(), EntryType::ALL.len() - 1);
        assert!(!known.contains(&EntryType::Unknown));
    }

    #[test]
    fn test_entry_type_display_names() {
        assert_eq!(EntryType::Noun.to_string(), "Noun");
        assert_eq!(EntryType::OtherWord.display_name(), "Other word");
    }

    #[test]
    fn test_noun_form_identifier() {
        let form = GrammaticalForm::noun(
            Some(GrammaticalCase::Dative),
            Some(GrammaticalNumber::Plural),
            Some(GrammaticalGender::Feminine),
        )
        .unwrap();

        assert_eq!(form.form_identifier(), "dative plural feminine");
        assert!(GrammaticalForm::noun(None, None, None).is_none());
        assert_eq!(GrammaticalForm::from(GrammaticalCase::DefiniteForm).to_string(), "definite_form");
    }

    // ============================================================
    // ENTRIES
    // ============================================================

    #[test]
    fn test_inverted_swaps_sides_and_keeps_type() {
        let inverted = haus().inverted();

        assert_eq!(inverted.source.general_form, "house");
        assert_eq!(inverted.target.general_form, "Haus");
        assert_eq!(inverted.entry_type, EntryType::Noun);
        assert_eq!(inverted.inverted(), haus());
    }

    #[test]
    fn test_empty_result_sentinel() {
        let empty = EngineQueryResult::empty();

        assert!(empty.is_empty());
        assert!(empty.bilingual_entries().is_empty());
        assert!(empty.monolingual_entries().is_empty());
    }

    #[test]
    fn test_result_accessors_follow_variant() {
        let result: EngineQueryResult = MonolingualQueryResult {
            monolingual_entries: vec![MonolingualEntry::new(
                DictionaryObject::new(Language::english(), "house"),
                EntryType::Noun,
            )],
            similar_recommendations: vec![DictionaryObject::new(Language::english(), "horse")],
            ..Default::default()
        }
        .into();

        assert!(!result.is_empty());
        assert_eq!(result.monolingual_entries().len(), 1);
        assert!(result.bilingual_entries().is_empty());
        assert_eq!(result.similar_recommendations()[0].general_form, "horse");
    }

    // ============================================================
    // SERIALIZATION
    // ============================================================

    #[test]
    fn test_engine_result_json_is_stable() {
        let result: EngineQueryResult = BilingualQueryResult {
            bilingual_entries: vec![haus()],
            external_contents: vec![ExternalContent {
                title: "Haus".to_string(),
                description: None,
                link: Some("https://de.wikipedia.org/wiki/Haus".to_string()),
            }],
            ..Default::default()
        }
        .into();

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"kind\":\"bilingual\""));
        assert!(json.contains("\"genitive singular\":\"Hauses\""));

        let back: EngineQueryResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
