use crate::{GeoConfig, GeoDictionaries, GeoError, GeoSession, MatchMode, TermError, TokenLine};

const CONFIG: &str = r#"(
    user_params: ["GARADDRESS"],
    extra_geo_before: ["ПРОПИСАТЬ"],
    extra_unknown_regions: ["ЗАУРАЛЬЕ", "ЯМАЛ"],
    extra_territories: [
        (canonical: "ПРОМЗОНА", abbreviations: ["П/З"]),
    ],
    lexicon: [
        (word: "прописан", morph: (class: "VERB", lemma: Some("ПРОПИСАТЬ"))),
        (word: "в", morph: (class: "PREPOSITION")),
    ],
)"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn configured_words_reach_the_scanner() {
    init_tracing();
    let config = GeoConfig::from_ron_str(CONFIG).unwrap();
    let dictionaries = GeoDictionaries::from_config(&config).unwrap();
    let session = GeoSession::from_config(&dictionaries, &config);
    assert!(session.params().is_gar_address());

    let line = TokenLine::from_text_with("прописан в Ямал", &config.lexicon());
    let scanner = session.scanner();
    assert!(scanner.check_geo_object_before(&line, 2, true));
    assert_eq!(scanner.check_unknown_region(&line, 2), Some(2));
}

#[test]
fn configured_territory_with_slash_abbreviation() {
    let config = GeoConfig::from_ron_str(CONFIG).unwrap();
    let dictionaries = GeoDictionaries::from_config(&config).unwrap();
    let line = TokenLine::from_text("п/з Северная");
    let found = dictionaries
        .territories
        .try_match(&line, 0, MatchMode::FullWordsOnly)
        .unwrap();
    assert_eq!(found.canonical(), "ПРОМЗОНА");
    assert_eq!(found.end, 2);

    let session = GeoSession::from_config(&dictionaries, &config);
    assert_eq!(session.scanner().check_territory(&line, 0), Some(2));
}

#[test]
fn plot_counts_in_gar_address_mode() {
    let config = GeoConfig::from_ron_str(CONFIG).unwrap();
    let dictionaries = GeoDictionaries::from_config(&config).unwrap();
    let session = GeoSession::from_config(&dictionaries, &config);
    let line = TokenLine::from_text("уч-к Лесной");
    assert_eq!(session.scanner().check_territory(&line, 0), Some(2));
}

#[test]
fn duplicate_configured_territory_is_a_build_error() {
    let config = GeoConfig::from_ron_str(
        r#"(extra_territories: [(canonical: "территория")])"#,
    )
    .unwrap();
    let err = GeoDictionaries::from_config(&config).unwrap_err();
    assert_eq!(
        err,
        TermError::DuplicateCanonical {
            canonical: "ТЕРРИТОРИЯ".to_string()
        }
    );
    let err: GeoError = err.into();
    assert!(err.to_string().contains("ТЕРРИТОРИЯ"));
}
