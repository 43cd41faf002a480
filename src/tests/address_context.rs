use crate::{
    CityItem, CityItemKind, EntityId, GeoClass, GeoEntity, GeoSession, Gender, MorphClass,
    MorphInfo, RecognizedEntity, SpanRef, StaticLexicon, TerrItem, TokenLine, TokenLineDisplay,
};

fn lexicon() -> StaticLexicon {
    StaticLexicon::function_words()
        .with(
            "проживает",
            MorphInfo::new(MorphClass::VERB).with_lemma("проживать"),
        )
        .with("московской", StaticLexicon::adjective("московский", Gender::FEMININE))
        .with("области", StaticLexicon::noun("область", Gender::FEMININE))
}

#[test]
fn residency_verb_before_region() {
    let session = GeoSession::shared().unwrap();
    let mut line = TokenLine::from_text_with("проживает в Московской области", &lexicon());
    line.tag_mut(2).unwrap().terr = Some(TerrItem {
        termin: Some("ОБЛАСТЬ".to_string()),
        onto: None,
        end: 3,
    });

    let scanner = session.scanner();
    assert!(scanner.check_geo_object_before(&line, 1, false));
    assert!(scanner.check_geo_object_before(&line, 2, true));

    let mut display = TokenLineDisplay::new(&line);
    display
        .include_span(SpanRef::single(0), "GeoBefore")
        .include_tags();
    insta::assert_snapshot!(display.to_string(), @r###"
    проживает в Московской области
    ╰───────╯GeoBefore
                ╰────────────────╯Terr(ОБЛАСТЬ)
    "###);
}

#[test]
fn registered_region_anchors_settlement() {
    let mut session = GeoSession::shared().unwrap();
    let region = session.register(
        GeoEntity::new(GeoClass::REGION)
            .with_name("МОСКОВСКАЯ")
            .with_type("область")
            .with_occurrence(SpanRef::new(0, 1)),
    );

    let mut line = TokenLine::from_text_with("Московская обл , пос Рассвет", &lexicon());
    line.attach_entity(SpanRef::new(0, 1), RecognizedEntity::Geo(region));
    line.tag_mut(3).unwrap().city = Some(CityItem {
        kind: CityItemKind::Noun,
        end: 3,
    });

    let scanner = session.scanner();
    assert!(scanner.check_geo_object_before_brief(&line, 4));
    assert!(scanner.check_geo_object_after(&line, 2, false, false));
    assert_eq!(region, EntityId(0));

    let mut display = TokenLineDisplay::new(&line);
    display.include_entities().include_tags();
    insta::assert_snapshot!(display.to_string(), @r###"
    Московская обл , пос Рассвет
    ╰────────────╯Geo(EntityId(0))
                     ╰─╯City(Noun)
    "###);
}

#[test]
fn newline_cuts_brief_context() {
    let session = GeoSession::shared().unwrap();
    let mut line = TokenLine::from_text_with("пос\nРассвет , улица", &lexicon());
    line.tag_mut(0).unwrap().city = Some(CityItem {
        kind: CityItemKind::Noun,
        end: 0,
    });
    let scanner = session.scanner();
    assert!(!scanner.check_geo_object_before_brief(&line, 1));
    assert!(!scanner.check_geo_object_after_brief(&line, 0));
}

#[test]
fn near_and_unknown_region_together() {
    let session = GeoSession::shared().unwrap();
    let line = TokenLine::from_text_with("дача около Подмосковье", &lexicon());
    let scanner = session.scanner();
    assert_eq!(scanner.check_unknown_region(&line, 2), Some(2));
    assert_eq!(scanner.check_near_before(&line, 2), Some(1));
}
