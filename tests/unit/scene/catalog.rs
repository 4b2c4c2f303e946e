use super::*;

fn scene(title: &str) -> SceneDef {
    SceneDef {
        title: title.to_owned(),
        time_period: "1911".to_owned(),
        location: "Antarctica".to_owned(),
        one_line: "Flags at the pole.".to_owned(),
        narration: format!("{title} begins."),
        visual_keywords: vec![],
        palette: vec![],
        environment: "tundra".to_owned(),
        camera_style: "locked-off".to_owned(),
    }
}

#[test]
fn lookup_ignores_case_and_whitespace() {
    let cat = StaticCatalog::new().with_topic("South Pole", vec![scene("Arrival")]);
    let got = cat.provide("  south pole ").unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].title, "Arrival");
}

#[test]
fn unknown_topic_uses_fallback_or_fails() {
    let cat = StaticCatalog::new().with_topic("a", vec![scene("A")]);
    let err = cat.provide("b").unwrap_err();
    assert!(err.is_provider_failure());

    let cat = cat.with_fallback(vec![scene("Generic 1"), scene("Generic 2")]);
    assert_eq!(cat.provide("b").unwrap().len(), 2);
}

#[test]
fn json_catalog_parses_topics_and_fallback() {
    let json = r##"{
      "topics": {
        "moon landing": [{
          "title": "Descent", "timePeriod": "1969", "location": "Sea of Tranquility",
          "oneLine": "Eagle lands.", "narration": "Contact light.",
          "environment": "space", "cameraStyle": "orbit-slow"
        }]
      },
      "fallback": []
    }"##;
    let cat = JsonCatalog::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cat.catalog().topic_names().collect::<Vec<_>>(), vec!["moon landing"]);
    assert_eq!(cat.provide("Moon Landing").unwrap()[0].title, "Descent");
}

#[test]
fn json_catalog_reports_parse_errors() {
    let err = JsonCatalog::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse catalog JSON"));
}
