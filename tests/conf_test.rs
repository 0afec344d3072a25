use fountain_outline::api;
use fountain_outline::error::FountainError;
use fountain_outline::models::{Conf, ElementType};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_conf_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{
            "use_dual_dialogue": false,
            "extra_times_of_day": ["GOLDEN HOUR"],
            "dial_sec_per_char": 0.5
        }"#,
    )
    .unwrap();

    let conf = Conf::load(&path).unwrap();
    assert!(!conf.use_dual_dialogue);
    assert_eq!(conf.extra_times_of_day, vec!["GOLDEN HOUR"]);
    assert_eq!(conf.dial_sec_per_char, 0.5);
    assert_eq!(conf.action_sec_per_char, 0.4, "未指定的字段使用默认值");
}

#[test]
fn test_invalid_conf_files() {
    let dir = TempDir::new().unwrap();

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(Conf::load(&broken), Err(FountainError::JsonError(_))));

    let negative = dir.path().join("negative.json");
    fs::write(&negative, r#"{"dial_sec_per_punc_long": -0.5}"#).unwrap();
    assert!(matches!(Conf::load(&negative), Err(FountainError::InvalidConfig(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(Conf::load(&missing), Err(FountainError::IoError(_))));
}

#[test]
fn test_parse_and_write_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("scene.fountain");
    fs::write(&input, "EXT. BEACH - GOLDEN HOUR\n\nWaves.\n\nA\nHi.\n\nB ^\nHello.\n").unwrap();

    let conf = Conf {
        use_dual_dialogue: false,
        extra_times_of_day: vec!["GOLDEN HOUR".to_string()],
        ..Conf::default()
    };
    let screenplay = api::parse_file(&input, &conf).unwrap();
    assert_eq!(screenplay.filename(), Some("scene.fountain"));

    let heading = &screenplay.elements()[0];
    assert_eq!(heading.element_type(), ElementType::SceneHeading);
    assert_eq!(
        heading.location().and_then(|l| l.time_of_day.as_deref()),
        Some("GOLDEN HOUR")
    );
    assert!(screenplay.elements().iter().all(|e| !e.is_dual_dialogue()));

    let output = dir.path().join("out.fountain");
    api::write_file(&output, &screenplay, Default::default()).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "EXT. BEACH - GOLDEN HOUR #1#\n\nWaves.\n\nA\nHi.\n\nB\nHello.\n");
}

#[test]
fn test_stats_json() {
    let screenplay = fountain_outline::parse("INT. HOUSE - DAY\n\nJOHN\nHi.");
    let json = api::properties_json(&screenplay, &Conf::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["characters"]["JOHN"], serde_json::json!([1]));
    assert_eq!(value["locations"]["HOUSE"], serde_json::json!([1]));
    assert_eq!(value["scenes"][0]["number"], "1");
}
