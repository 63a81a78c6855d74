use conditional_core::Field;
use conditional_http::{ConfigError, HttpPrecondition, PreconditionConfig, PreconditionEntry};
use pretty_assertions::assert_eq;

fn fields(config: PreconditionConfig) -> Vec<String> {
    config
        .into_set()
        .expect("valid configuration")
        .fields()
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_missing_key_enables_all_preconditions() {
    let config: PreconditionConfig = serde_saphyr::from_str("{}").expect("failed to deserialize");

    assert_eq!(config, PreconditionConfig::default());
    assert_eq!(
        fields(config),
        vec![
            "if-match",
            "if-unmodified-since",
            "if-none-match",
            "if-modified-since",
            "if-range",
        ]
    );
}

#[test]
fn test_configured_preconditions_are_sorted() {
    let yaml = r#"
preconditions:
  - type: IfRange
  - type: IfNoneMatch
  - type: IfMatch
"#;

    let config: PreconditionConfig = serde_saphyr::from_str(yaml).expect("failed to deserialize");

    assert_eq!(
        config.preconditions[0],
        PreconditionEntry::IfRange {
            units: vec!["bytes".to_owned()]
        }
    );
    assert_eq!(fields(config), vec!["if-match", "if-none-match", "if-range"]);
}

#[test]
fn test_empty_list_disables_evaluation() {
    let config: PreconditionConfig =
        serde_saphyr::from_str("preconditions: []").expect("failed to deserialize");

    assert!(config.into_set().unwrap().is_empty());
}

#[test]
fn test_range_units() {
    let yaml = r#"
preconditions:
  - type: IfRange
    units: [Bytes]
"#;
    let config: PreconditionConfig = serde_saphyr::from_str(yaml).expect("failed to deserialize");
    let set = config.into_set().unwrap();

    match set.iter().next() {
        Some(HttpPrecondition::IfRange(if_range)) => {
            let units: Vec<&str> = if_range.ranges().iter().map(|r| r.unit()).collect();
            assert_eq!(units, vec!["bytes"]);
        }
        other => panic!("expected If-Range, got {other:?}"),
    }
}

#[test]
fn test_invalid_configurations() {
    let unsupported = r#"
preconditions:
  - type: IfRange
    units: [lines]
"#;
    let config: PreconditionConfig =
        serde_saphyr::from_str(unsupported).expect("failed to deserialize");
    assert_eq!(
        config.into_set().unwrap_err(),
        ConfigError::UnsupportedRangeUnit("lines".to_owned())
    );

    let no_units = PreconditionConfig {
        preconditions: vec![PreconditionEntry::IfRange { units: vec![] }],
    };
    assert_eq!(no_units.into_set().unwrap_err(), ConfigError::NoRangeUnits);

    let duplicate = PreconditionConfig {
        preconditions: vec![PreconditionEntry::IfMatch, PreconditionEntry::IfMatch],
    };
    assert_eq!(
        duplicate.into_set().unwrap_err(),
        ConfigError::Duplicate("if-match".to_owned())
    );
}

#[test]
fn test_json_round_trip() {
    let config = PreconditionConfig {
        preconditions: vec![PreconditionEntry::IfNoneMatch, PreconditionEntry::IfModifiedSince],
    };

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(
        json,
        r#"{"preconditions":[{"type":"IfNoneMatch"},{"type":"IfModifiedSince"}]}"#
    );
    let parsed: PreconditionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    assert_eq!(parsed.into_set().unwrap().iter().map(|p| p.field()).count(), 2);
}
