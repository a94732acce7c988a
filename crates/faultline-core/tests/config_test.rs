//! Config loading tests: TOML defaults, partial overrides, validation, files.

use std::io::Write;

use faultline_core::config::EngineConfig;
use faultline_core::errors::FaultlineError;

// ═══════════════════════════════════════════════════════════════════════════
// Defaults and partial overrides
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_toml_yields_defaults() {
    let config = EngineConfig::from_toml("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.matcher.points_per_keyword, 20);
    assert_eq!(config.elimination.max_elimination_fraction, 0.5);
    assert_eq!(config.confidence.base_confidence, 50.0);
    assert_eq!(config.historical.boost_cap, 15.0);
    assert_eq!(config.escalation.proceed_threshold, 85.0);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let toml = r#"
        [matcher]
        min_qualified_score = 35

        [confidence.level_bands]
        high = 90.0
    "#;
    let config = EngineConfig::from_toml(toml).unwrap();
    assert_eq!(config.matcher.min_qualified_score, 35);
    assert_eq!(config.matcher.qualification_threshold, 40, "untouched field keeps default");
    assert_eq!(config.confidence.level_bands.high, 90.0);
    assert_eq!(config.confidence.level_bands.medium, 65.0);
}

#[test]
fn heuristic_table_is_replaceable() {
    let toml = r#"
        [[matcher.domain_heuristics]]
        keyword_fragment = "temperature"
        signal_tokens = ["degc", "degf"]
    "#;
    let config = EngineConfig::from_toml(toml).unwrap();
    assert_eq!(config.matcher.domain_heuristics.len(), 1);
    assert_eq!(config.matcher.domain_heuristics[0].keyword_fragment, "temperature");
}

// ═══════════════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn elimination_fraction_above_one_is_rejected() {
    let err = EngineConfig::from_toml("[elimination]\nmax_elimination_fraction = 1.5").unwrap_err();
    assert!(matches!(err, FaultlineError::Config(_)), "got {err:?}");
}

#[test]
fn similarity_weights_must_sum_to_one() {
    let err = EngineConfig::from_toml("[historical]\nsymptom_weight = 0.9").unwrap_err();
    assert!(matches!(err, FaultlineError::Config(_)));
}

#[test]
fn inverted_escalation_thresholds_are_rejected() {
    let err = EngineConfig::from_toml("[escalation]\ncritical_threshold = 60.0").unwrap_err();
    assert!(matches!(err, FaultlineError::Config(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = EngineConfig::from_toml("[matcher\npoints_per_keyword = ").unwrap_err();
    assert!(matches!(err, FaultlineError::TomlParse(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// Files and round-trips
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn config_file_round_trips() {
    let mut config = EngineConfig::default();
    config.historical.max_matches = 3;
    config.elimination.rule_version = "site-rules/v7".to_string();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml::to_string(&config).unwrap().as_bytes()).unwrap();

    let loaded = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, FaultlineError::Io(_)));
}
