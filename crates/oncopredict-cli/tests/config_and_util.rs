//! Integration tests for CLI config parsing and util helpers.

use std::path::PathBuf;

use oncopredict_classifiers::config::CandidateKind;
use oncopredict_cli::config::AppConfig;
use oncopredict_cli::util::validate_dataset_file;

// ---------------------------------------------------------------------------
// validate_dataset_file
// ---------------------------------------------------------------------------

#[test]
fn validate_known_extensions() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["data.csv", "data.tsv", "wdbc.data"] {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap();
        assert!(validate_dataset_file(&path).is_ok(), "{name} rejected");
    }
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_dataset_file(&path).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_dataset_file(&PathBuf::from("/nonexistent/path/data.csv")).is_err());
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

#[test]
fn app_config_default_values() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.dataset_path, PathBuf::from("data/wdbc.csv"));
    assert_eq!(cfg.models_dir, PathBuf::from("models"));
    assert_eq!(cfg.training.seed, 42);
    assert_eq!(cfg.bind_address(), "0.0.0.0:5000");
}

#[test]
fn app_config_loads_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"port": 8080, "training": {"seed": 1, "candidates": ["svm_typo"]}}"#,
    )
    .unwrap();
    assert!(AppConfig::load(&path).is_err());

    std::fs::write(
        &path,
        r#"{"port": 8080, "training": {"seed": 1, "candidates": ["naive_bayes"]}}"#,
    )
    .unwrap();
    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.training.seed, 1);
    assert_eq!(cfg.training.test_fraction, 0.15);
    assert_eq!(cfg.training.candidates, vec![CandidateKind::NaiveBayes]);
}

#[test]
fn app_config_round_trips_json() {
    let cfg = AppConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("models_dir"));
    let cfg2: AppConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

#[test]
fn missing_config_file_errors() {
    assert!(AppConfig::load("/nonexistent/config.json").is_err());
}

#[test]
fn port_override() {
    let mut cfg = AppConfig::default();
    cfg.apply_port_override(None).unwrap();
    assert_eq!(cfg.port, 5000);

    cfg.apply_port_override(Some("")).unwrap();
    assert_eq!(cfg.port, 5000);

    cfg.apply_port_override(Some(" 8081 ")).unwrap();
    assert_eq!(cfg.port, 8081);

    assert!(cfg.apply_port_override(Some("eighty")).is_err());
    assert!(cfg.apply_port_override(Some("70000")).is_err());
    assert_eq!(cfg.port, 8081);
}
