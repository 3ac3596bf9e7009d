//! Saving and reloading the scaler and selected model.

mod common;

use std::fs;

use oncopredict_classifiers::config::{CandidateKind, TrainingConfig};
use oncopredict_classifiers::error::ClassifierError;
use oncopredict_classifiers::model_selection::train_and_select;
use oncopredict_classifiers::persistence::{ArtifactStore, MODEL_FILE, SCALER_FILE};
use oncopredict_classifiers::predictor::Predictor;
use tempfile::tempdir;

#[test]
fn saved_artifacts_reload_to_identical_predictions() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("models"));
    assert!(!store.exists());

    let ds = common::synthetic_dataset(90, 40);
    let cfg = TrainingConfig::default().with_candidates(vec![
        CandidateKind::SupportVectorMachine,
        CandidateKind::ExtraTrees,
    ]);
    let outcome = train_and_select(&ds, &cfg).unwrap();
    store.save(&outcome.scaler, &outcome.model).unwrap();
    assert!(store.exists());
    assert!(store.scaler_path().ends_with(SCALER_FILE));
    assert!(store.model_path().ends_with(MODEL_FILE));

    let (scaler, model) = store.load().unwrap();
    assert_eq!(scaler, outcome.scaler);
    assert_eq!(model.kind(), outcome.model.kind());

    let original = Predictor::new(outcome.scaler, outcome.model);
    let reloaded = Predictor::new(scaler, model);
    assert_eq!(reloaded.feature_names(), original.feature_names());
    for row in ds.x.rows() {
        let row = row.to_vec();
        assert_eq!(reloaded.predict(&row).unwrap(), original.predict(&row).unwrap());
    }
}

#[test]
fn lone_artifact_is_partial() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    fs::write(store.scaler_path(), "{}").unwrap();
    assert!(!store.exists());
    assert!(store.partially_exists());
}

#[test]
fn missing_artifacts_are_io_errors() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    assert!(matches!(store.load(), Err(ClassifierError::Io { .. })));
}

#[test]
fn corrupt_artifacts_are_serialization_errors() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    fs::write(store.scaler_path(), "not json").unwrap();
    fs::write(store.model_path(), "not json").unwrap();
    assert!(matches!(
        store.load(),
        Err(ClassifierError::Serialization { .. })
    ));
}
