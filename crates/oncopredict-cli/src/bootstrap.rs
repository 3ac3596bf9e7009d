//! Startup: load the persisted scaler and model, or train and persist them.
use anyhow::{Context, Result};
use serde::Serialize;

use oncopredict_classifiers::io::read_dataset;
use oncopredict_classifiers::model_selection::{train_and_select, TrainingReport};
use oncopredict_classifiers::persistence::ArtifactStore;
use oncopredict_classifiers::predictor::Predictor;

use crate::config::AppConfig;
use crate::util::validate_dataset_file;

/// Payload of `GET /api/model-info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub features_count: usize,
    pub feature_names: Vec<String>,
    pub training_approach: String,
    pub model_selection: String,
    pub data_preprocessing: String,
}

impl ModelInfo {
    pub fn describe(predictor: &Predictor) -> Self {
        ModelInfo {
            model_type: predictor.model_type().to_string(),
            features_count: predictor.feature_names().len(),
            feature_names: predictor.feature_names().to_vec(),
            training_approach: "Cleaned data with outlier removal (Z-score > 3)".to_string(),
            model_selection: "Best F1 score on validation set".to_string(),
            data_preprocessing: "StandardScaler on cleaned dataset".to_string(),
        }
    }
}

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppContext {
    pub predictor: Predictor,
    pub model_info: ModelInfo,
}

impl AppContext {
    pub fn new(predictor: Predictor) -> Self {
        let model_info = ModelInfo::describe(&predictor);
        AppContext {
            predictor,
            model_info,
        }
    }
}

/// Train on the configured dataset and overwrite the stored artifacts.
pub fn train_and_persist(config: &AppConfig) -> Result<(Predictor, TrainingReport)> {
    validate_dataset_file(&config.dataset_path)?;
    let dataset = read_dataset(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", config.dataset_path.display()))?;

    let outcome = train_and_select(&dataset, &config.training)
        .with_context(|| "Training failed: no model could be selected")?;

    let store = ArtifactStore::new(&config.models_dir);
    store
        .save(&outcome.scaler, &outcome.model)
        .with_context(|| format!("Failed to save model to {}", config.models_dir.display()))?;

    Ok((
        Predictor::new(outcome.scaler, outcome.model),
        outcome.report,
    ))
}

/// Load both artifacts when present; otherwise train and persist.
pub fn load_or_train(config: &AppConfig) -> Result<AppContext> {
    let store = ArtifactStore::new(&config.models_dir);
    let predictor = if store.exists() {
        let (scaler, model) = store
            .load()
            .with_context(|| format!("Failed to load model from {}", store.dir().display()))?;
        Predictor::new(scaler, model)
    } else {
        if store.partially_exists() {
            log::warn!(
                "Only one of the model artifacts exists in {}; retraining",
                store.dir().display()
            );
        } else {
            log::info!("No saved model in {}; training", store.dir().display());
        }
        let (predictor, _) = train_and_persist(config)?;
        predictor
    };

    log::info!(
        "Serving {} with {} features",
        predictor.model_type(),
        predictor.feature_names().len()
    );
    Ok(AppContext::new(predictor))
}
