//! Outlier removal, partitioning, scaling, candidate training and
//! validation-F1 model selection.
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{CandidateKind, TrainingConfig};
use crate::data_handling::{split_dataset, Dataset, SplitSizes};
use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::build_model;
use crate::models::Classifier;
use crate::preprocessing::{fit_scaler, remove_outliers, transform_all, Scaler};
use crate::stats::ClassificationScores;

/// Validation metrics of one fitted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScores {
    pub kind: CandidateKind,
    pub validation: ClassificationScores,
}

/// Everything worth logging or rendering about one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub seed: u64,
    pub outlier_z_threshold: f64,
    pub rows_before: usize,
    pub outliers_removed: usize,
    pub split: SplitSizes,
    pub feature_names: Vec<String>,
    /// In the order the candidates were trained.
    pub candidates: Vec<CandidateScores>,
    pub selected: CandidateKind,
    /// Held-out metrics of the selected model. Never used for selection.
    pub test: ClassificationScores,
    /// RFC 3339 timestamp of the end of training.
    pub trained_at: String,
}

impl TrainingReport {
    pub fn rows_after(&self) -> usize {
        self.rows_before - self.outliers_removed
    }

    pub fn selected_scores(&self) -> Option<&CandidateScores> {
        self.candidates.iter().find(|c| c.kind == self.selected)
    }
}

#[derive(Debug)]
pub struct TrainingOutcome {
    pub scaler: Scaler,
    pub model: Classifier,
    pub report: TrainingReport,
}

/// Index of the candidate with the highest validation F1. Ties keep the
/// earliest one.
pub fn select_best(scores: &[CandidateScores]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in scores.iter().enumerate() {
        match best {
            Some((_, f1)) if s.validation.f1 <= f1 => {}
            _ => best = Some((i, s.validation.f1)),
        }
    }
    best.map(|(i, _)| i)
}

/// Run the full pipeline on `dataset` and return the fitted scaler, the
/// selected model and a report.
pub fn train_and_select(dataset: &Dataset, config: &TrainingConfig) -> Result<TrainingOutcome> {
    config
        .validate()
        .map_err(ClassifierError::InvalidConfig)?;

    dataset.log_input_data_summary();
    let rows_before = dataset.nrows();
    let (cleaned, outliers_removed) = remove_outliers(dataset, config.outlier_z_threshold);
    log::info!(
        "Removed {} outlier rows (|z| > {}); {} rows remain",
        outliers_removed,
        config.outlier_z_threshold,
        cleaned.nrows()
    );
    if cleaned.is_empty() {
        return Err(ClassifierError::InsufficientData {
            available: 0,
            required: SplitSizes::min_rows(config.validation_fraction, config.test_fraction)?,
        });
    }

    let partitions = split_dataset(
        &cleaned,
        config.validation_fraction,
        config.test_fraction,
        config.seed,
    )?;
    let split = partitions.sizes();
    log::info!(
        "Split into {} train, {} validation and {} test rows",
        split.train,
        split.validation,
        split.test
    );

    let scaler = fit_scaler(&partitions.train.x, &cleaned.feature_names)?;
    let train_x = transform_all(&partitions.train.x, &scaler)?;
    let val_x = transform_all(&partitions.validation.x, &scaler)?;
    let test_x = transform_all(&partitions.test.x, &scaler)?;

    let mut fitted: Vec<Classifier> = Vec::with_capacity(config.candidates.len());
    let mut scores: Vec<CandidateScores> = Vec::with_capacity(config.candidates.len());
    for &kind in &config.candidates {
        let mut model = build_model(kind, config.seed);
        log::debug!("Training {}", kind);
        model.fit(&train_x, &partitions.train.y)?;

        let predicted = model.predict(&val_x)?;
        let validation = ClassificationScores::compute(&partitions.validation.y, &predicted);
        log::info!(
            "{}: validation F1 = {:.4}, accuracy = {:.4}",
            kind,
            validation.f1,
            validation.accuracy
        );
        scores.push(CandidateScores { kind, validation });
        fitted.push(model);
    }

    let best = select_best(&scores).ok_or_else(|| {
        ClassifierError::training("model selection", "no candidate was trained")
    })?;
    let model = fitted.swap_remove(best);
    let selected = model.kind();

    let test_predicted = model.predict(&test_x)?;
    let test = ClassificationScores::compute(&partitions.test.y, &test_predicted);
    log::info!(
        "Selected {} (validation F1 = {:.4}); test accuracy = {:.4}, test F1 = {:.4}",
        selected,
        scores[best].validation.f1,
        test.accuracy,
        test.f1
    );

    let report = TrainingReport {
        seed: config.seed,
        outlier_z_threshold: config.outlier_z_threshold,
        rows_before,
        outliers_removed,
        split,
        feature_names: scaler.feature_names.clone(),
        candidates: scores,
        selected,
        test,
        trained_at: Utc::now().to_rfc3339(),
    };

    Ok(TrainingOutcome {
        scaler,
        model,
        report,
    })
}
