use std::fmt;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;
use crate::models::Classifier;
use crate::preprocessing::Scaler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub fn risk_level(&self) -> &'static str {
        match self {
            Diagnosis::Benign => "Low Risk",
            Diagnosis::Malignant => "High Risk",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnosis::Benign => f.write_str("Benign"),
            Diagnosis::Malignant => f.write_str("Malignant"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Diagnosis,
    pub probability_benign: f64,
    pub probability_malignant: f64,
    /// The larger of the two probabilities.
    pub confidence_score: f64,
}

/// Read one value per feature name through `lookup`.
///
/// Missing or blank fields become 0.0 and are returned in the second vector.
/// A value that does not parse as a finite number is an `InvalidInput`.
pub fn parse_feature_values<'a, F>(names: &[String], lookup: F) -> Result<(Vec<f64>, Vec<String>)>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut values = Vec::with_capacity(names.len());
    let mut missing = Vec::new();
    for name in names {
        let raw = lookup(name).map(str::trim).unwrap_or("");
        if raw.is_empty() {
            missing.push(name.clone());
            values.push(0.0);
            continue;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => values.push(v),
            _ => {
                return Err(ClassifierError::InvalidInput {
                    feature: name.clone(),
                    value: raw.to_string(),
                })
            }
        }
    }
    Ok((values, missing))
}

/// Scale one raw feature vector and classify it.
pub fn predict(
    scaler: &Scaler,
    model: &dyn ClassifierModel,
    features: &[f64],
) -> Result<PredictionResult> {
    if scaler.n_features() == 0 {
        return Err(ClassifierError::ModelNotReady);
    }
    let x: Array2<f64> = scaler.transform_row(features)?.insert_axis(Axis(0));

    let malignant = model.predict(&x)?[0];
    let probability_malignant = model.predict_proba(&x)?[0].clamp(0.0, 1.0);
    let probability_benign = 1.0 - probability_malignant;

    Ok(PredictionResult {
        label: if malignant {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        },
        probability_benign,
        probability_malignant,
        confidence_score: probability_benign.max(probability_malignant),
    })
}

/// Fitted scaler and selected model, loaded once and shared read-only.
#[derive(Debug)]
pub struct Predictor {
    scaler: Scaler,
    model: Classifier,
}

impl Predictor {
    pub fn new(scaler: Scaler, model: Classifier) -> Self {
        Predictor { scaler, model }
    }

    /// Names in the order the scaler was fit on.
    pub fn feature_names(&self) -> &[String] {
        &self.scaler.feature_names
    }

    pub fn model_type(&self) -> &'static str {
        self.model.kind().display_name()
    }

    pub fn predict(&self, features: &[f64]) -> Result<PredictionResult> {
        predict(&self.scaler, &self.model, features)
    }

    /// Parse string fields keyed by feature name and predict. Returns the
    /// names that were missing alongside the result.
    pub fn predict_form<'a, F>(&self, lookup: F) -> Result<(PredictionResult, Vec<String>)>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let (values, missing) = parse_feature_values(self.feature_names(), lookup)?;
        Ok((self.predict(&values)?, missing))
    }
}
