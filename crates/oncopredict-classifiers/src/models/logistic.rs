use linfa::traits::Fit;
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// L2-regularized logistic regression backed by `linfa-logistic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    max_iterations: u64,
    model: Option<FittedLogisticRegression<f64, bool>>,
}

impl LogisticClassifier {
    /// Iteration cap high enough for the optimizer to converge on 30 features.
    pub const DEFAULT_MAX_ITERATIONS: u64 = 3500;

    pub fn new(max_iterations: u64) -> Self {
        LogisticClassifier {
            max_iterations,
            model: None,
        }
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITERATIONS)
    }
}

impl ClassifierModel for LogisticClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        if y.iter().all(|&l| l) || y.iter().all(|&l| !l) {
            return Err(ClassifierError::training(
                self.name(),
                "training partition must contain both classes",
            ));
        }
        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let fitted = LogisticRegression::default()
            .max_iterations(self.max_iterations)
            .fit(&dataset)
            .map_err(|e| ClassifierError::training(self.name(), e))?;
        self.model = Some(fitted);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelNotReady)?;
        // Probability of the larger label, i.e. `true` (malignant).
        Ok(model.predict_probabilities(x))
    }

    fn name(&self) -> &str {
        "Logistic Regression"
    }
}
