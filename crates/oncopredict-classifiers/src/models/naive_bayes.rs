use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// Per-class Gaussian statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassStats {
    log_prior: f64,
    mean: Array1<f64>,
    var: Array1<f64>,
}

impl ClassStats {
    fn joint_log_likelihood(&self, row: ndarray::ArrayView1<f64>) -> f64 {
        let ln_2pi = (2.0 * std::f64::consts::PI).ln();
        let mut ll = self.log_prior;
        for ((v, m), var) in row.iter().zip(self.mean.iter()).zip(self.var.iter()) {
            ll -= 0.5 * (ln_2pi + var.ln()) + (v - m).powi(2) / (2.0 * var);
        }
        ll
    }
}

/// Gaussian naive Bayes with variance smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNBClassifier {
    /// Fraction of the largest feature variance added to every variance.
    var_smoothing: f64,
    /// Stats for (benign, malignant).
    classes: Option<(ClassStats, ClassStats)>,
}

impl GaussianNBClassifier {
    pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

    pub fn new(var_smoothing: f64) -> Self {
        GaussianNBClassifier {
            var_smoothing,
            classes: None,
        }
    }

    fn class_stats(x: &Array2<f64>, rows: &[usize], n_total: usize, epsilon: f64) -> ClassStats {
        let sub = x.select(Axis(0), rows);
        let mean = sub
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(x.ncols()));
        let var = sub.var_axis(Axis(0), 0.0) + epsilon;
        ClassStats {
            log_prior: (rows.len() as f64 / n_total as f64).ln(),
            mean,
            var,
        }
    }
}

impl Default for GaussianNBClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR_SMOOTHING)
    }
}

impl ClassifierModel for GaussianNBClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        let (malignant, benign): (Vec<usize>, Vec<usize>) = (0..y.len()).partition(|&i| y[i]);
        if malignant.is_empty() || benign.is_empty() {
            return Err(ClassifierError::training(
                self.name(),
                "training partition must contain both classes",
            ));
        }

        let max_var = x
            .var_axis(Axis(0), 0.0)
            .iter()
            .copied()
            .fold(0.0_f64, f64::max);
        // Keep variances strictly positive even for all-constant data.
        let epsilon = (self.var_smoothing * max_var).max(f64::MIN_POSITIVE);

        let n = y.len();
        self.classes = Some((
            Self::class_stats(x, &benign, n, epsilon),
            Self::class_stats(x, &malignant, n, epsilon),
        ));
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let (benign, malignant) = self.classes.as_ref().ok_or(ClassifierError::ModelNotReady)?;
        Ok(x
            .axis_iter(Axis(0))
            .map(|row| {
                let lb = benign.joint_log_likelihood(row);
                let lm = malignant.joint_log_likelihood(row);
                // Two-class softmax, computed stably.
                1.0 / (1.0 + (lb - lm).exp())
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Naive Bayes"
    }
}
