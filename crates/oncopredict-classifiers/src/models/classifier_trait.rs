use ndarray::{Array1, Array2};

use crate::error::Result;

/// Contract shared by every candidate classifier.
///
/// Labels use the crate convention (`true` = malignant). Inputs are expected
/// to be already standardized.
pub trait ClassifierModel {
    /// Fit the model on a training partition.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()>;

    /// Probability (0..1) that each row is malignant.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Predicted class per row; malignant iff its probability exceeds 0.5.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<bool>> {
        Ok(self.predict_proba(x)?.mapv(|p| p > 0.5))
    }

    /// Human readable name of the model
    fn name(&self) -> &str {
        "classifier"
    }
}
