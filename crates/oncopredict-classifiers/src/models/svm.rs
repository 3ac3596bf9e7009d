use linfa::dataset::Pr;
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// RBF support vector classifier with Platt-scaled probability output.
#[derive(Serialize, Deserialize)]
pub struct SVMClassifier {
    /// Penalty for misclassified positives and negatives.
    c: (f64, f64),
    model: Option<Svm<f64, Pr>>,
}

impl SVMClassifier {
    pub fn new(c: (f64, f64)) -> Self {
        SVMClassifier { c, model: None }
    }

    /// Gaussian kernel width equivalent to `gamma = 1 / (n_features * var(x))`.
    fn kernel_eps(x: &Array2<f64>) -> f64 {
        let mean = x.mean().unwrap_or(0.0);
        let var = x.mapv(|v| (v - mean).powi(2)).mean().unwrap_or(0.0);
        let eps = x.ncols() as f64 * var;
        if eps > 0.0 {
            eps
        } else {
            1.0
        }
    }
}

impl Default for SVMClassifier {
    fn default() -> Self {
        Self::new((1.0, 1.0))
    }
}

impl ClassifierModel for SVMClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        let dataset = Dataset::new(x.to_owned(), y.to_owned());

        let (c1, c2) = self.c;
        let params: SvmParams<f64, Pr> = Svm::<f64, Pr>::params()
            .pos_neg_weights(c1, c2)
            .gaussian_kernel(Self::kernel_eps(x));

        let model = <SvmParams<f64, Pr> as Fit<_, _, _>>::fit(&params, &dataset)
            .map_err(|e| ClassifierError::training(self.name(), e))?;
        self.model = Some(model);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelNotReady)?;
        let predictions: Array1<Pr> = model.predict(x);
        Ok(predictions.iter().map(|&p| f64::from(*p)).collect())
    }

    fn name(&self) -> &str {
        "Support Vector Machine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svm_classifier() {
        // Target perfectly correlated with the second feature
        let x = Array2::from_shape_vec(
            (10, 3),
            vec![
                0.1, 1.0, 0.2, 0.4, -1.0, 0.8, 0.6, 1.1, 1.2, 0.9, -0.9, 1.8, 1.2, 1.0, 2.4, 1.5,
                -1.0, 3.0, 1.8, 0.9, 3.6, 2.1, -1.1, 4.2, 2.4, 1.0, 4.8, 2.7, -1.0, 5.4,
            ],
        )
        .unwrap();
        let y = Array1::from_iter((0..10).map(|i| i % 2 == 0));

        let mut classifier = SVMClassifier::default();
        classifier.fit(&x, &y).unwrap();

        let probs = classifier.predict_proba(&x).unwrap();
        assert_eq!(probs.len(), 10);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));

        let predicted = classifier.predict(&x).unwrap();
        assert_eq!(predicted, probs.mapv(|p| p > 0.5));
    }

    #[test]
    fn unfitted_model_is_not_ready() {
        let classifier = SVMClassifier::default();
        let x = Array2::zeros((1, 3));
        assert!(matches!(
            classifier.predict_proba(&x),
            Err(ClassifierError::ModelNotReady)
        ));
    }
}
