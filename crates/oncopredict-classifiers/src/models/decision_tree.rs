use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// Unpruned Gini decision tree backed by `linfa-trees`.
///
/// Leaves of a fully grown tree are pure, so the probability is the leaf vote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    model: Option<DecisionTree<f64, bool>>,
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClassifierModel for DecisionTreeClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        let dataset = Dataset::new(x.to_owned(), y.to_owned());
        let fitted = DecisionTree::params()
            .fit(&dataset)
            .map_err(|e| ClassifierError::training(self.name(), e))?;
        self.model = Some(fitted);
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let model = self.model.as_ref().ok_or(ClassifierError::ModelNotReady)?;
        let predicted: Array1<bool> = model.predict(x);
        Ok(predicted.mapv(|malignant| if malignant { 1.0 } else { 0.0 }))
    }

    fn name(&self) -> &str {
        "Decision Tree"
    }
}
