use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::models::classifier_trait::ClassifierModel;

/// Brute-force k-nearest-neighbour vote with Euclidean distance and uniform weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNNClassifier {
    k: usize,
    train_x: Option<Array2<f64>>,
    train_y: Option<Array1<bool>>,
}

impl KNNClassifier {
    pub const DEFAULT_K: usize = 5;

    pub fn new(k: usize) -> Self {
        KNNClassifier {
            k: k.max(1),
            train_x: None,
            train_y: None,
        }
    }

    fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(l, r)| (l - r) * (l - r)).sum()
    }
}

impl Default for KNNClassifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}

impl ClassifierModel for KNNClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<bool>) -> Result<()> {
        if x.nrows() < self.k {
            return Err(ClassifierError::training(
                self.name(),
                format!("{} training rows for k = {}", x.nrows(), self.k),
            ));
        }
        self.train_x = Some(x.to_owned());
        self.train_y = Some(y.to_owned());
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let (train_x, train_y) = match (&self.train_x, &self.train_y) {
            (Some(tx), Some(ty)) => (tx, ty),
            _ => return Err(ClassifierError::ModelNotReady),
        };
        if x.ncols() != train_x.ncols() {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: train_x.ncols(),
                got: x.ncols(),
            });
        }

        let probs = x
            .axis_iter(Axis(0))
            .map(|query| {
                let mut distances: Vec<(f64, usize)> = train_x
                    .axis_iter(Axis(0))
                    .enumerate()
                    .map(|(i, row)| (Self::squared_distance(query, row), i))
                    .collect();
                // Ties resolve to the earlier training row.
                distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                let votes = distances
                    .iter()
                    .take(self.k)
                    .filter(|(_, i)| train_y[*i])
                    .count();
                votes as f64 / self.k as f64
            })
            .collect();
        Ok(probs)
    }

    fn name(&self) -> &str {
        "K-Nearest Neighbors"
    }
}
