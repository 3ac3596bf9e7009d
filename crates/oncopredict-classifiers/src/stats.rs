use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Binary confusion counts with malignant (`true`) as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl ConfusionCounts {
    pub fn from_predictions(truth: &Array1<bool>, predicted: &Array1<bool>) -> Self {
        assert_eq!(
            truth.len(),
            predicted.len(),
            "truth and predictions must have equal lengths"
        );
        let mut counts = ConfusionCounts::default();
        for (&t, &p) in truth.iter().zip(predicted.iter()) {
            match (t, p) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (true, false) => counts.fn_ += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }
}

/// Divide, returning 0 when the denominator is 0.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Accuracy, F1, precision and recall of one candidate on one partition.
///
/// Undefined precision, recall or F1 (zero denominators) are reported as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationScores {
    pub accuracy: f64,
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
}

impl ClassificationScores {
    pub fn from_counts(c: &ConfusionCounts) -> Self {
        let precision = ratio(c.tp, c.tp + c.fp);
        let recall = ratio(c.tp, c.tp + c.fn_);
        // 2TP / (2TP + FP + FN) equals the harmonic mean where it is defined.
        let f1 = ratio(2 * c.tp, 2 * c.tp + c.fp + c.fn_);
        ClassificationScores {
            accuracy: ratio(c.tp + c.tn, c.total()),
            f1,
            precision,
            recall,
        }
    }

    pub fn compute(truth: &Array1<bool>, predicted: &Array1<bool>) -> Self {
        Self::from_counts(&ConfusionCounts::from_predictions(truth, predicted))
    }
}
