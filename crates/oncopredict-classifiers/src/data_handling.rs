//! Labelled diagnostic datasets and the deterministic train/validation/test split.
//!
//! Labels follow the crate convention: `true` is malignant, `false` is benign.
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ClassifierError, Result};

/// Feature columns of the Wisconsin diagnostic breast cancer data, in canonical order.
pub const FEATURE_NAMES: [&str; 30] = [
    "mean radius",
    "mean texture",
    "mean perimeter",
    "mean area",
    "mean smoothness",
    "mean compactness",
    "mean concavity",
    "mean concave points",
    "mean symmetry",
    "mean fractal dimension",
    "radius error",
    "texture error",
    "perimeter error",
    "area error",
    "smoothness error",
    "compactness error",
    "concavity error",
    "concave points error",
    "symmetry error",
    "fractal dimension error",
    "worst radius",
    "worst texture",
    "worst perimeter",
    "worst area",
    "worst smoothness",
    "worst compactness",
    "worst concavity",
    "worst concave points",
    "worst symmetry",
    "worst fractal dimension",
];

/// Smallest training partition every candidate can be fit on (k of the neighbour model).
pub const MIN_TRAINING_ROWS: usize = 5;

pub fn default_feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<bool>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<bool>, feature_names: Vec<String>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::dataset(
                None,
                format!("{} feature rows but {} labels", x.nrows(), y.len()),
            ));
        }
        if x.ncols() != feature_names.len() {
            return Err(ClassifierError::dataset(
                None,
                format!(
                    "{} feature columns but {} feature names",
                    x.ncols(),
                    feature_names.len()
                ),
            ));
        }
        if let Some((row, _)) = x
            .axis_iter(Axis(0))
            .enumerate()
            .find(|(_, r)| r.iter().any(|v| !v.is_finite()))
        {
            return Err(ClassifierError::dataset(Some(row + 1), "non-finite feature value"));
        }
        Ok(Dataset { x, y, feature_names })
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn n_malignant(&self) -> usize {
        self.y.iter().filter(|&&v| v).count()
    }

    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
        }
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!(
            "{} malignant and {} benign rows",
            self.n_malignant(),
            self.nrows() - self.n_malignant()
        );
        log::info!("{} feature columns", self.x.ncols());
        log::info!("------------------------------");
    }
}

/// Row counts of each partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SplitSizes {
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

impl SplitSizes {
    /// `ceil(n * fraction)` rows for validation and test, the rest for training.
    pub fn for_rows(n: usize, validation_fraction: f64, test_fraction: f64) -> Result<Self> {
        let test = (n as f64 * test_fraction).ceil() as usize;
        let validation = (n as f64 * validation_fraction).ceil() as usize;
        let held_out = test + validation;
        let required = Self::min_rows(validation_fraction, test_fraction)?;
        if n < required || held_out >= n || n - held_out < MIN_TRAINING_ROWS || test == 0 || validation == 0 {
            return Err(ClassifierError::InsufficientData {
                available: n,
                required,
            });
        }
        Ok(SplitSizes {
            train: n - held_out,
            validation,
            test,
        })
    }

    /// Smallest row count that leaves `MIN_TRAINING_ROWS` for training.
    ///
    /// Both fractions must lie in (0, 1) and sum to less than 1, otherwise no
    /// row count qualifies.
    pub fn min_rows(validation_fraction: f64, test_fraction: f64) -> Result<usize> {
        check_split_fractions(validation_fraction, test_fraction)?;
        let mut n = MIN_TRAINING_ROWS + 2;
        loop {
            let test = (n as f64 * test_fraction).ceil() as usize;
            let validation = (n as f64 * validation_fraction).ceil() as usize;
            if test + validation < n && n - test - validation >= MIN_TRAINING_ROWS {
                return Ok(n);
            }
            n += 1;
        }
    }
}

/// Why a pair of held-out fractions cannot leave a training partition, if it cannot.
pub fn split_fraction_problem(validation_fraction: f64, test_fraction: f64) -> Option<&'static str> {
    let valid = |v: f64| v > 0.0 && v < 1.0;
    if !valid(validation_fraction) || !valid(test_fraction) {
        Some("validation_fraction and test_fraction must lie in (0, 1)")
    } else if validation_fraction + test_fraction >= 1.0 {
        Some("validation_fraction + test_fraction must be below 1")
    } else {
        None
    }
}

fn check_split_fractions(validation_fraction: f64, test_fraction: f64) -> Result<()> {
    match split_fraction_problem(validation_fraction, test_fraction) {
        Some(problem) => Err(ClassifierError::InvalidConfig(problem.to_string())),
        None => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct Partitions {
    pub train: Dataset,
    pub validation: Dataset,
    pub test: Dataset,
}

impl Partitions {
    pub fn sizes(&self) -> SplitSizes {
        SplitSizes {
            train: self.train.nrows(),
            validation: self.validation.nrows(),
            test: self.test.nrows(),
        }
    }
}

/// Shuffle row indices with a seeded RNG and cut them into test, validation and train.
pub fn split_dataset(
    dataset: &Dataset,
    validation_fraction: f64,
    test_fraction: f64,
    seed: u64,
) -> Result<Partitions> {
    let sizes = SplitSizes::for_rows(dataset.nrows(), validation_fraction, test_fraction)?;

    let mut indices: Vec<usize> = (0..dataset.nrows()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, rest) = indices.split_at(sizes.test);
    let (val_idx, train_idx) = rest.split_at(sizes.validation);

    Ok(Partitions {
        train: dataset.select_rows(train_idx),
        validation: dataset.select_rows(val_idx),
        test: dataset.select_rows(test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy(n: usize) -> Dataset {
        let x = Array2::from_shape_fn((n, 2), |(r, c)| (r * 2 + c) as f64);
        let y = Array1::from_iter((0..n).map(|r| r % 2 == 0));
        Dataset::new(x, y, vec!["a".into(), "b".into()]).unwrap()
    }

    #[test]
    fn split_is_seeded_and_disjoint() {
        let ds = toy(100);
        let a = split_dataset(&ds, 0.15, 0.15, 42).unwrap();
        let b = split_dataset(&ds, 0.15, 0.15, 42).unwrap();
        assert_eq!(a.sizes(), SplitSizes { train: 70, validation: 15, test: 15 });
        assert_eq!(a.train.x, b.train.x);
        assert_eq!(a.test.x, b.test.x);

        let mut seen: Vec<f64> = a
            .train
            .x
            .column(0)
            .iter()
            .chain(a.validation.x.column(0).iter())
            .chain(a.test.x.column(0).iter())
            .copied()
            .collect();
        seen.sort_by(|l, r| l.partial_cmp(r).unwrap());
        seen.dedup();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn split_rejects_tiny_dataset() {
        let ds = toy(4);
        match split_dataset(&ds, 0.15, 0.15, 1) {
            Err(ClassifierError::InsufficientData { available, required }) => {
                assert_eq!(available, 4);
                assert!(required > 4);
            }
            other => panic!("expected InsufficientData, got {:?}", other.map(|p| p.sizes())),
        }
    }

    #[test]
    fn min_rows_leaves_training_rows() {
        let n = SplitSizes::min_rows(0.15, 0.15).unwrap();
        let sizes = SplitSizes::for_rows(n, 0.15, 0.15).unwrap();
        assert!(sizes.train >= MIN_TRAINING_ROWS);
        assert!(SplitSizes::for_rows(n - 1, 0.15, 0.15).is_err());
    }

    #[test]
    fn unusable_fractions_are_rejected() {
        for (validation, test) in [(0.6, 0.5), (0.5, 0.5), (0.0, 0.15), (0.15, 1.0), (f64::NAN, 0.15)] {
            assert!(matches!(
                SplitSizes::for_rows(100, validation, test),
                Err(ClassifierError::InvalidConfig(_))
            ));
            assert!(SplitSizes::min_rows(validation, test).is_err());
        }
    }

    #[test]
    fn dataset_rejects_non_finite() {
        let x = Array2::from_shape_vec((2, 1), vec![1.0, f64::NAN]).unwrap();
        let y = Array1::from_vec(vec![true, false]);
        assert!(Dataset::new(x, y, vec!["a".into()]).is_err());
    }
}
