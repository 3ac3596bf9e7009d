//! Standardization and z-score outlier removal.
//!
//! The `Scaler` is fit once on the training partition, persisted next to the
//! model and reused unchanged at prediction time.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::{ClassifierError, Result};

/// Per-column standard scaler (population mean/std).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Columns with a std below this are treated as constant and scaled by 1.
    const MIN_STD: f64 = 1e-12;

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Standardize one raw feature vector.
    pub fn transform_row(&self, row: &[f64]) -> Result<Array1<f64>> {
        if row.len() != self.n_features() {
            return Err(ClassifierError::FeatureCountMismatch {
                expected: self.n_features(),
                got: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

/// Column means and population standard deviations (ddof = 0).
fn column_moments(x: &Array2<f64>) -> (Array1<f64>, Array1<f64>) {
    let mean = x
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()));
    let std = x.std_axis(Axis(0), 0.0);
    (mean, std)
}

/// Fit a `Scaler` on rows (samples) x columns (features).
pub fn fit_scaler(x: &Array2<f64>, feature_names: &[String]) -> Result<Scaler> {
    let (nrows, ncols) = x.dim();
    if nrows == 0 || ncols == 0 {
        return Err(ClassifierError::InsufficientData {
            available: nrows,
            required: 1,
        });
    }

    let (mean, std) = column_moments(x);
    let std = std.mapv(|s| if s < Scaler::MIN_STD { 1.0 } else { s });

    Ok(Scaler {
        feature_names: feature_names.to_vec(),
        mean: mean.to_vec(),
        std: std.to_vec(),
    })
}

/// Transform all rows using the provided `Scaler`.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Result<Array2<f64>> {
    if x.ncols() != sc.n_features() {
        return Err(ClassifierError::FeatureCountMismatch {
            expected: sc.n_features(),
            got: x.ncols(),
        });
    }
    let mean = ArrayView1::from(&sc.mean);
    let std = ArrayView1::from(&sc.std);
    Ok((x - &mean) / &std)
}

/// Fit a scaler and return it with the transformed matrix.
pub fn fit_transform(x: &Array2<f64>, feature_names: &[String]) -> Result<(Scaler, Array2<f64>)> {
    let sc = fit_scaler(x, feature_names)?;
    let transformed = transform_all(x, &sc)?;
    Ok((sc, transformed))
}

/// Flag rows where any feature lies more than `threshold` standard deviations
/// from its column mean.
///
/// Mean and std are taken over the full sample, outliers included, and the
/// mask is computed in a single pass. Constant columns never flag a row.
pub fn zscore_outlier_mask(x: &Array2<f64>, threshold: f64) -> Array1<bool> {
    if x.nrows() == 0 {
        return Array1::from_elem(0, false);
    }
    let (mean, std) = column_moments(x);
    x.axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .zip(mean.iter().zip(std.iter()))
                .any(|(v, (m, s))| *s > 0.0 && ((v - m) / s).abs() > threshold)
        })
        .collect()
}

/// Drop the rows flagged by [`zscore_outlier_mask`]; returns the kept rows and
/// the number removed.
pub fn remove_outliers(dataset: &Dataset, threshold: f64) -> (Dataset, usize) {
    let mask = zscore_outlier_mask(&dataset.x, threshold);
    let kept: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &outlier)| if outlier { None } else { Some(i) })
        .collect();
    let removed = dataset.nrows() - kept.len();
    (dataset.select_rows(&kept), removed)
}
