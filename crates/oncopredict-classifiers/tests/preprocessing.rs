//! Integration tests for the scaler and z-score outlier removal.

mod common;

use ndarray::Array2;
use oncopredict_classifiers::preprocessing::{
    fit_scaler, fit_transform, remove_outliers, transform_all, zscore_outlier_mask,
};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("f{}", i)).collect()
}

// ---------------------------------------------------------------------------
// Scaler fit / transform
// ---------------------------------------------------------------------------

#[test]
fn fit_scaler_computes_mean_and_population_std() {
    let x = Array2::from_shape_vec((4, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0]).unwrap();
    let sc = fit_scaler(&x, &names(2)).unwrap();
    assert_eq!(sc.mean, vec![2.5, 25.0]);
    assert!((sc.std[0] - 1.25_f64.sqrt()).abs() < 1e-12);
    assert!((sc.std[1] - 125.0_f64.sqrt()).abs() < 1e-12);
    assert_eq!(sc.feature_names, names(2));
}

#[test]
fn transformed_training_columns_are_standardized() {
    let ds = common::synthetic_dataset(60, 1);
    let (_, t) = fit_transform(&ds.x, &ds.feature_names).unwrap();
    for col in t.columns() {
        let mean = col.mean().unwrap();
        let std = col.std(0.0);
        assert!(mean.abs() < 1e-9);
        assert!((std - 1.0).abs() < 1e-9);
    }
}

#[test]
fn scaler_rejects_wrong_width() {
    let x = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let sc = fit_scaler(&x, &names(2)).unwrap();
    assert!(transform_all(&Array2::zeros((1, 3)), &sc).is_err());
    assert!(sc.transform_row(&[1.0]).is_err());
}

// ---------------------------------------------------------------------------
// Outlier removal
// ---------------------------------------------------------------------------

#[test]
fn extreme_row_is_removed_and_others_kept() {
    let mut ds = common::synthetic_dataset(200, 3);
    let col = ds.x.column(4).to_owned();
    let (mean, std) = (col.mean().unwrap(), col.std(0.0));
    ds.x[(17, 4)] = mean + 10.0 * std;

    let (cleaned, removed) = remove_outliers(&ds, 3.0);
    assert_eq!(removed, 1);
    assert_eq!(cleaned.nrows(), 199);
    assert!(cleaned.x.column(4).iter().all(|&v| v < mean + 5.0 * std));
}

#[test]
fn rows_within_two_sigma_are_kept() {
    let ds = common::synthetic_dataset(120, 9);
    let mask = zscore_outlier_mask(&ds.x, 3.0);
    assert!(mask.iter().all(|&flagged| !flagged));

    let (cleaned, removed) = remove_outliers(&ds, 3.0);
    assert_eq!(removed, 0);
    assert_eq!(cleaned.x, ds.x);
}

#[test]
fn constant_columns_never_flag() {
    let x = Array2::from_elem((5, 3), 2.0);
    assert!(zscore_outlier_mask(&x, 3.0).iter().all(|&v| !v));
}
