#![allow(dead_code)]

use ndarray::{Array1, Array2};
use oncopredict_classifiers::data_handling::{default_feature_names, Dataset, FEATURE_NAMES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Two well separated classes over the 30 canonical features.
///
/// Every feature is centred at +1.5 for malignant rows and -1.5 for benign
/// rows with uniform noise in (-1, 1), so no value reaches |z| > 3.
pub fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let y = Array1::from_iter((0..n).map(|i| i % 3 == 0));
    let x = Array2::from_shape_fn((n, FEATURE_NAMES.len()), |(r, c)| {
        let centre = if y[r] { 1.5 } else { -1.5 };
        10.0 + c as f64 + centre + rng.gen_range(-1.0..1.0)
    });
    Dataset::new(x, y, default_feature_names()).unwrap()
}

/// Render a dataset as a headered CSV with a `diagnosis` column.
pub fn to_csv(dataset: &Dataset) -> String {
    let mut out = String::from("id,diagnosis,");
    out.push_str(&FEATURE_NAMES.join(","));
    out.push('\n');
    for (i, row) in dataset.x.rows().into_iter().enumerate() {
        let label = if dataset.y[i] { "M" } else { "B" };
        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&format!("{},{},{}\n", 1000 + i, label, values.join(",")));
    }
    out
}
