#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use oncopredict_classifiers::data_handling::FEATURE_NAMES;

/// Write a well separated labelled CSV with `n` rows and return its path.
///
/// Every third row is malignant. Values are deterministic so the file is the
/// same on every run.
pub fn write_dataset(dir: &Path, n: usize) -> PathBuf {
    let mut out = String::from("diagnosis,");
    out.push_str(&FEATURE_NAMES.join(","));
    out.push('\n');
    for r in 0..n {
        let malignant = r % 3 == 0;
        let centre = if malignant { 1.5 } else { -1.5 };
        let values: Vec<String> = (0..FEATURE_NAMES.len())
            .map(|c| {
                let jitter = ((r * 7 + c * 13) % 17) as f64 / 17.0 - 0.5;
                format!("{}", 10.0 + c as f64 + centre + jitter)
            })
            .collect();
        out.push_str(if malignant { "M," } else { "B," });
        out.push_str(&values.join(","));
        out.push('\n');
    }
    let path = dir.join("wdbc.csv");
    fs::write(&path, out).unwrap();
    path
}

/// Form body with every feature set to `value`.
pub fn form_body(value: &str) -> String {
    FEATURE_NAMES
        .iter()
        .map(|name| format!("{}={}", name.replace(' ', "+"), value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Form body resembling a row of the generated dataset, centred on the
/// malignant or benign cluster.
pub fn cluster_form(malignant: bool) -> String {
    let centre = if malignant { 1.5 } else { -1.5 };
    FEATURE_NAMES
        .iter()
        .enumerate()
        .map(|(c, name)| format!("{}={}", name.replace(' ', "+"), 10.0 + c as f64 + centre))
        .collect::<Vec<_>>()
        .join("&")
}
