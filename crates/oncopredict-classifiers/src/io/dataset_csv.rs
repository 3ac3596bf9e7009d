//! Diagnostic dataset readers.
//!
//! Two layouts are understood:
//! * a headered CSV/TSV with the 30 canonical feature columns plus a
//!   `diagnosis` (`M`/`B` or `1`/`0`) or `target` (0 = malignant) column;
//! * the headerless UCI `wdbc.data` file (`id, M|B, 30 features`).
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use ndarray::{Array1, Array2};

use crate::data_handling::{Dataset, FEATURE_NAMES};
use crate::error::{ClassifierError, Result};

/// How the label column encodes the diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelEncoding {
    /// `M`/`B` or `1`/`0`, where 1 is malignant.
    Diagnosis,
    /// Original library encoding, where 0 is malignant and 1 is benign.
    Target,
}

/// Read a dataset, choosing the layout from the file extension.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    let dataset = match ext.as_deref() {
        Some("data") => read_wdbc(reader)?,
        Some("tsv") => read_headered(reader, b'\t')?,
        _ => read_headered(reader, b',')?,
    };

    log::info!(
        "Loaded {} rows x {} features from {}",
        dataset.nrows(),
        dataset.x.ncols(),
        path.display()
    );
    Ok(dataset)
}

/// Read a headered table; feature columns are matched by name in canonical order.
pub fn read_headered<R: Read>(reader: R, delimiter: u8) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ClassifierError::dataset(None, format!("failed to read header row: {}", e)))?
        .clone();

    let (label_idx, encoding) = if let Some(idx) = find_column(&headers, "diagnosis") {
        (idx, LabelEncoding::Diagnosis)
    } else if let Some(idx) = find_column(&headers, "target") {
        (idx, LabelEncoding::Target)
    } else {
        return Err(ClassifierError::dataset(
            None,
            "missing label column 'diagnosis' or 'target'",
        ));
    };

    let mut feature_indices = Vec::with_capacity(FEATURE_NAMES.len());
    for name in FEATURE_NAMES {
        let idx = find_column(&headers, name).ok_or_else(|| {
            ClassifierError::dataset(None, format!("missing feature column '{}'", name))
        })?;
        feature_indices.push(idx);
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.map_err(|e| ClassifierError::dataset(Some(row), e.to_string()))?;
        labels.push(parse_label(record.get(label_idx), encoding, row)?);
        for (&idx, name) in feature_indices.iter().zip(FEATURE_NAMES) {
            features.push(parse_feature(record.get(idx), name, row)?);
        }
    }

    build_dataset(features, labels)
}

/// Read the headerless UCI layout: `id, diagnosis, feature_1 .. feature_30`.
pub fn read_wdbc<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.map_err(|e| ClassifierError::dataset(Some(row), e.to_string()))?;
        if record.len() != FEATURE_NAMES.len() + 2 {
            return Err(ClassifierError::dataset(
                Some(row),
                format!(
                    "expected {} fields, found {}",
                    FEATURE_NAMES.len() + 2,
                    record.len()
                ),
            ));
        }
        labels.push(parse_label(record.get(1), LabelEncoding::Diagnosis, row)?);
        for (offset, name) in FEATURE_NAMES.iter().enumerate() {
            features.push(parse_feature(record.get(offset + 2), name, row)?);
        }
    }

    build_dataset(features, labels)
}

fn build_dataset(features: Vec<f64>, labels: Vec<bool>) -> Result<Dataset> {
    let n_samples = labels.len();
    let x = Array2::from_shape_vec((n_samples, FEATURE_NAMES.len()), features)
        .map_err(|e| ClassifierError::dataset(None, format!("failed to build feature matrix: {}", e)))?;
    Dataset::new(
        x,
        Array1::from_vec(labels),
        crate::data_handling::default_feature_names(),
    )
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn parse_label(value: Option<&str>, encoding: LabelEncoding, row: usize) -> Result<bool> {
    let value = value.ok_or_else(|| ClassifierError::dataset(Some(row), "missing label value"))?;
    let malignant = match (encoding, value.to_ascii_uppercase().as_str()) {
        (LabelEncoding::Diagnosis, "M" | "1") => true,
        (LabelEncoding::Diagnosis, "B" | "0") => false,
        (LabelEncoding::Target, "0") => true,
        (LabelEncoding::Target, "1") => false,
        _ => {
            return Err(ClassifierError::dataset(
                Some(row),
                format!("unknown label {:?}", value),
            ))
        }
    };
    Ok(malignant)
}

fn parse_feature(value: Option<&str>, name: &str, row: usize) -> Result<f64> {
    let value = value.ok_or_else(|| {
        ClassifierError::dataset(Some(row), format!("missing value for '{}'", name))
    })?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ClassifierError::dataset(
            Some(row),
            format!("invalid value {:?} for '{}'", value, name),
        )),
    }
}
