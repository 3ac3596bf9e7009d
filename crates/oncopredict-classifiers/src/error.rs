use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading data, training candidates, persisting
/// artifacts or answering a prediction.
#[derive(Debug)]
pub enum ClassifierError {
    /// Too few rows survive outlier removal to fill every partition.
    InsufficientData { available: usize, required: usize },
    /// A candidate failed to fit.
    Training { candidate: String, reason: String },
    /// A request value is present but is not a finite number.
    InvalidInput { feature: String, value: String },
    /// Scaler or model has not been fitted or loaded.
    ModelNotReady,
    /// Feature vector length does not match the fitted scaler.
    FeatureCountMismatch { expected: usize, got: usize },
    /// Malformed dataset file (row is 1-based, header excluded).
    Dataset { row: Option<usize>, reason: String },
    /// Artifact or dataset read/write failure.
    Io { path: PathBuf, source: std::io::Error },
    /// Artifact (de)serialization failure.
    Serialization { path: PathBuf, reason: String },
    /// Training parameters that cannot describe a valid run.
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub fn training(candidate: &str, reason: impl fmt::Display) -> Self {
        ClassifierError::Training {
            candidate: candidate.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn dataset(row: Option<usize>, reason: impl Into<String>) -> Self {
        ClassifierError::Dataset {
            row,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClassifierError::InvalidInput { .. } | ClassifierError::FeatureCountMismatch { .. }
        )
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassifierError::InsufficientData { available, required } => write!(
                f,
                "Insufficient data: {} rows available after outlier removal, at least {} required",
                available, required
            ),
            ClassifierError::Training { candidate, reason } => {
                write!(f, "Failed to train {}: {}", candidate, reason)
            }
            ClassifierError::InvalidInput { feature, value } => {
                write!(f, "Invalid value for {}: {:?} is not a valid number", feature, value)
            }
            ClassifierError::ModelNotReady => write!(f, "Model and scaler are not loaded"),
            ClassifierError::FeatureCountMismatch { expected, got } => write!(
                f,
                "Expected {} feature values, got {}",
                expected, got
            ),
            ClassifierError::Dataset { row: Some(row), reason } => {
                write!(f, "Invalid dataset row {}: {}", row, reason)
            }
            ClassifierError::Dataset { row: None, reason } => write!(f, "Invalid dataset: {}", reason),
            ClassifierError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ClassifierError::Serialization { path, reason } => {
                write!(f, "Failed to (de)serialize {}: {}", path.display(), reason)
            }
            ClassifierError::InvalidConfig(reason) => write!(f, "Invalid training config: {}", reason),
        }
    }
}

impl Error for ClassifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClassifierError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
