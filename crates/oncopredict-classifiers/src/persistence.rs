use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClassifierError, Result};
use crate::models::Classifier;
use crate::preprocessing::Scaler;

pub const SCALER_FILE: &str = "scaler.json";
pub const MODEL_FILE: &str = "model.json";

/// Directory holding the fitted scaler and the selected model.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ArtifactStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Both artifacts are present.
    pub fn exists(&self) -> bool {
        self.scaler_path().is_file() && self.model_path().is_file()
    }

    /// Exactly one of the two artifacts is present.
    pub fn partially_exists(&self) -> bool {
        self.scaler_path().is_file() != self.model_path().is_file()
    }

    pub fn save(&self, scaler: &Scaler, model: &Classifier) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| ClassifierError::Io {
            path: self.dir.clone(),
            source,
        })?;
        write_json(&self.scaler_path(), scaler)?;
        write_json(&self.model_path(), model)?;
        log::info!(
            "Saved {} and scaler to {}",
            model.kind(),
            self.dir.display()
        );
        Ok(())
    }

    pub fn load(&self) -> Result<(Scaler, Classifier)> {
        let scaler: Scaler = read_json(&self.scaler_path())?;
        let model: Classifier = read_json(&self.model_path())?;
        log::info!(
            "Loaded {} ({} features) from {}",
            model.kind(),
            scaler.n_features(),
            self.dir.display()
        );
        Ok((scaler, model))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer(&mut writer, value).map_err(|e| ClassifierError::Serialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    writer.flush().map_err(io_err)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ClassifierError::Serialization {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
