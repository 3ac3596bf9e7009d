use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use oncopredict_classifiers::config::TrainingConfig;

/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub models_dir: PathBuf,
    pub training: TrainingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: String::from("0.0.0.0"),
            port: 5000,
            dataset_path: PathBuf::from("data/wdbc.csv"),
            models_dir: PathBuf::from("models"),
            training: TrainingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config; absent fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Apply a `PORT` value. Unparsable values are an error rather than
    /// silently falling back.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(raw) = port {
            let raw = raw.trim();
            if !raw.is_empty() {
                self.port = raw
                    .parse()
                    .with_context(|| format!("Invalid {} value: {:?}", PORT_ENV, raw))?;
            }
        }
        Ok(())
    }

    /// Build the effective config: defaults, then `--config`, then `PORT`,
    /// then the remaining command line flags.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
        config.apply_arguments(matches);
        config
            .training
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid training section in config")?;
        Ok(config)
    }

    fn apply_arguments(&mut self, matches: &ArgMatches) {
        // Not every subcommand defines every flag.
        if let Ok(Some(port)) = matches.try_get_one::<u16>("port") {
            self.port = *port;
        }
        if let Ok(Some(host)) = matches.try_get_one::<String>("host") {
            self.host = host.clone();
        }
        if let Ok(Some(data)) = matches.try_get_one::<PathBuf>("data") {
            self.dataset_path = data.clone();
        }
        if let Ok(Some(dir)) = matches.try_get_one::<PathBuf>("models_dir") {
            self.models_dir = dir.clone();
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
