//! Line-oriented `key = value` config reader.
//!
//! `model_data_path` and `model_dir` drive the fetch. The query-side keys
//! (`utm_zone`, `interpolation`, `data_file`) are parsed into
//! [`ModelSettings`] so a fetched install can be checked against the
//! datasets it is expected to load.

use crate::model::{ModelPaths, ModelSpec};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "./config";

/// Most `data_file` entries the query side will load; later ones are dropped.
pub const MAX_DATASETS: usize = 10;

const KEY_MODEL_DATA_PATH: &str = "model_data_path";
const KEY_MODEL_DIR: &str = "model_dir";
const KEY_UTM_ZONE: &str = "utm_zone";
const KEY_INTERPOLATION: &str = "interpolation";
const KEY_DATA_FILE: &str = "data_file";

/// Fatal configuration problems. Both map to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ERROR: failed to open config file")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ERROR: failed to find variables from config file")]
    MissingVariables { missing: Vec<&'static str> },
}

/// One `data_file = {"LABEL": ..., "FILE": ...}` entry. `file` is relative
/// to the model directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetEntry {
    #[serde(rename = "LABEL", default)]
    pub label: String,
    #[serde(rename = "FILE")]
    pub file: String,
}

/// Query-side settings. None of these are required for fetching; bad
/// values are logged and skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub utm_zone: Option<i32>,
    pub interpolation: bool,
    pub datasets: Vec<DatasetEntry>,
}

/// Values scanned out of the config text before derivation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub model_data_path: Option<String>,
    pub model_dir: Option<String>,
    pub settings: ModelSettings,
}

/// Everything a fetch run needs from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub paths: ModelPaths,
    pub settings: ModelSettings,
}

fn push_dataset(settings: &mut ModelSettings, value: &str) {
    if settings.datasets.len() >= MAX_DATASETS {
        tracing::warn!("exceeded dataset maximum of {}, ignoring {}", MAX_DATASETS, value);
        return;
    }
    match serde_json::from_str::<DatasetEntry>(value) {
        Ok(entry) => settings.datasets.push(entry),
        Err(e) => tracing::warn!("ignoring malformed data_file entry {}: {}", value, e),
    }
}

/// Scan config text. Comment lines start with `#` in column zero; lines
/// without `=` are skipped; key and value split on the first `=`.
pub fn scan(text: &str) -> RawConfig {
    let mut raw = RawConfig::default();
    for line in text.lines() {
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            KEY_MODEL_DATA_PATH => raw.model_data_path = Some(value.to_string()),
            KEY_MODEL_DIR => raw.model_dir = Some(value.to_string()),
            KEY_UTM_ZONE => match value.parse() {
                Ok(zone) => raw.settings.utm_zone = Some(zone),
                Err(_) => tracing::warn!("ignoring non-numeric utm_zone {:?}", value),
            },
            KEY_INTERPOLATION => raw.settings.interpolation = value == "on",
            KEY_DATA_FILE => push_dataset(&mut raw.settings, value),
            _ => {}
        }
    }
    raw
}

/// Parse config text into derived paths and settings for `model`.
pub fn parse_config(text: &str, model: &ModelSpec) -> Result<ModelConfig, ConfigError> {
    let raw = scan(text);
    match (raw.model_data_path, raw.model_dir) {
        (Some(data_path), Some(dir)) => Ok(ModelConfig {
            paths: ModelPaths::new(model, &data_path, &dir),
            settings: raw.settings,
        }),
        (data_path, dir) => {
            let mut missing = Vec::new();
            if data_path.is_none() {
                missing.push(KEY_MODEL_DATA_PATH);
            }
            if dir.is_none() {
                missing.push(KEY_MODEL_DIR);
            }
            tracing::debug!("config is missing {:?}", missing);
            Err(ConfigError::MissingVariables { missing })
        }
    }
}

/// Read and parse the config file at `path`.
pub fn load_config(path: &Path, model: &ModelSpec) -> Result<ModelConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, model)?;
    tracing::debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}
