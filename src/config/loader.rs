// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reading and writing the server configuration file.
//!
//! Files are expanded with [`env_interpolation::interpolate`] first, then
//! parsed as YAML with a JSON fallback, then validated.

use super::env_interpolation;
use super::types::GeoServerConfig;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Deserialize YAML after expanding `${VAR}` references.
///
/// ```
/// use geojson_server::config::{from_yaml_str, GeoServerConfig};
///
/// let config: GeoServerConfig = from_yaml_str("server:\n  port: 8080\n").unwrap();
/// assert_eq!(config.server.port, 8080);
/// ```
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let expanded = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&expanded)?)
}

/// Deserialize JSON after expanding `${VAR}` references.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let expanded = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&expanded)?)
}

/// Load and validate the configuration at `path`.
///
/// # Errors
///
/// Fails when the file cannot be read, a referenced variable is missing, the
/// content is neither YAML nor JSON, or validation rejects a value.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<GeoServerConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let expanded = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<GeoServerConfig>(&expanded) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<GeoServerConfig>(&expanded) {
            Ok(config) => {
                debug!("Parsed '{}' as JSON", path.display());
                config
            }
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    config.validate()?;
    Ok(config)
}

/// Write `config` as YAML, creating parent directories.
///
/// Expanded values are written, not the `${VAR}` references they came from.
pub fn save_config_file<P: AsRef<Path>>(
    config: &GeoServerConfig,
    path: P,
) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_yaml::to_string(config)?;
    Ok(fs::write(path, content)?)
}
