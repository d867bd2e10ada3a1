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

//! Configuration file structures.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_DATABASE: &str = "geojsonDB";
pub const DEFAULT_COLLECTION: &str = "geojsonCollection";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Top-level configuration file.
///
/// Both sections are optional; a file containing only `{}` yields the
/// defaults (port 3000, file store under `./data/geojsonDB`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Listener and logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// Which collection backend to open, and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Collection held in process memory.
    Memory {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed_file: Option<PathBuf>,
    },
    /// Collection persisted as `<data_dir>/<database>/<collection>.json`.
    File {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
        #[serde(default = "default_database")]
        database: String,
        #[serde(default = "default_collection")]
        collection: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed_file: Option<PathBuf>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            data_dir: default_data_dir(),
            database: default_database(),
            collection: default_collection(),
            seed_file: None,
        }
    }
}

impl StoreConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Memory { .. } => "memory",
            StoreConfig::File { .. } => "file",
        }
    }

    /// JSON array imported into an empty collection on connect.
    pub fn seed_file(&self) -> Option<&Path> {
        match self {
            StoreConfig::Memory { seed_file } | StoreConfig::File { seed_file, .. } => {
                seed_file.as_deref()
            }
        }
    }

    /// Location of the collection file; `None` for the memory backend.
    pub fn collection_path(&self) -> Option<PathBuf> {
        match self {
            StoreConfig::Memory { .. } => None,
            StoreConfig::File {
                data_dir,
                database,
                collection,
                ..
            } => Some(data_dir.join(database).join(format!("{collection}.json"))),
        }
    }
}

impl GeoServerConfig {
    /// Check the values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.server.port == 0 {
            bail!("server.port must be between 1 and 65535");
        }
        if !LOG_LEVELS.contains(&self.server.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "server.log_level '{}' is not one of {}",
                self.server.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if let StoreConfig::File {
            database,
            collection,
            ..
        } = &self.store
        {
            validate_name("store.database", database)?;
            validate_name("store.collection", collection)?;
        }

        Ok(())
    }
}

/// Database and collection names become path components.
fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} must not be empty");
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        bail!("{field} '{value}' must be a plain name, not a path");
    }
    Ok(())
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}
