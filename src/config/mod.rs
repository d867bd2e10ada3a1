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

//! Configuration for the GeoJSON server.
//!
//! The configuration file is YAML (JSON is accepted too) with POSIX-style
//! environment variable references expanded before parsing:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a fallback
//!
//! ```yaml
//! server:
//!   host: ${GEOJSON_HOST:-0.0.0.0}
//!   port: ${GEOJSON_PORT:-3000}
//!   log_level: info
//!
//! store:
//!   kind: file            # or `memory`
//!   data_dir: ./data
//!   database: geojsonDB
//!   collection: geojsonCollection
//!   seed_file: ./countries.json
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{from_json_str, from_yaml_str, load_config_file, save_config_file, ConfigError};
pub use types::{GeoServerConfig, ServerSettings, StoreConfig};
