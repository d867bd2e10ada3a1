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

//! Helpers for writing configuration and seed files in tests.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Write a JSON array of documents usable as a seed file.
pub fn write_seed_file(dir: &TempDir, documents: &[Value]) -> PathBuf {
    write_file(
        dir,
        "seed.json",
        &serde_json::to_string_pretty(documents).unwrap(),
    )
}

/// YAML for a file store rooted at `data_dir`.
pub fn file_store_yaml(data_dir: &Path, seed_file: Option<&Path>) -> String {
    let mut yaml = format!(
        "server:\n  host: 127.0.0.1\n  port: 3000\nstore:\n  kind: file\n  data_dir: {}\n  database: geojsonDB\n  collection: geojsonCollection\n",
        data_dir.display()
    );
    if let Some(seed) = seed_file {
        yaml.push_str(&format!("  seed_file: {}\n", seed.display()));
    }
    yaml
}
