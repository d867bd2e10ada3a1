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

use std::process::Command;

fn main() {
    let rustc_version = Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .unwrap_or_else(|| "unknown".to_string());

    println!(
        "cargo:rustc-env=GEOJSON_RUSTC_VERSION={}",
        rustc_version.trim()
    );

    // The HTTP stack version is reported by `--version` for support requests
    let axum_version = read_dep_version("axum").unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=GEOJSON_AXUM_VERSION={axum_version}");
    println!("cargo:rerun-if-changed=Cargo.lock");
}

fn read_dep_version(crate_name: &str) -> Option<String> {
    // Parse the lock file to find the exact resolved version
    let lock_contents = std::fs::read_to_string("Cargo.lock").ok()?;
    let wanted = format!("name = \"{crate_name}\"");
    let mut found = false;
    for line in lock_contents.lines() {
        if line == wanted {
            found = true;
            continue;
        }
        if found && line.starts_with("version = ") {
            return Some(
                line.trim_start_matches("version = ")
                    .trim_matches('"')
                    .to_string(),
            );
        }
        if found && line.trim().is_empty() {
            found = false;
        }
    }
    None
}
