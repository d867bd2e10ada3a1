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

//! `${VAR}` expansion for configuration text.
//!
//! Two forms are recognised, both POSIX-style:
//! - `${NAME}` expands to the value of `NAME` and fails if it is unset
//! - `${NAME:-fallback}` expands to `fallback` when `NAME` is unset or empty
//!
//! Expansion is a single pass over the raw file contents before it is handed to
//! the YAML or JSON parser, so references may appear anywhere a scalar can:
//!
//! ```yaml
//! server:
//!   port: ${GEOJSON_PORT:-3000}
//! store:
//!   kind: file
//!   data_dir: ${GEOJSON_DATA_DIR:-./data}
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an expanded document, in bytes.
pub const MAX_EXPANDED_LEN: usize = 1024 * 1024;

lazy_static! {
    // 1: variable name, 2: fallback (without the `:-`)
    static ref VAR_REFERENCE: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .unwrap_or_else(|e| panic!("variable reference pattern is invalid: {e}"));
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' is not valid unicode")]
    NotUnicode { name: String },

    #[error("Configuration exceeds {MAX_EXPANDED_LEN} bytes after variable expansion")]
    ResultTooLarge,
}

/// Expand every `${...}` reference in `input`.
///
/// Values are inserted verbatim; they are not themselves expanded again.
/// References on full-line `#` comments are left untouched.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(input.len());
    let mut copied_up_to = 0;
    let mut expanded = Vec::new();

    for caps in VAR_REFERENCE.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if on_comment_line(input, whole.start()) {
            continue;
        }
        output.push_str(&input[copied_up_to..whole.start()]);
        output.push_str(&resolve(&caps)?);
        copied_up_to = whole.end();

        if output.len() > MAX_EXPANDED_LEN {
            return Err(InterpolationError::ResultTooLarge);
        }
        if let Some(name) = caps.get(1) {
            expanded.push(name.as_str());
        }
    }
    output.push_str(&input[copied_up_to..]);

    if !expanded.is_empty() {
        // Names only, values may be secrets
        debug!("Expanded configuration variables: {}", expanded.join(", "));
    }
    Ok(output)
}

fn on_comment_line(input: &str, offset: usize) -> bool {
    let line_start = input[..offset].rfind('\n').map_or(0, |i| i + 1);
    input[line_start..offset].trim_start().starts_with('#')
}

fn resolve(caps: &Captures<'_>) -> Result<String, InterpolationError> {
    let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let fallback = caps.get(2).map(|m| m.as_str());

    match (env::var(name), fallback) {
        (Ok(value), _) if !value.is_empty() => Ok(value),
        (Err(env::VarError::NotUnicode(_)), _) => Err(InterpolationError::NotUnicode {
            name: name.to_string(),
        }),
        (_, Some(fallback)) => Ok(fallback.to_string()),
        (_, None) => Err(InterpolationError::MissingVariable {
            name: name.to_string(),
        }),
    }
}
