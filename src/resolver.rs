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

//! Identifier resolution.
//!
//! A single path segment (`/geojson/{identifier}`) can name a document three
//! ways: by its native object id, by its three-letter `cca3_code`, or by its
//! free-form `country_name`. This module classifies the raw string and turns
//! it into a store [`Predicate`].
//!
//! Lookups and writes resolve differently:
//!
//! | Input                  | Read path                              | Write path              |
//! |------------------------|----------------------------------------|-------------------------|
//! | 24 hex characters      | `_id == id`                            | `_id == id`             |
//! | exactly 3 characters   | `country_name == s OR cca3_code == s`  | `cca3_code == s`        |
//! | anything else          | `country_name == s OR cca3_code == s`  | `country_name == s`     |
//!
//! The read path never commits to one field for non-id input; the write path
//! always does. Both behaviours are relied on by existing clients and must be
//! kept as they are.

use std::fmt;

use crate::store::{ObjectId, Predicate, CCA3_CODE_FIELD, COUNTRY_NAME_FIELD};

/// Number of characters that marks an identifier as a country code on writes.
pub const SHORT_CODE_LEN: usize = 3;

/// What a raw identifier string refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// The store's native object id.
    NativeId(ObjectId),
    /// A three-character country code.
    ShortCode(String),
    /// A country name.
    Name(String),
}

impl Identifier {
    /// Classify a raw identifier. Total: every string has exactly one class.
    ///
    /// Length is measured in characters, not bytes.
    pub fn classify(raw: &str) -> Self {
        if let Ok(id) = ObjectId::parse_str(raw) {
            Identifier::NativeId(id)
        } else if raw.chars().count() == SHORT_CODE_LEN {
            Identifier::ShortCode(raw.to_string())
        } else {
            Identifier::Name(raw.to_string())
        }
    }

    /// Predicate used by lookups.
    pub fn read_predicate(&self) -> Predicate {
        match self {
            Identifier::NativeId(id) => Predicate::id_equals(*id),
            Identifier::ShortCode(s) | Identifier::Name(s) => Predicate::any_of(vec![
                Predicate::field_equals(COUNTRY_NAME_FIELD, s.as_str()),
                Predicate::field_equals(CCA3_CODE_FIELD, s.as_str()),
            ]),
        }
    }

    /// Predicate used by updates and deletes.
    pub fn write_predicate(&self) -> Predicate {
        match self {
            Identifier::NativeId(id) => Predicate::id_equals(*id),
            Identifier::ShortCode(code) => Predicate::field_equals(CCA3_CODE_FIELD, code.as_str()),
            Identifier::Name(name) => Predicate::field_equals(COUNTRY_NAME_FIELD, name.as_str()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::NativeId(id) => write!(f, "id {id}"),
            Identifier::ShortCode(code) => write!(f, "code '{code}'"),
            Identifier::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

/// Resolve `raw` for a lookup.
pub fn read_predicate(raw: &str) -> Predicate {
    Identifier::classify(raw).read_predicate()
}

/// Resolve `raw` for an update or delete.
pub fn write_predicate(raw: &str) -> Predicate {
    Identifier::classify(raw).write_predicate()
}
