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

//! Query predicates over stored documents.

use serde_json::{json, Value};
use std::fmt;

use super::object_id::ObjectId;
use super::{Document, ID_FIELD};

/// A selection condition: equality on one field, or a disjunction of conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `_id` equals the given object id.
    IdEquals(ObjectId),
    /// A string field equals `value`.
    FieldEquals { field: String, value: String },
    /// Any of the inner predicates holds.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn id_equals(id: ObjectId) -> Self {
        Predicate::IdEquals(id)
    }

    pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn any_of(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    /// Evaluate the predicate against a document.
    ///
    /// Field equality follows document-store semantics: a string field matches
    /// when equal, an array field matches when any element is equal.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Predicate::IdEquals(id) => document
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .and_then(|s| ObjectId::parse_str(s).ok())
                .is_some_and(|stored| stored == *id),
            Predicate::FieldEquals { field, value } => match document.get(field) {
                Some(Value::String(s)) => s == value,
                Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(value)),
                _ => false,
            },
            Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(document)),
        }
    }

    /// Render as a document-store style filter, used in logs.
    pub fn to_filter(&self) -> Value {
        match self {
            Predicate::IdEquals(id) => json!({ ID_FIELD: id.to_hex() }),
            Predicate::FieldEquals { field, value } => {
                let mut filter = serde_json::Map::new();
                filter.insert(field.clone(), Value::String(value.clone()));
                Value::Object(filter)
            }
            Predicate::Or(predicates) => {
                json!({ "$or": predicates.iter().map(Predicate::to_filter).collect::<Vec<_>>() })
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_filter())
    }
}
