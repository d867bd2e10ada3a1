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

//! Document store abstraction and the bundled backends.
//!
//! The server talks to its collection exclusively through [`DocumentStore`].
//! Two implementations ship with the crate:
//!
//! - [`MemoryStore`] - an in-process collection, lost on restart
//! - [`FileStore`] - a collection persisted as a JSON array on disk
//!
//! Which backend is used is decided by the `store` section of the
//! configuration file (see [`connect`]).

pub mod collection;
pub mod file;
pub mod handle;
pub mod memory;
pub mod object_id;
pub mod predicate;

use async_trait::async_trait;
use log::info;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::StoreConfig;

pub use collection::Collection;
pub use file::FileStore;
pub use handle::{StoreHandle, StoreStatus};
pub use memory::MemoryStore;
pub use object_id::{ObjectId, ParseObjectIdError, OBJECT_ID_HEX_LEN};
pub use predicate::Predicate;

/// A stored record: an arbitrary JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the store-assigned identifier.
pub const ID_FIELD: &str = "_id";
/// Free-form country name field.
pub const COUNTRY_NAME_FIELD: &str = "country_name";
/// Three-letter country code field.
pub const CCA3_CODE_FIELD: &str = "cca3_code";

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed collection data in '{path}': {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid document in '{path}' at position {index}: expected a JSON object")]
    InvalidDocument { path: PathBuf, index: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Operations the CRUD handlers need from a document collection.
///
/// Implementations must be safe for concurrent use; no ordering between
/// concurrent calls is assumed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn kind(&self) -> &'static str;

    /// All documents, in store order.
    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;

    /// The first document matching `predicate`.
    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Document>, StoreError>;

    /// Insert `document` under a newly assigned `_id` and return the stored form.
    async fn insert_one(&self, document: Document) -> Result<Document, StoreError>;

    /// Merge `changes` into the first document matching `predicate` and
    /// return the post-update document.
    async fn find_one_and_update(
        &self,
        predicate: &Predicate,
        changes: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the first document matching `predicate`. Returns whether a
    /// document was removed.
    async fn delete_one(&self, predicate: &Predicate) -> Result<bool, StoreError>;
}

/// Overwrite the fields of `target` named in `changes`.
///
/// Fields not named in `changes` are preserved. `_id` is never overwritten.
pub fn apply_changes(target: &mut Document, changes: Document) {
    for (key, value) in changes {
        if key == ID_FIELD {
            continue;
        }
        target.insert(key, value);
    }
}

/// Open the store described by the configuration.
///
/// This is the "connection" step of the server lifecycle: the file backend
/// loads its collection from disk here, and any configured seed file is
/// imported into an empty collection.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let seed = match config.seed_file() {
        Some(path) => Some(read_seed_file(path).await?),
        None => None,
    };

    match config {
        StoreConfig::Memory { .. } => {
            let store = MemoryStore::with_documents(seed.unwrap_or_default());
            info!(
                "Opened in-memory collection with {} document(s)",
                store.len().await
            );
            Ok(Arc::new(store))
        }
        StoreConfig::File { .. } => {
            let path = config.collection_path().ok_or_else(|| {
                StoreError::Unavailable("file store has no collection path".to_string())
            })?;
            let store = FileStore::open(path).await?;
            if let Some(documents) = seed {
                store.seed_if_empty(documents).await?;
            }
            info!(
                "Opened collection file '{}' with {} document(s)",
                store.path().display(),
                store.len().await
            );
            Ok(Arc::new(store))
        }
    }
}

/// Read a JSON array of documents used to pre-populate an empty collection.
pub async fn read_seed_file(path: &Path) -> Result<Vec<Document>, StoreError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    parse_documents(path, &content)
}

pub(crate) fn parse_documents(path: &Path, content: &[u8]) -> Result<Vec<Document>, StoreError> {
    let values: Vec<Value> =
        serde_json::from_slice(content).map_err(|source| StoreError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Object(document) => Ok(document),
            _ => Err(StoreError::InvalidDocument {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_apply_changes_overwrites_named_fields_only() {
        let mut target = json!({ "_id": "65a1b2c3d4e5f60718293a4b", "a": 1, "b": 2 })
            .as_object()
            .cloned()
            .unwrap();
        let changes = json!({ "b": 3, "c": [1, 2], "_id": "ffffffffffffffffffffffff" })
            .as_object()
            .cloned()
            .unwrap();

        apply_changes(&mut target, changes);

        assert_eq!(
            Value::Object(target),
            json!({ "_id": "65a1b2c3d4e5f60718293a4b", "a": 1, "b": 3, "c": [1, 2] })
        );
    }

    #[test]
    fn test_parse_documents_rejects_non_objects() {
        let result = parse_documents(Path::new("seed.json"), br#"[{"a": 1}, 42]"#);
        assert!(matches!(
            result,
            Err(StoreError::InvalidDocument { index: 1, .. })
        ));
    }

    #[test]
    fn test_parse_documents_rejects_non_array() {
        let result = parse_documents(Path::new("seed.json"), br#"{"a": 1}"#);
        assert!(matches!(result, Err(StoreError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_connect_memory_with_seed() {
        let dir = TempDir::new().unwrap();
        let seed = dir.path().join("seed.json");
        fs::write(
            &seed,
            r#"[{"country_name": "Japan", "cca3_code": "JPN"}, {"country_name": "Nepal"}]"#,
        )
        .unwrap();

        let store = connect(&StoreConfig::Memory {
            seed_file: Some(seed),
        })
        .await
        .unwrap();

        assert_eq!(store.kind(), "memory");
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_connect_fails_on_missing_seed_file() {
        let dir = TempDir::new().unwrap();
        let result = connect(&StoreConfig::Memory {
            seed_file: Some(dir.path().join("missing.json")),
        })
        .await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
