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

//! Document store persisted as a JSON file.
//!
//! The whole collection is kept in memory and rewritten to disk after every
//! mutation using atomic writes (temp file + rename). A failed write leaves
//! both the file and the in-memory collection as they were before the call.

use async_trait::async_trait;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::collection::Collection;
use super::{parse_documents, Document, DocumentStore, Predicate, StoreError};

/// A [`DocumentStore`] backed by a JSON array file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    collection: RwLock<Collection>,
}

impl FileStore {
    /// Open (or create) the collection file at `path`.
    ///
    /// Parent directories are created as needed. Documents without a valid
    /// `_id` are assigned one and the file is rewritten.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let (collection, needs_write) = match tokio::fs::read(&path).await {
            Ok(content) if content.iter().all(u8::is_ascii_whitespace) => (Collection::new(), true),
            Ok(content) => {
                let documents = parse_documents(&path, &content)?;
                let (collection, assigned) = Collection::from_documents(documents);
                (collection, assigned > 0)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Collection file '{}' not found, creating it", path.display());
                (Collection::new(), true)
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        if needs_write {
            write_collection(&path, &collection).await?;
        }

        Ok(Self {
            path,
            collection: RwLock::new(collection),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }

    /// Import `documents` when the collection holds nothing yet.
    ///
    /// Returns the number of documents imported.
    pub async fn seed_if_empty(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
        let mut collection = self.collection.write().await;
        if !collection.is_empty() {
            debug!(
                "Collection '{}' already has {} document(s), skipping seed",
                self.path.display(),
                collection.len()
            );
            return Ok(0);
        }

        let (seeded, _) = Collection::from_documents(documents);
        let count = seeded.len();
        write_collection(&self.path, &seeded).await?;
        *collection = seeded;
        info!(
            "Seeded collection '{}' with {count} document(s)",
            self.path.display()
        );
        Ok(count)
    }

    /// Apply `mutate` to a copy of the collection, persist it, then publish it.
    async fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut Collection) -> T,
    ) -> Result<T, StoreError> {
        let mut collection = self.collection.write().await;
        let mut next = collection.clone();
        let result = mutate(&mut next);
        write_collection(&self.path, &next).await?;
        *collection = next;
        Ok(result)
    }
}

async fn write_collection(path: &Path, collection: &Collection) -> Result<(), StoreError> {
    let documents: Vec<&Document> = collection.documents().collect();
    let content = serde_json::to_vec(&documents).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &content)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        error!(
            "Failed to rename temp collection file {} to {}: {e}",
            temp_path.display(),
            path.display()
        );
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(StoreError::io(path, e));
    }

    debug!(
        "Wrote {} document(s) to '{}'",
        collection.len(),
        path.display()
    );
    Ok(())
}

#[async_trait]
impl DocumentStore for FileStore {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collection.read().await.find_all())
    }

    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.read().await.find_one(predicate))
    }

    async fn insert_one(&self, document: Document) -> Result<Document, StoreError> {
        self.mutate(|collection| collection.insert_one(document))
            .await
    }

    async fn find_one_and_update(
        &self,
        predicate: &Predicate,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        // Nothing to persist when no document matches
        if self.collection.read().await.find_one(predicate).is_none() {
            return Ok(None);
        }
        self.mutate(|collection| collection.find_one_and_update(predicate, changes))
            .await
    }

    async fn delete_one(&self, predicate: &Predicate) -> Result<bool, StoreError> {
        if self.collection.read().await.find_one(predicate).is_none() {
            return Ok(false);
        }
        self.mutate(|collection| collection.delete_one(predicate))
            .await
    }
}
