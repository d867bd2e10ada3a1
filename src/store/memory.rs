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

//! In-process document store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::collection::Collection;
use super::{Document, DocumentStore, Predicate, StoreError};

/// A [`DocumentStore`] holding its collection in memory.
///
/// Never fails; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `documents`.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let (collection, _) = Collection::from_documents(documents);
        Self {
            collection: RwLock::new(collection),
        }
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collection.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collection.read().await.find_all())
    }

    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.read().await.find_one(predicate))
    }

    async fn insert_one(&self, document: Document) -> Result<Document, StoreError> {
        Ok(self.collection.write().await.insert_one(document))
    }

    async fn find_one_and_update(
        &self,
        predicate: &Predicate,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection
            .write()
            .await
            .find_one_and_update(predicate, changes))
    }

    async fn delete_one(&self, predicate: &Predicate) -> Result<bool, StoreError> {
        Ok(self.collection.write().await.delete_one(predicate))
    }
}
