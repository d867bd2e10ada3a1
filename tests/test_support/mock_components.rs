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

//! Store doubles for exercising failure and readiness paths.

use async_trait::async_trait;
use geojson_server::{Document, DocumentStore, MemoryStore, Predicate, StoreError};
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};

mock! {
    pub Store {}

    #[async_trait]
    impl DocumentStore for Store {
        fn kind(&self) -> &'static str;
        async fn find_all(&self) -> Result<Vec<Document>, StoreError>;
        async fn find_one(&self, predicate: &Predicate) -> Result<Option<Document>, StoreError>;
        async fn insert_one(&self, document: Document) -> Result<Document, StoreError>;
        async fn find_one_and_update(
            &self,
            predicate: &Predicate,
            changes: Document,
        ) -> Result<Option<Document>, StoreError>;
        async fn delete_one(&self, predicate: &Predicate) -> Result<bool, StoreError>;
    }
}

/// A store whose every data operation fails with `Unavailable`.
pub fn failing_store(reason: &'static str) -> MockStore {
    let err = move || StoreError::Unavailable(reason.to_string());
    let mut store = MockStore::new();
    store.expect_kind().return_const("mock");
    store.expect_find_all().returning(move || Err(err()));
    store.expect_find_one().returning(move |_| Err(err()));
    store.expect_insert_one().returning(move |_| Err(err()));
    store
        .expect_find_one_and_update()
        .returning(move |_, _| Err(err()));
    store.expect_delete_one().returning(move |_| Err(err()));
    store
}

/// A memory store that counts the data operations it serves.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    fn kind(&self) -> &'static str {
        "counting"
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        self.record();
        self.inner.find_all().await
    }

    async fn find_one(&self, predicate: &Predicate) -> Result<Option<Document>, StoreError> {
        self.record();
        self.inner.find_one(predicate).await
    }

    async fn insert_one(&self, document: Document) -> Result<Document, StoreError> {
        self.record();
        self.inner.insert_one(document).await
    }

    async fn find_one_and_update(
        &self,
        predicate: &Predicate,
        changes: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.record();
        self.inner.find_one_and_update(predicate, changes).await
    }

    async fn delete_one(&self, predicate: &Predicate) -> Result<bool, StoreError> {
        self.record();
        self.inner.delete_one(predicate).await
    }
}
