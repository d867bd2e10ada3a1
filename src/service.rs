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

//! CRUD operations over the GeoJSON collection.
//!
//! Each method performs exactly one store call and never retries. Store
//! failures are wrapped in [`ServiceError::StoreFailure`] together with the
//! operation that raised them; absence becomes [`ServiceError::NotFound`].
//! Nothing here knows about HTTP.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;

use crate::resolver::Identifier;
use crate::store::{Document, DocumentStore, StoreError};

/// The five collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Client-facing message for a store failure during this operation.
    ///
    /// Reads include the underlying error text; writes use a fixed message.
    pub fn failure_message(&self, error: &StoreError) -> String {
        match self {
            Operation::List | Operation::Get => format!("Failed to fetch data: {error}"),
            Operation::Create => "Failed to add data".to_string(),
            Operation::Update => "Failed to update data".to_string(),
            Operation::Delete => "Failed to delete data".to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a collection operation did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Data not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Database not initialized")]
    NotReady,

    #[error("Store failure during {operation}: {source}")]
    StoreFailure {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    fn store(operation: Operation, source: StoreError) -> Self {
        warn!("Store {operation} failed: {source}");
        ServiceError::StoreFailure { operation, source }
    }
}

/// CRUD handlers bound to a connected store.
#[derive(Clone)]
pub struct GeoJsonService {
    store: Arc<dyn DocumentStore>,
}

impl GeoJsonService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Every document in the collection, possibly none.
    pub async fn list(&self) -> Result<Vec<Document>, ServiceError> {
        let documents = self
            .store
            .find_all()
            .await
            .map_err(|e| ServiceError::store(Operation::List, e))?;
        debug!("Listed {} document(s)", documents.len());
        Ok(documents)
    }

    /// Look up one document by id, country name or country code.
    pub async fn get(&self, raw_identifier: &str) -> Result<Document, ServiceError> {
        let identifier = Identifier::classify(raw_identifier);
        let predicate = identifier.read_predicate();
        debug!("Get {identifier} using filter {predicate}");

        self.store
            .find_one(&predicate)
            .await
            .map_err(|e| ServiceError::store(Operation::Get, e))?
            .ok_or(ServiceError::NotFound)
    }

    /// Insert a new document; the store assigns its `_id`.
    pub async fn create(&self, document: Document) -> Result<Document, ServiceError> {
        let created = self
            .store
            .insert_one(document)
            .await
            .map_err(|e| ServiceError::store(Operation::Create, e))?;
        debug!("Created document {}", created_id(&created));
        Ok(created)
    }

    /// Merge `changes` into the document the identifier addresses.
    pub async fn update(
        &self,
        raw_identifier: &str,
        changes: Document,
    ) -> Result<Document, ServiceError> {
        let identifier = Identifier::classify(raw_identifier);
        let predicate = identifier.write_predicate();
        debug!("Update {identifier} using filter {predicate}");

        self.store
            .find_one_and_update(&predicate, changes)
            .await
            .map_err(|e| ServiceError::store(Operation::Update, e))?
            .ok_or(ServiceError::NotFound)
    }

    /// Remove the document the identifier addresses.
    pub async fn delete(&self, raw_identifier: &str) -> Result<(), ServiceError> {
        let identifier = Identifier::classify(raw_identifier);
        let predicate = identifier.write_predicate();
        debug!("Delete {identifier} using filter {predicate}");

        let deleted = self
            .store
            .delete_one(&predicate)
            .await
            .map_err(|e| ServiceError::store(Operation::Delete, e))?;

        if deleted {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}

fn created_id(document: &Document) -> &str {
    document
        .get(crate::store::ID_FIELD)
        .and_then(|v| v.as_str())
        .unwrap_or("<none>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, ID_FIELD};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("connection reset".to_string())
    }

    fn service_with(documents: Vec<Value>) -> GeoJsonService {
        let store = MemoryStore::with_documents(documents.into_iter().map(doc).collect());
        GeoJsonService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_list_empty_collection() {
        let service = service_with(vec![]);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_code_falls_back_to_code_field() {
        let service = service_with(vec![
            json!({ "country_name": "Canada", "cca3_code": "CAN" }),
            json!({ "country_name": "United States", "cca3_code": "USA" }),
        ]);

        let found = service.get("USA").await.unwrap();
        assert_eq!(found["country_name"], "United States");
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let service = service_with(vec![json!({ "country_name": "Uruguay", "cca3_code": "URY" })]);
        let found = service.get("Uruguay").await.unwrap();
        assert_eq!(found["cca3_code"], "URY");
    }

    #[tokio::test]
    async fn test_get_unknown_identifier_is_not_found() {
        let service = service_with(vec![json!({ "country_name": "Uruguay" })]);
        assert_matches!(service.get("Paraguay").await, Err(ServiceError::NotFound));
        assert_matches!(
            service.get("65a1b2c3d4e5f60718293a4b").await,
            Err(ServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_create_then_get_by_assigned_id() {
        let service = service_with(vec![]);
        let body = doc(json!({ "country_name": "Bhutan", "cca3_code": "BTN", "geometry": null }));

        let created = service.create(body.clone()).await.unwrap();
        let id = created[ID_FIELD].as_str().unwrap().to_string();
        let fetched = service.get(&id).await.unwrap();

        assert_eq!(fetched, created);
        let mut without_id = fetched.clone();
        without_id.remove(ID_FIELD);
        assert_eq!(without_id, body);
    }

    #[tokio::test]
    async fn test_update_preserves_unnamed_fields() {
        let service = service_with(vec![]);
        let created = service.create(doc(json!({ "a": 1, "b": 2 }))).await.unwrap();
        let id = created[ID_FIELD].as_str().unwrap().to_string();

        let updated = service.update(&id, doc(json!({ "b": 3 }))).await.unwrap();

        assert_eq!(
            Value::Object(updated),
            json!({ "_id": id, "a": 1, "b": 3 })
        );
    }

    #[tokio::test]
    async fn test_update_three_letter_identifier_only_matches_code() {
        // "USA" is also this document's name, but writes treat it as a code
        let service = service_with(vec![json!({ "country_name": "USA", "cca3_code": "XXX" })]);

        let result = service
            .update("USA", doc(json!({ "country_name": "United States" })))
            .await;

        assert_matches!(result, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_update_by_code() {
        let service = service_with(vec![json!({ "country_name": "USA", "cca3_code": "USA" })]);

        let updated = service
            .update("USA", doc(json!({ "country_name": "United States" })))
            .await
            .unwrap();

        assert_eq!(updated["country_name"], "United States");
        assert_eq!(updated["cca3_code"], "USA");
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found_second_time() {
        let service = service_with(vec![json!({ "country_name": "Monaco", "cca3_code": "MCO" })]);

        service.delete("Monaco").await.unwrap();
        assert_matches!(service.delete("Monaco").await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_long_name_does_not_match_code() {
        let service = service_with(vec![json!({ "country_name": "Monaco", "cca3_code": "Monaco" })]);
        // Name predicate, so the code field is never consulted
        service.delete("Monaco").await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_failure_messages() {
        let err = unavailable();
        assert_eq!(
            Operation::List.failure_message(&err),
            "Failed to fetch data: Store unavailable: connection reset"
        );
        assert_eq!(
            Operation::Get.failure_message(&err),
            "Failed to fetch data: Store unavailable: connection reset"
        );
        assert_eq!(Operation::Create.failure_message(&err), "Failed to add data");
        assert_eq!(Operation::Update.failure_message(&err), "Failed to update data");
        assert_eq!(Operation::Delete.failure_message(&err), "Failed to delete data");
    }
}
