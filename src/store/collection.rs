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

//! Insertion-ordered document collection shared by the bundled stores.

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use super::object_id::ObjectId;
use super::predicate::Predicate;
use super::{apply_changes, Document, ID_FIELD};

/// Documents keyed by their object id, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    documents: IndexMap<ObjectId, Document>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from existing documents.
    ///
    /// Documents that already carry a valid `_id` keep it; the rest are
    /// assigned a fresh one. Returns the collection and the number of ids
    /// that had to be assigned.
    pub fn from_documents(documents: Vec<Document>) -> (Self, usize) {
        let mut collection = Self::new();
        let mut assigned = 0;

        for mut document in documents {
            let existing = document
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .and_then(|s| ObjectId::parse_str(s).ok())
                .filter(|id| !collection.documents.contains_key(id));

            let id = match existing {
                Some(id) => {
                    // Normalise the stored form to lowercase hex
                    document.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
                    id
                }
                None => {
                    assigned += 1;
                    let id = ObjectId::new();
                    document = with_id_first(id, document);
                    id
                }
            };
            collection.documents.insert(id, document);
        }

        if assigned > 0 {
            debug!("Assigned {assigned} missing or duplicate document id(s) while loading collection");
        }

        (collection, assigned)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn find_all(&self) -> Vec<Document> {
        self.documents.values().cloned().collect()
    }

    /// First document matching the predicate, in insertion order.
    pub fn find_one(&self, predicate: &Predicate) -> Option<Document> {
        if let Predicate::IdEquals(id) = predicate {
            return self.documents.get(id).cloned();
        }
        self.documents
            .values()
            .find(|document| predicate.matches(document))
            .cloned()
    }

    /// Insert a document under a newly generated id, discarding any supplied `_id`.
    pub fn insert_one(&mut self, document: Document) -> Document {
        let id = ObjectId::new();
        let document = with_id_first(id, document);
        self.documents.insert(id, document.clone());
        document
    }

    /// Merge `changes` into the first matching document and return the result.
    pub fn find_one_and_update(
        &mut self,
        predicate: &Predicate,
        changes: Document,
    ) -> Option<Document> {
        let id = self.first_match(predicate)?;
        let document = self.documents.get_mut(&id)?;
        apply_changes(document, changes);
        Some(document.clone())
    }

    /// Remove the first matching document. Returns whether one was removed.
    pub fn delete_one(&mut self, predicate: &Predicate) -> bool {
        match self.first_match(predicate) {
            Some(id) => self.documents.shift_remove(&id).is_some(),
            None => false,
        }
    }

    fn first_match(&self, predicate: &Predicate) -> Option<ObjectId> {
        if let Predicate::IdEquals(id) = predicate {
            return self.documents.contains_key(id).then_some(*id);
        }
        self.documents
            .iter()
            .find(|(_, document)| predicate.matches(document))
            .map(|(id, _)| *id)
    }
}

/// Rebuild `document` with `_id` as its first field.
fn with_id_first(id: ObjectId, document: Document) -> Document {
    let mut stored = Document::new();
    stored.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
    for (key, value) in document {
        if key != ID_FIELD {
            stored.insert(key, value);
        }
    }
    stored
}
