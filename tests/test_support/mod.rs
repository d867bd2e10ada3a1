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

//! Shared helpers for the integration tests.

pub mod config_helpers;
pub mod mock_components;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use geojson_server::{build_app, Document, DocumentStore, MemoryStore, StoreHandle};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Turn a `json!` object into a document.
pub fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("test document must be an object")
}

/// Application router over a ready memory store holding `documents`.
pub fn router_with(documents: Vec<Value>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_documents(
        documents.into_iter().map(doc).collect(),
    ));
    let handle = StoreHandle::ready(store.clone());
    (build_app(handle), store)
}

/// Application router over any ready store.
pub fn router_over(store: Arc<dyn DocumentStore>) -> Router {
    build_app(StoreHandle::ready(store))
}

/// Send one request and decode the JSON response body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    send_request(router, request).await
}

/// Send a prepared request and decode the JSON response body.
pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
