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

//! HTTP handlers for the `/geojson` collection and `/health`.
//!
//! Collection handlers only run once the readiness gate has put the
//! connected store into the request extensions.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::error::{render_result, DELETED_MESSAGE};
use super::responses::{ErrorResponse, GeoJsonDocument, HealthResponse, MessageResponse};
use crate::service::{GeoJsonService, Operation, ServiceError};
use crate::store::{Document, DocumentStore, StoreHandle};

type Store = Extension<Arc<dyn DocumentStore>>;

fn body_or_bad_request(body: Result<Json<Document>, JsonRejection>) -> Result<Document, ServiceError> {
    body.map(|Json(document)| document)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

/// List every document
#[utoipa::path(
    get,
    path = "/geojson",
    responses(
        (status = 200, description = "All documents in the collection", body = [GeoJsonDocument]),
        (status = 500, description = "Store failure or store not ready", body = ErrorResponse),
    ),
    tag = "GeoJSON"
)]
pub async fn list_documents(Extension(store): Store) -> Response {
    let result = GeoJsonService::new(store).list().await;
    render_result(Operation::List, result)
}

/// Get one document by id, country name or country code
#[utoipa::path(
    get,
    path = "/geojson/{identifier}",
    params(
        ("identifier" = String, Path, description = "24-hex object id, country name or cca3 code"),
    ),
    responses(
        (status = 200, description = "The first matching document", body = GeoJsonDocument),
        (status = 404, description = "No document matches", body = MessageResponse),
        (status = 500, description = "Store failure or store not ready", body = ErrorResponse),
    ),
    tag = "GeoJSON"
)]
pub async fn get_document(Extension(store): Store, Path(identifier): Path<String>) -> Response {
    let result = GeoJsonService::new(store).get(&identifier).await;
    render_result(Operation::Get, result)
}

/// Create a document
#[utoipa::path(
    post,
    path = "/geojson",
    request_body = GeoJsonDocument,
    responses(
        (status = 201, description = "Document created with a new _id", body = GeoJsonDocument),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 500, description = "Store failure or store not ready", body = ErrorResponse),
    ),
    tag = "GeoJSON"
)]
pub async fn create_document(
    Extension(store): Store,
    body: Result<Json<Document>, JsonRejection>,
) -> Response {
    let result = match body_or_bad_request(body) {
        Ok(document) => GeoJsonService::new(store).create(document).await,
        Err(e) => Err(e),
    };
    render_result(Operation::Create, result)
}

/// Merge fields into a document
///
/// Three-character identifiers address `cca3_code`, other non-id
/// identifiers address `country_name`.
#[utoipa::path(
    put,
    path = "/geojson/{identifier}",
    params(
        ("identifier" = String, Path, description = "24-hex object id, cca3 code (3 characters) or country name"),
    ),
    request_body = GeoJsonDocument,
    responses(
        (status = 200, description = "The updated document", body = GeoJsonDocument),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 404, description = "No document matches", body = ErrorResponse),
        (status = 500, description = "Store failure or store not ready", body = ErrorResponse),
    ),
    tag = "GeoJSON"
)]
pub async fn update_document(
    Extension(store): Store,
    Path(identifier): Path<String>,
    body: Result<Json<Document>, JsonRejection>,
) -> Response {
    let result = match body_or_bad_request(body) {
        Ok(changes) => GeoJsonService::new(store).update(&identifier, changes).await,
        Err(e) => Err(e),
    };
    render_result(Operation::Update, result)
}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/geojson/{identifier}",
    params(
        ("identifier" = String, Path, description = "24-hex object id, cca3 code (3 characters) or country name"),
    ),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 404, description = "No document matches", body = ErrorResponse),
        (status = 500, description = "Store failure or store not ready", body = ErrorResponse),
    ),
    tag = "GeoJSON"
)]
pub async fn delete_document(Extension(store): Store, Path(identifier): Path<String>) -> Response {
    let result = GeoJsonService::new(store)
        .delete(&identifier)
        .await
        .map(|()| MessageResponse::new(DELETED_MESSAGE));
    render_result(Operation::Delete, result)
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up and the store is ready", body = HealthResponse),
        (status = 503, description = "Store is still connecting or failed to open", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(Extension(handle): Extension<StoreHandle>) -> Response {
    let health = HealthResponse::from_store_status(handle.status().await);
    let status = if health.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health)).into_response()
}
