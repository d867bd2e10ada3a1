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

//! Response bodies and documentation schemas.

use serde::Serialize;
use utoipa::ToSchema;

use crate::store::StoreStatus;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, `starting` or `unavailable`
    pub status: String,
    /// Connection state of the document store
    #[schema(value_type = Object)]
    pub store: StoreStatus,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthResponse {
    pub fn from_store_status(store: StoreStatus) -> Self {
        let status = match &store {
            StoreStatus::Ready { .. } => "ok",
            StoreStatus::Connecting => "starting",
            StoreStatus::Failed { .. } => "unavailable",
        };
        Self {
            status: status.to_string(),
            store,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.store, StoreStatus::Ready { .. })
    }
}

/// Informational body keyed by `message`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body keyed by `error`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A stored GeoJSON document.
///
/// Documents are free-form JSON objects; only the fields used for lookups
/// are described here. Any other fields are stored and returned unchanged.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "_id": "65a1b2c3d4e5f60718293a4b",
    "country_name": "Bhutan",
    "cca3_code": "BTN",
    "type": "Feature",
    "geometry": { "type": "Point", "coordinates": [90.4, 27.5] }
}))]
pub struct GeoJsonDocument {
    /// Store-assigned object id, 24 hex characters
    #[serde(rename = "_id")]
    pub id: String,
    /// Country name, used for lookups by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    /// Three-letter country code, used for lookups by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cca3_code: Option<String>,
}
