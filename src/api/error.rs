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

//! Rendering of request outcomes as HTTP responses.
//!
//! | Outcome      | Status | Body                                             |
//! |--------------|--------|--------------------------------------------------|
//! | `Ok`         | 200 (201 for create) | the value                          |
//! | `NotFound`   | 404    | `{"message": ...}` for get, `{"error": ...}` otherwise |
//! | `BadRequest` | 400    | `{"error": ...}`                                 |
//! | `Internal`   | 500    | `{"error": ...}`                                 |
//!
//! The two 404 body shapes are what existing clients parse and are kept
//! as they are.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use super::responses::{ErrorResponse, MessageResponse};
use crate::outcome::Outcome;
use crate::service::{Operation, ServiceError};

pub const NOT_FOUND_MESSAGE: &str = "Data not found";
pub const DELETED_MESSAGE: &str = "Data deleted successfully";

/// Status code for a successful `operation`.
pub fn success_status(operation: Operation) -> StatusCode {
    match operation {
        Operation::Create => StatusCode::CREATED,
        Operation::List | Operation::Get | Operation::Update | Operation::Delete => StatusCode::OK,
    }
}

/// Render the outcome of `operation`.
pub fn render<T: Serialize>(operation: Operation, outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Ok(value) => (success_status(operation), Json(value)).into_response(),
        Outcome::NotFound => not_found(operation),
        Outcome::BadRequest(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
        }
        Outcome::Internal(message) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(message))).into_response()
        }
    }
}

/// Render a service result for `operation`.
pub fn render_result<T: Serialize>(
    operation: Operation,
    result: Result<T, ServiceError>,
) -> Response {
    render(operation, Outcome::from_result(operation, result))
}

fn not_found(operation: Operation) -> Response {
    match operation {
        Operation::Get => {
            (StatusCode::NOT_FOUND, Json(MessageResponse::new(NOT_FOUND_MESSAGE))).into_response()
        }
        _ => (StatusCode::NOT_FOUND, Json(ErrorResponse::new(NOT_FOUND_MESSAGE))).into_response(),
    }
}

/// Response for any collection request received before the store is ready.
pub fn not_ready() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(ServiceError::NotReady.to_string())),
    )
        .into_response()
}
