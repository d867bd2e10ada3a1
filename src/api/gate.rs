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

//! Readiness gate for the collection routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use log::warn;

use super::error::not_ready;
use crate::store::StoreHandle;

/// Forward the request only when the store is connected.
///
/// The connected store is inserted as an `Arc<dyn DocumentStore>` request
/// extension. Otherwise the request is answered with 500
/// `{"error": "Database not initialized"}` and never reaches a handler.
pub async fn require_store(
    State(handle): State<StoreHandle>,
    mut request: Request,
    next: Next,
) -> Response {
    match handle.store().await {
        Some(store) => {
            request.extensions_mut().insert(store);
            next.run(request).await
        }
        None => {
            warn!(
                "Rejecting {} {}: store is not ready",
                request.method(),
                request.uri().path()
            );
            not_ready()
        }
    }
}
