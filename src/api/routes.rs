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

//! Route definitions.

use axum::{
    extract::Extension,
    middleware,
    routing::get,
    Router,
};

use super::{gate, handlers};
use crate::store::StoreHandle;

/// Build the API router: `/geojson` behind the readiness gate, plus `/health`.
pub fn build_router(handle: StoreHandle) -> Router {
    let documents = Router::new()
        .route(
            "/geojson",
            get(handlers::list_documents).post(handlers::create_document),
        )
        .route(
            "/geojson/:identifier",
            get(handlers::get_document)
                .put(handlers::update_document)
                .delete(handlers::delete_document),
        )
        .route_layer(middleware::from_fn_with_state(
            handle.clone(),
            gate::require_store,
        ));

    Router::new()
        .merge(documents)
        .route("/health", get(handlers::health_check))
        .layer(Extension(handle))
}
