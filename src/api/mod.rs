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

//! REST API for the GeoJSON collection.
//!
//! ## API Structure
//!
//! ```text
//! /health                    - Health check (never gated)
//! /geojson                   - List (GET) and create (POST)
//! /geojson/{identifier}      - Get, update (PUT) and delete by identifier
//! /docs                      - Swagger UI
//! /openapi.json              - OpenAPI document
//! ```
//!
//! ## Module Organization
//!
//! - `handlers` - axum handlers, one per operation
//! - `gate` - readiness middleware in front of `/geojson`
//! - `error` - rendering of outcomes as status codes and bodies
//! - `responses` - response bodies and documentation schemas
//! - `routes` - router construction
//! - `openapi` - OpenAPI document

pub mod error;
pub mod gate;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use handlers::*;
pub use openapi::ApiDoc;
pub use responses::*;
pub use routes::build_router;
