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

//! OpenAPI documentation.
//!
//! The spec is served at `/openapi.json` and the Swagger UI at `/docs/`.

use utoipa::OpenApi;

use super::responses::{ErrorResponse, GeoJsonDocument, HealthResponse, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health_check,
        super::handlers::list_documents,
        super::handlers::get_document,
        super::handlers::create_document,
        super::handlers::update_document,
        super::handlers::delete_document,
    ),
    components(
        schemas(
            GeoJsonDocument,
            HealthResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "GeoJSON", description = "GeoJSON document collection"),
    ),
    info(
        title = "GeoJSON Server API",
        version = "1.0.0",
        description = "REST API over a collection of GeoJSON country documents.\n\n## Identifiers\n\n`/geojson/{identifier}` accepts a 24-hex object id, a country name or a three-letter `cca3_code`.\n\n- `GET` matches `country_name` or `cca3_code` for any non-id identifier.\n- `PUT` and `DELETE` match `cca3_code` when the identifier is exactly three characters and `country_name` otherwise.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDoc;
