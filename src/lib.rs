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

//! GeoJSON document server.
//!
//! A REST interface over one collection of GeoJSON country documents. Any
//! document can be addressed by its store-assigned object id, its
//! `country_name` or its three-letter `cca3_code` (see [`resolver`]).

pub mod api;
pub mod config;
pub mod outcome;
pub mod resolver;
pub mod server;
pub mod service;
pub mod store;

// Main exports for library users
pub use config::{
    load_config_file, save_config_file, ConfigError, GeoServerConfig, ServerSettings, StoreConfig,
};
pub use outcome::Outcome;
pub use resolver::Identifier;
pub use server::{build_app, GeoJsonServer};
pub use service::{GeoJsonService, Operation, ServiceError};
pub use store::{
    Document, DocumentStore, FileStore, MemoryStore, ObjectId, Predicate, StoreError, StoreHandle,
    StoreStatus,
};
