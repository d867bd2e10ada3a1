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

//! Store connection handle with explicit readiness.
//!
//! The server starts accepting requests before the store has been opened.
//! A [`StoreHandle`] is shared between the startup task (which moves it to
//! `Ready` or `Failed`) and the request gate (which only forwards requests
//! while it is `Ready`).

use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::DocumentStore;

#[derive(Clone)]
enum StoreState {
    Connecting,
    Ready(Arc<dyn DocumentStore>),
    Failed(String),
}

/// Connection state reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum StoreStatus {
    /// The store is still being opened
    Connecting,
    /// The store is open and serving requests
    Ready {
        /// Backend kind (`memory` or `file`)
        kind: String,
    },
    /// Opening the store failed
    Failed {
        /// Reason the store could not be opened
        reason: String,
    },
}

/// Thread-safe, cloneable handle to the (eventually) connected store.
#[derive(Clone)]
pub struct StoreHandle {
    state: Arc<RwLock<StoreState>>,
}

impl StoreHandle {
    /// Create a handle that is not yet connected.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::Connecting)),
        }
    }

    /// Create a handle that is already connected to `store`.
    pub fn ready(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::Ready(store))),
        }
    }

    pub async fn set_ready(&self, store: Arc<dyn DocumentStore>) {
        info!("Connected to {} store", store.kind());
        *self.state.write().await = StoreState::Ready(store);
    }

    pub async fn set_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        error!("Failed to connect to store: {reason}");
        *self.state.write().await = StoreState::Failed(reason);
    }

    /// The connected store, or `None` while connecting or after a failure.
    pub async fn store(&self) -> Option<Arc<dyn DocumentStore>> {
        match &*self.state.read().await {
            StoreState::Ready(store) => Some(store.clone()),
            StoreState::Connecting | StoreState::Failed(_) => None,
        }
    }

    pub async fn is_ready(&self) -> bool {
        matches!(&*self.state.read().await, StoreState::Ready(_))
    }

    pub async fn status(&self) -> StoreStatus {
        match &*self.state.read().await {
            StoreState::Connecting => StoreStatus::Connecting,
            StoreState::Ready(store) => StoreStatus::Ready {
                kind: store.kind().to_string(),
            },
            StoreState::Failed(reason) => StoreStatus::Failed {
                reason: reason.clone(),
            },
        }
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new()
    }
}
