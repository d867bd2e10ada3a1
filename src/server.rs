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

use anyhow::{Context, Result};
use axum::Router;
use log::{error, info};
use std::future::Future;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::config::{load_config_file, GeoServerConfig};
use crate::store::{self, StoreHandle};

/// The GeoJSON HTTP server.
///
/// The listener is bound before the store is opened, so early requests are
/// answered (with "Database not initialized") instead of refused.
pub struct GeoJsonServer {
    config: GeoServerConfig,
    config_file_path: Option<String>,
    handle: StoreHandle,
}

impl GeoJsonServer {
    /// Create a server from a configuration file
    pub fn new(config_path: PathBuf, port_override: Option<u16>) -> Result<Self> {
        let config = load_config_file(&config_path)
            .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;

        let mut server = Self::from_config(config);
        if let Some(port) = port_override {
            server.config.server.port = port;
        }
        server.config_file_path = Some(config_path.display().to_string());
        Ok(server)
    }

    pub fn from_config(config: GeoServerConfig) -> Self {
        Self {
            config,
            config_file_path: None,
            handle: StoreHandle::new(),
        }
    }

    pub fn config(&self) -> &GeoServerConfig {
        &self.config
    }

    /// Handle shared with the request gate; ready once `run` has connected.
    pub fn store_handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    pub fn router(&self) -> Router {
        build_app(self.handle.clone())
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Bind the configured address and serve until `shutdown` completes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    ///
    /// Returns an error, after stopping the listener, when the store cannot
    /// be opened.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(config_file) = &self.config_file_path {
            info!("Config file: {config_file}");
        }
        let addr = listener.local_addr()?;
        info!("Server is running on port {}", addr.port());
        info!("Swagger UI available at http://{addr}/docs/");

        let app = self.router();
        let server_task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
        });

        info!("Opening {} store", self.config.store.kind());
        match store::connect(&self.config.store).await {
            Ok(store) => self.handle.set_ready(store).await,
            Err(e) => {
                self.handle.set_failed(e.to_string()).await;
                server_task.abort();
                return Err(e).context("Failed to connect to the document store");
            }
        }

        match server_task.await {
            Ok(Ok(())) => {
                info!("Shutting down GeoJSON server");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Web API server error: {e}");
                Err(e.into())
            }
            Err(e) => Err(anyhow::anyhow!("Server task failed: {e}")),
        }
    }
}

/// Build the full application: API routes, Swagger UI, CORS and request tracing.
pub fn build_app(handle: StoreHandle) -> Router {
    api::build_router(handle)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", api::ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
