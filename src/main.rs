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

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use geojson_server::{load_config_file, save_config_file, GeoJsonServer, GeoServerConfig};

#[derive(Parser)]
#[command(name = "geojson-server")]
#[command(about = "REST server for a collection of GeoJSON country documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nrustc: ",
    env!("GEOJSON_RUSTC_VERSION"),
    "\naxum: ",
    env!("GEOJSON_AXUM_VERSION"),
))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/server.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,

    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Run) | None => run_server(cli.config, cli.port).await,
    }
}

/// Run the GeoJSON server
async fn run_server(config_path: PathBuf, port_override: Option<u16>) -> Result<()> {
    let env_file_loaded = load_env_file(&config_path);

    // Logging is configured from the file, so a missing file is created first
    let created_default = !config_path.exists();
    let config = if created_default {
        let mut config = GeoServerConfig::default();
        if let Some(port) = port_override {
            config.server.port = port;
        }
        save_config_file(&config, &config_path)?;
        config
    } else {
        load_config_file(&config_path)?
    };

    init_logging(&config.server.log_level);

    if created_default {
        warn!(
            "Config file '{}' not found. Created default configuration.",
            config_path.display()
        );
    }
    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Starting GeoJSON server");
    debug!("Debug logging is enabled");

    let server = GeoJsonServer::new(config_path, port_override)?;
    debug!("Server configuration: {:?}", server.config());
    server.run().await
}

/// Load `.env` from the config file's directory, if present.
fn load_env_file(config_path: &Path) -> bool {
    let Some(env_file) = config_path.parent().map(|dir| dir.join(".env")) else {
        return false;
    };
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

/// Route `log` records through `tracing-subscriber`.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }
}

/// Validate a configuration file
fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    load_env_file(config_path);

    match load_config_file(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid");
            println!();
            println!("Summary:");
            println!("  Store: {}", config.store.kind());
            if let Some(path) = config.store.collection_path() {
                println!("  Collection file: {}", path.display());
            }
            if let Some(seed) = config.store.seed_file() {
                println!("  Seed file: {}", seed.display());
            }

            if show_resolved {
                println!();
                println!("Resolved server settings:");
                println!("  Host: {}", config.server.host);
                println!("  Port: {}", config.server.port);
                println!("  Log Level: {}", config.server.log_level);
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}
