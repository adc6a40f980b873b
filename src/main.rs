//! file-router
//!
//! Builds a route table from a directory whose layout mirrors the URL space
//! and serves it with axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   api/                     source          parser              routing
//!   ├── get.rs        ──▶  HandlerSource ──▶ TreeBuilder ──▶ StructureTree ──▶ mount ──▶ RouteSink
//!   ├── 0-cors.rs          (fs / stub /                                                 │
//!   └── users/             memory)                                      ┌───────────────┤
//!       └── [id]/                                                       ▼               ▼
//!           └── get.rs                                             AxumSink      RecordingSink
//!                                                                      │          (routes cmd)
//!                                                                      ▼
//!                                                               http::HttpServer
//! ```
//!
//! # Commands
//! - `routes`: print what a directory would mount, using placeholder handlers
//! - `serve`: serve a directory with placeholder handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use file_router::config::{load_config, validate_config, ConfigError, RouterConfig};
use file_router::lifecycle::serve;
use file_router::observability::logging;
use file_router::parser::{BuildMode, TreeBuilder};
use file_router::routing::{mount_at, RecordingSink};
use file_router::source::StubSource;

#[derive(Parser)]
#[command(name = "file-router", version)]
#[command(about = "Directory-driven HTTP routing", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Route directory (overrides routes.root_dir)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Mount prefix (overrides routes.mount_path)
    #[arg(short, long, global = true)]
    mount_path: Option<String>,

    /// Skip bad entries instead of failing the build
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the routes the directory mounts
    Routes {
        /// Emit the tree outline and registrations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the directory with placeholder handlers
    Serve {
        /// Bind address (overrides listener.bind_address)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(dir) = cli.dir {
        config.routes.root_dir = dir;
    }
    if let Some(mount_path) = cli.mount_path {
        config.routes.mount_path = mount_path;
    }
    if cli.lenient {
        config.routes.mode = BuildMode::Lenient;
    }
    if let Commands::Serve {
        bind: Some(bind), ..
    } = &cli.command
    {
        config.listener.bind_address = bind.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "file-router starting");

    let source = StubSource::new(&config.routes.root_dir);

    match cli.command {
        Commands::Routes { json } => {
            let tree = TreeBuilder::new(&source)
                .mode(config.routes.mode)
                .build(&config.routes.root_dir)?;
            let mut sink = RecordingSink::new();
            mount_at(&tree, &mut sink, &config.routes.mount_path);

            if json {
                let output = json!({
                    "tree": tree.outline(),
                    "registrations": sink.registrations(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for registration in sink.registrations() {
                    println!("{}", registration);
                }
            }
        }
        Commands::Serve { .. } => {
            serve(config, &source).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
