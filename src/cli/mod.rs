//! Command-line interface for workout-planner.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **serve**: Start the web interface
//! - **plan**: Generate a workout plan in the terminal
//! - **catalog**: List the stored exercises, their facet values, or export the defaults
//!
//! ## Usage
//!
//! ```text
//! # Start the web UI with the embedded store
//! workout-planner serve --port 8080 --open
//!
//! # Use a CouchDB-compatible cloud database instead
//! WORKOUT_DB_URL=https://db.example.com WORKOUT_DB_USERNAME=app \
//!     WORKOUT_DB_PASSWORD=secret workout-planner serve
//!
//! # Strength or stability exercises that target the shoulder
//! workout-planner plan --type strength --type stability --muscle shoulder
//!
//! # JSON output for scripting
//! workout-planner --format json plan --sport swimming
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::cloud::CloudConfig;
use crate::catalog::store::StoreConfig;

pub mod catalog;
pub mod plan;

#[derive(Parser)]
#[command(name = "workout-planner")]
#[command(version)]
#[command(about = "Recommend short workout plans from an exercise catalog")]
#[command(
    long_about = "workout-planner picks up to five exercises from a catalog, filtered by exercise type, sport and muscle target.\n\nValues within one filter are OR'd, different filters are AND'd, and the matches are sampled at random."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServeArgs),

    /// Generate a workout plan
    Plan(plan::PlanArgs),

    /// Inspect the exercise catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "PORT")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

/// Where the exercise catalog lives
#[derive(clap::Args, Debug, Clone)]
pub struct StoreArgs {
    /// Embedded JSON document file
    #[arg(
        long,
        global = true,
        env = "WORKOUT_DB_PATH",
        default_value = "data/workout_db.json"
    )]
    pub db_path: PathBuf,

    /// CouchDB-compatible server URL; selects the cloud store when set
    #[arg(long, global = true, env = "WORKOUT_DB_URL")]
    pub db_url: Option<String>,

    /// Cloud database name
    #[arg(long, global = true, env = "WORKOUT_DB_NAME", default_value = "exercises")]
    pub db_name: String,

    /// Cloud database user
    #[arg(long, global = true, env = "WORKOUT_DB_USERNAME")]
    pub db_username: Option<String>,

    /// Cloud database password
    #[arg(long, global = true, env = "WORKOUT_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,
}

impl StoreArgs {
    pub fn to_config(&self) -> StoreConfig {
        match &self.db_url {
            Some(url) => {
                let mut config = CloudConfig::new(url, &self.db_name);
                if let Some(user) = &self.db_username {
                    config = config.with_credentials(user, self.db_password.clone());
                }
                StoreConfig::Cloud(config)
            }
            None => StoreConfig::Embedded {
                path: self.db_path.clone(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Build the tokio runtime used by the async store and server code
pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}
