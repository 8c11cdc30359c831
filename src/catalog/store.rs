use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::cloud::{CloudConfig, CloudStore};
use crate::catalog::defaults::{self, CatalogError};
use crate::catalog::embedded::EmbeddedStore;
use crate::core::exercise::Exercise;
use crate::matching::predicate::Predicate;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request to document database failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document database returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Document database rejected {rejected} of {total} seed records: {reason}")]
    Seed {
        rejected: usize,
        total: usize,
        reason: String,
    },

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    DefaultCatalog(#[from] CatalogError),
}

/// What `seed_if_empty` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and this many records were inserted
    Seeded(usize),
    /// The store already held this many records and was left untouched
    AlreadyPopulated(usize),
}

/// Persistent home of the exercise catalog.
///
/// The catalog is written at most once, by [`CatalogStore::seed_if_empty`],
/// and only read afterwards.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Short name of the backend, for logs
    fn backend(&self) -> &'static str;

    /// Number of stored records
    async fn len(&self) -> Result<usize, StoreError>;

    /// Insert `records` if and only if the store holds no records
    async fn seed_if_empty(&self, records: &[Exercise]) -> Result<SeedOutcome, StoreError>;

    /// All records satisfying `predicate`, in no particular order
    async fn query(&self, predicate: &Predicate) -> Result<Vec<Exercise>, StoreError>;
}

/// Which backend to open
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// Local JSON document file
    Embedded { path: PathBuf },
    /// CouchDB-compatible document database
    Cloud(CloudConfig),
}

impl std::fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded { path } => write!(f, "embedded store at {}", path.display()),
            Self::Cloud(config) => write!(
                f,
                "cloud store {} (database '{}')",
                config.url, config.database
            ),
        }
    }
}

/// Open the configured store and seed it with the default catalog when empty.
///
/// # Errors
///
/// Returns an error if the store cannot be created, reached or read. Callers
/// starting a server should treat this as fatal.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn CatalogStore>, StoreError> {
    let store: Arc<dyn CatalogStore> = match config {
        StoreConfig::Embedded { path } => Arc::new(EmbeddedStore::open(path).await?),
        StoreConfig::Cloud(cloud) => Arc::new(CloudStore::connect(cloud.clone()).await?),
    };

    let defaults = defaults::load_embedded()?;
    match store.seed_if_empty(&defaults).await? {
        SeedOutcome::Seeded(count) => {
            tracing::info!("Catalog empty, seeded {count} exercises into {config}");
        }
        SeedOutcome::AlreadyPopulated(count) => {
            tracing::info!("{config} already holds {count} exercises, skipping seed");
        }
    }

    Ok(store)
}
