//! Local JSON document store.
//!
//! Records live in a single JSON file using the TinyDB table layout, so a
//! database file written by earlier deployments can be opened as is:
//!
//! ```json
//! {"_default": {"1": {"name": "Squats", ...}, "2": {...}}}
//! ```
//!
//! The whole table is loaded into memory on open. The file is rewritten only
//! when the store is seeded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::catalog::store::{CatalogStore, SeedOutcome, StoreError};
use crate::core::exercise::Exercise;
use crate::matching::predicate::Predicate;

/// On-disk document layout. Keys are document ids.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentFile {
    #[serde(rename = "_default", default)]
    table: BTreeMap<u64, Exercise>,
}

pub struct EmbeddedStore {
    path: PathBuf,
    records: RwLock<Vec<Exercise>>,
}

impl EmbeddedStore {
    /// Open the store at `path`, creating the file and its parent directory
    /// if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created, read or parsed.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let document = if tokio::fs::try_exists(path).await.map_err(io_err)? {
            let content = tokio::fs::read_to_string(path).await.map_err(io_err)?;
            if content.trim().is_empty() {
                DocumentFile::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
            let document = DocumentFile::default();
            write_document(path, &document).await?;
            tracing::debug!("Created empty catalog file at {}", path.display());
            document
        };

        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(document.table.into_values().collect()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn write_document(path: &Path, document: &DocumentFile) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[async_trait]
impl CatalogStore for EmbeddedStore {
    fn backend(&self) -> &'static str {
        "embedded"
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.len())
    }

    async fn seed_if_empty(&self, records: &[Exercise]) -> Result<SeedOutcome, StoreError> {
        let mut stored = self.records.write().await;
        if !stored.is_empty() {
            return Ok(SeedOutcome::AlreadyPopulated(stored.len()));
        }

        // TinyDB document ids start at 1
        let document = DocumentFile {
            table: (1u64..).zip(records.iter().cloned()).collect(),
        };
        write_document(&self.path, &document).await?;

        stored.extend(records.iter().cloned());
        Ok(SeedOutcome::Seeded(records.len()))
    }

    async fn query(&self, predicate: &Predicate) -> Result<Vec<Exercise>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|exercise| predicate.matches(exercise))
            .cloned()
            .collect())
    }
}
