use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::exercise::Exercise;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse default catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Embedded at compile time, validated by build.rs
const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/default_exercises.json");

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub exercises: Vec<Exercise>,
}

/// Load the default seed catalog
pub fn load_embedded() -> Result<Vec<Exercise>, CatalogError> {
    from_json(EMBEDDED_CATALOG)
}

/// Parse a catalog from JSON
pub fn from_json(json: &str) -> Result<Vec<Exercise>, CatalogError> {
    let data: CatalogData = serde_json::from_str(json)?;

    // Version check (warn but don't fail)
    if data.version != CATALOG_VERSION {
        tracing::warn!(
            "Catalog version mismatch (expected {}, found {})",
            CATALOG_VERSION,
            data.version
        );
    }

    Ok(data.exercises)
}

/// The embedded default catalog, pretty-printed
pub fn embedded_json() -> &'static str {
    EMBEDDED_CATALOG
}
