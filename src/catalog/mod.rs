//! Exercise catalog storage.
//!
//! The catalog is a flat set of [`Exercise`] records behind the
//! [`CatalogStore`] trait. Two backends implement it:
//!
//! - [`EmbeddedStore`]: a local JSON document file
//! - [`CloudStore`]: a CouchDB-compatible document database over HTTPS
//!
//! Either one is seeded with the embedded default catalog the first time it
//! is opened empty, and is read-only after that.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use workout_planner::catalog::store::{open_store, StoreConfig};
//! use workout_planner::matching::predicate::Predicate;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = StoreConfig::Embedded { path: PathBuf::from("data/workout_db.json") };
//! let store = open_store(&config).await?;
//!
//! for exercise in store.query(&Predicate::always()).await? {
//!     println!("{}", exercise.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Exercise`]: crate::core::exercise::Exercise
//! [`CatalogStore`]: store::CatalogStore
//! [`EmbeddedStore`]: embedded::EmbeddedStore
//! [`CloudStore`]: cloud::CloudStore

pub mod cloud;
pub mod defaults;
pub mod embedded;
pub mod facets;
pub mod store;
