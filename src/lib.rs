//! # workout-planner
//!
//! A library and web application that recommends a short workout from a
//! catalog of exercises.
//!
//! Each exercise carries tag lists for three facets: exercise type (strength,
//! cardio, ...), sport (swimming, running, ...) and muscle target (core,
//! shoulder, ...). A caller picks any number of values per facet and gets
//! back up to five matching exercises chosen at random.
//!
//! ## Features
//!
//! - **OR within a facet, AND across facets**: `types = [strength, stability]`
//!   with `muscle_targets = [shoulder]` means "(strength or stability) and shoulder"
//! - **Unbiased sampling**: plans are drawn uniformly without replacement
//! - **Two storage backends**: a local JSON document file or a
//!   CouchDB-compatible cloud database, both seeded with a default catalog
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use workout_planner::{open_store, PlanGenerator, Selection, StoreConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = StoreConfig::Embedded { path: PathBuf::from("data/workout_db.json") };
//! let store = open_store(&config).await?;
//!
//! let selection = Selection::new(
//!     vec!["strength".into(), "stability".into()],
//!     vec![],
//!     vec!["shoulder".into()],
//! );
//! let plan = PlanGenerator::new(store.as_ref()).generate(&selection).await?;
//!
//! for exercise in &plan.exercises {
//!     println!("{}: {}", exercise.name, exercise.reference_link);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog storage backends and the default catalog
//! - [`core`]: Exercise, facet and selection types
//! - [`matching`]: Predicates and the plan generator
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based planning

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{open_store, CatalogStore, StoreConfig, StoreError};
pub use core::exercise::Exercise;
pub use core::selection::Selection;
pub use core::types::Facet;
pub use matching::engine::{PlanConfig, PlanGenerator, WorkoutPlan};
pub use matching::predicate::Predicate;
