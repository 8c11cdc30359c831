//! Workout plan generation.
//!
//! - [`Predicate`]: Boolean combinators over exercise facet tags
//! - [`PlanGenerator`]: Filters the catalog and samples a bounded plan
//!
//! ## Matching Rules
//!
//! 1. Within one facet, selected values are OR'd: `types = [strength, stability]`
//!    matches an exercise tagged with either.
//! 2. Across facets, the per-facet conditions are AND'd.
//! 3. A facet with no selected values does not filter at all.
//! 4. If no facet has a value, no query runs and the plan carries a guidance message.
//!
//! The candidates are then sampled uniformly without replacement, keeping at
//! most [`DEFAULT_MAX_EXERCISES`] of them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use workout_planner::catalog::store::{open_store, StoreConfig};
//! use workout_planner::core::selection::Selection;
//! use workout_planner::matching::engine::PlanGenerator;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = open_store(&StoreConfig::Embedded { path: PathBuf::from("db.json") }).await?;
//! let selection = Selection::new(vec![], vec!["swimming".into()], vec![]);
//!
//! let plan = PlanGenerator::new(store.as_ref()).generate(&selection).await?;
//! for exercise in &plan.exercises {
//!     println!("{}", exercise.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`Predicate`]: predicate::Predicate
//! [`PlanGenerator`]: engine::PlanGenerator
//! [`DEFAULT_MAX_EXERCISES`]: engine::DEFAULT_MAX_EXERCISES

pub mod engine;
pub mod predicate;
