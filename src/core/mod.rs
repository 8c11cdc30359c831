//! Core data types for workout planning.
//!
//! - [`Exercise`]: A catalog entry with its type, sport, muscle target and equipment tags
//! - [`Facet`]: One of the three selection dimensions (type, sport, muscle target)
//! - [`Selection`]: The facet values a caller picked
//!
//! ## Tag Matching
//!
//! Tags are compared with exact string equality. There is no case folding,
//! trimming or fuzzy matching: `"Strength"` does not match `"strength"`.
//!
//! [`Exercise`]: exercise::Exercise
//! [`Facet`]: types::Facet
//! [`Selection`]: selection::Selection

pub mod exercise;
pub mod selection;
pub mod types;
