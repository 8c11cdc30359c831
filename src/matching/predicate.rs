use serde_json::{json, Map, Value};

use crate::core::exercise::Exercise;
use crate::core::selection::Selection;
use crate::core::types::Facet;

/// Boolean combinators over an exercise's facet tags.
///
/// Stores evaluate a predicate in-process with [`Predicate::matches`] or
/// translate it to their own query language (see [`Predicate::to_mango_selector`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The exercise carries `value` among its tags for `facet`
    Contains { facet: Facet, value: String },
    /// At least one inner predicate holds. An empty list never holds.
    Any(Vec<Predicate>),
    /// Every inner predicate holds. An empty list always holds.
    All(Vec<Predicate>),
}

impl Predicate {
    /// Matches every exercise
    #[must_use]
    pub fn always() -> Self {
        Self::All(Vec::new())
    }

    /// OR across `values` within a single facet
    pub fn any_of<S: AsRef<str>>(facet: Facet, values: &[S]) -> Self {
        Self::Any(
            values
                .iter()
                .map(|value| Self::Contains {
                    facet,
                    value: value.as_ref().to_string(),
                })
                .collect(),
        )
    }

    /// AND across the per-facet OR predicates of a selection.
    ///
    /// Returns `None` when nothing was selected; callers must treat that
    /// as "no query", not as "match everything".
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        let facets: Vec<Self> = selection
            .active_facets()
            .map(|(facet, values)| Self::any_of(facet, values))
            .collect();

        if facets.is_empty() {
            None
        } else {
            Some(Self::All(facets))
        }
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        match self {
            Self::Contains { facet, value } => exercise.has_tag(*facet, value),
            Self::Any(inner) => inner.iter().any(|p| p.matches(exercise)),
            Self::All(inner) => inner.iter().all(|p| p.matches(exercise)),
        }
    }

    /// Translate into a CouchDB Mango selector for `_find`
    pub fn to_mango_selector(&self) -> Value {
        match self {
            Self::Contains { facet, value } => {
                let mut clause = Map::new();
                clause.insert(facet.field_name().to_string(), json!({ "$all": [value] }));
                Value::Object(clause)
            }
            Self::Any(inner) if inner.is_empty() => json!({ "_id": { "$exists": false } }),
            Self::Any(inner) => {
                json!({ "$or": inner.iter().map(Self::to_mango_selector).collect::<Vec<_>>() })
            }
            Self::All(inner) if inner.is_empty() => json!({ "_id": { "$gt": null } }),
            Self::All(inner) => {
                json!({ "$and": inner.iter().map(Self::to_mango_selector).collect::<Vec<_>>() })
            }
        }
    }
}
