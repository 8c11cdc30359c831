use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::exercise::Exercise;
use crate::core::types::Facet;

/// Every selectable value of each facet across a set of exercises.
///
/// Values are de-duplicated and sorted so the selection UI is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub exercise_types: Vec<String>,
    pub sports: Vec<String>,
    pub muscle_targets: Vec<String>,
}

impl FacetOptions {
    pub fn from_exercises(exercises: &[Exercise]) -> Self {
        let collect = |facet: Facet| -> Vec<String> {
            exercises
                .iter()
                .flat_map(|e| e.tags(facet).iter().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            exercise_types: collect(Facet::Type),
            sports: collect(Facet::Sport),
            muscle_targets: collect(Facet::MuscleTarget),
        }
    }

    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Type => &self.exercise_types,
            Facet::Sport => &self.sports,
            Facet::MuscleTarget => &self.muscle_targets,
        }
    }
}
