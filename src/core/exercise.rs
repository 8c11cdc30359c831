use serde::{Deserialize, Serialize};

use crate::core::types::Facet;

/// A single exercise in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique human-readable name
    pub name: String,

    /// Category tags (e.g. "strength", "cardio")
    #[serde(default)]
    pub types: Vec<String>,

    /// Associated sports, often empty
    #[serde(default)]
    pub sports: Vec<String>,

    /// Targeted body areas
    #[serde(default)]
    pub muscle_targets: Vec<String>,

    /// Required equipment. Not used for filtering.
    #[serde(default)]
    pub equipment: Vec<String>,

    /// Demonstration video
    #[serde(alias = "youtube_link")]
    pub reference_link: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, reference_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            sports: Vec::new(),
            muscle_targets: Vec::new(),
            equipment: Vec::new(),
            reference_link: reference_link.into(),
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = to_tags(types);
        self
    }

    #[must_use]
    pub fn with_sports(mut self, sports: &[&str]) -> Self {
        self.sports = to_tags(sports);
        self
    }

    #[must_use]
    pub fn with_muscle_targets(mut self, muscle_targets: &[&str]) -> Self {
        self.muscle_targets = to_tags(muscle_targets);
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, equipment: &[&str]) -> Self {
        self.equipment = to_tags(equipment);
        self
    }

    /// Tags this exercise carries for the given facet
    pub fn tags(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Type => &self.types,
            Facet::Sport => &self.sports,
            Facet::MuscleTarget => &self.muscle_targets,
        }
    }

    /// Exact, case-sensitive tag membership
    pub fn has_tag(&self, facet: Facet, value: &str) -> bool {
        self.tags(facet).iter().any(|tag| tag == value)
    }
}

fn to_tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
