use serde::{Deserialize, Serialize};

/// One of the independent selection dimensions of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Type,
    Sport,
    MuscleTarget,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Type, Facet::Sport, Facet::MuscleTarget];

    /// Name of the record field holding this facet's tags
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Type => "types",
            Self::Sport => "sports",
            Self::MuscleTarget => "muscle_targets",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type => write!(f, "Exercise type"),
            Self::Sport => write!(f, "Sport"),
            Self::MuscleTarget => write!(f, "Muscle target"),
        }
    }
}
