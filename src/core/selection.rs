use serde::{Deserialize, Serialize};

use crate::core::types::Facet;

/// Facet values chosen by the caller.
///
/// Every list is optional on the wire; a missing key is the same as an
/// empty list, which means "do not filter on this facet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, rename = "selected_types")]
    pub types: Vec<String>,

    #[serde(default, rename = "selected_sports")]
    pub sports: Vec<String>,

    #[serde(default, rename = "selected_muscle_targets")]
    pub muscle_targets: Vec<String>,
}

impl Selection {
    pub fn new(types: Vec<String>, sports: Vec<String>, muscle_targets: Vec<String>) -> Self {
        Self {
            types,
            sports,
            muscle_targets,
        }
    }

    /// Values selected for a facet
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Type => &self.types,
            Facet::Sport => &self.sports,
            Facet::MuscleTarget => &self.muscle_targets,
        }
    }

    /// Facets with at least one selected value, in declaration order
    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &[String])> + '_ {
        Facet::ALL
            .into_iter()
            .map(move |facet| (facet, self.values(facet)))
            .filter(|(_, values)| !values.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_facets().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_empty() {
        let selection: Selection =
            serde_json::from_str(r#"{"selected_sports": ["swimming"]}"#).unwrap();
        assert!(selection.types.is_empty());
        assert_eq!(selection.sports, vec!["swimming".to_string()]);
        assert!(selection.muscle_targets.is_empty());
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_selection() {
        let selection: Selection = serde_json::from_str("{}").unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = serde_json::from_str::<Selection>(r#"{"selected_types": "cardio"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_active_facets_skips_empty_lists() {
        let selection = Selection::new(
            vec!["strength".to_string()],
            Vec::new(),
            vec!["shoulder".to_string(), "core".to_string()],
        );
        let active: Vec<Facet> = selection.active_facets().map(|(f, _)| f).collect();
        assert_eq!(active, vec![Facet::Type, Facet::MuscleTarget]);
    }
}
