use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::catalog::store::{CatalogStore, StoreError};
use crate::core::exercise::Exercise;
use crate::core::selection::Selection;
use crate::matching::predicate::Predicate;

/// Returned when no facet has a selected value
pub const NO_SELECTION_MESSAGE: &str = "Please select at least one attribute to generate a workout.";

/// Returned when the selection matches no exercise
pub const NO_MATCHES_MESSAGE: &str =
    "No exercises found matching your criteria. Try different selections!";

/// Default maximum number of exercises in a plan
pub const DEFAULT_MAX_EXERCISES: usize = 5;

/// A generated workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutPlan {
    /// Randomly sampled exercises, in no particular order
    #[serde(rename = "workout_plan")]
    pub exercises: Vec<Exercise>,

    /// Guidance shown when the plan is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WorkoutPlan {
    fn empty(message: &str) -> Self {
        Self {
            exercises: Vec::new(),
            message: Some(message.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Configuration for the plan generator
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Upper bound on plan length
    pub max_exercises: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_exercises: DEFAULT_MAX_EXERCISES,
        }
    }
}

/// Builds workout plans from a catalog store
pub struct PlanGenerator<'a> {
    store: &'a dyn CatalogStore,
    config: PlanConfig,
}

impl<'a> PlanGenerator<'a> {
    /// Create a new plan generator with default configuration
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self {
            store,
            config: PlanConfig::default(),
        }
    }

    /// Create a new plan generator with custom configuration
    pub fn with_config(store: &'a dyn CatalogStore, config: PlanConfig) -> Self {
        Self { store, config }
    }

    /// Filter the catalog by `selection` and sample a plan with the
    /// thread-local random generator.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    pub async fn generate(&self, selection: &Selection) -> Result<WorkoutPlan, StoreError> {
        let Some(candidates) = self.candidates(selection).await? else {
            return Ok(WorkoutPlan::empty(NO_SELECTION_MESSAGE));
        };
        Ok(self.sample(&candidates, &mut rand::rng()))
    }

    /// Same as [`PlanGenerator::generate`] with a caller-supplied random source
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    pub async fn generate_with_rng<R: Rng + Send + ?Sized>(
        &self,
        selection: &Selection,
        rng: &mut R,
    ) -> Result<WorkoutPlan, StoreError> {
        let Some(candidates) = self.candidates(selection).await? else {
            return Ok(WorkoutPlan::empty(NO_SELECTION_MESSAGE));
        };
        Ok(self.sample(&candidates, rng))
    }

    /// Every exercise matching the selection, before sampling.
    /// `None` when nothing was selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    pub async fn candidates(
        &self,
        selection: &Selection,
    ) -> Result<Option<Vec<Exercise>>, StoreError> {
        let Some(predicate) = Predicate::from_selection(selection) else {
            return Ok(None);
        };
        let candidates = self.store.query(&predicate).await?;
        tracing::debug!(
            "{} candidate exercises for {:?}",
            candidates.len(),
            selection
        );
        Ok(Some(candidates))
    }

    fn sample<R: Rng + ?Sized>(&self, candidates: &[Exercise], rng: &mut R) -> WorkoutPlan {
        if candidates.is_empty() {
            return WorkoutPlan::empty(NO_MATCHES_MESSAGE);
        }

        let amount = candidates.len().min(self.config.max_exercises);
        WorkoutPlan {
            exercises: candidates.choose_multiple(rng, amount).cloned().collect(),
            message: None,
        }
    }
}
