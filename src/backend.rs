//! Abstract contract of the remote command interface this crate's view
//! models are built from.
//!
//! The engine never talks to storage or the network itself; the
//! presentation layer implements this trait over its transport and awaits
//! the calls sequentially. Errors propagate unchanged and are never retried
//! here, since a retried write could duplicate a non-idempotent mutation.
//! Callers must not have two mutation calls in flight for the same record
//! id, and must refresh the exercise-definition list after mutating
//! definitions.

use crate::filter::FilterSpec;
use crate::pb::PbResult;
use crate::planner::{AddWorkoutPayload, EditWorkoutPayload};
use crate::{ExerciseDefinition, StoredWorkoutRecord, UserConfig};

pub trait WorkoutBackend {
    type Error: std::error::Error;

    /// Stored records matching the filter. Implementations may also filter
    /// server-side; [`crate::filter::apply`] over an unfiltered list gives
    /// the same result.
    fn list_workouts(&self, filter: &FilterSpec) -> Result<Vec<StoredWorkoutRecord>, Self::Error>;

    fn list_exercise_definitions(&self) -> Result<Vec<ExerciseDefinition>, Self::Error>;

    fn list_all_muscle_groups(&self) -> Result<Vec<String>, Self::Error>;

    fn get_config(&self) -> Result<UserConfig, Self::Error>;

    /// Persist a new record; returns its id and the personal-best result,
    /// if PB tracking ran for this exercise.
    fn add_workout(
        &mut self,
        payload: &AddWorkoutPayload,
    ) -> Result<(i64, Option<PbResult>), Self::Error>;

    fn edit_workout(&mut self, payload: &EditWorkoutPayload) -> Result<(), Self::Error>;

    fn delete_workouts(&mut self, ids: &[i64]) -> Result<(), Self::Error>;

    /// The n-th most recent day's records for an exercise, newest first.
    /// Used to pre-fill a new log's defaults via
    /// [`crate::planner::prefill_form`].
    fn previous_workout_details(
        &self,
        exercise_name: &str,
        n: u32,
    ) -> Result<Vec<StoredWorkoutRecord>, Self::Error>;
}
