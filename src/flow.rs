//! Two-stage workflow for logging or editing a set.
//!
//! `SelectingExercise -> EnteringDetails -> Submitted`, with direct entry
//! into `EnteringDetails` when the exercise is already known (adding a set
//! to an existing group, or editing one). Each entry into the details step
//! carries its own form snapshot; going back discards it entirely, so no
//! stale values survive navigation.

use chrono::NaiveDate;

use crate::ExerciseDefinition;
use crate::planner::{
    self, AddWorkoutPayload, EditWorkoutPayload, FormValues, PlanError,
};

/// The single value a completed flow hands to the write collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationPlan {
    Add(AddWorkoutPayload),
    Edit(EditWorkoutPayload),
    /// An edit that changed nothing; the caller skips the write.
    NoChanges,
}

/// Identity of the record being edited, plus the pre-filled form text the
/// edit diff is computed against.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    /// Back-reference shared by every set entry of the record. An edit
    /// updates all sets logged together under this id.
    pub record_id: i64,
    pub original: FormValues,
}

/// Everything the details step holds for one entry into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEntry {
    pub exercise: ExerciseDefinition,
    pub form: FormValues,
    pub editing: Option<EditTarget>,
}

impl DetailEntry {
    /// Compute the write plan for the current form state.
    pub fn plan(
        &self,
        date: NaiveDate,
        bodyweight: Option<f64>,
    ) -> Result<MutationPlan, PlanError> {
        match &self.editing {
            Some(target) => {
                match planner::plan_edit(
                    &self.exercise,
                    &self.form,
                    &target.original,
                    target.record_id,
                    bodyweight,
                )? {
                    Some(payload) => Ok(MutationPlan::Edit(payload)),
                    None => Ok(MutationPlan::NoChanges),
                }
            }
            None => Ok(MutationPlan::Add(planner::plan_add(
                &self.exercise,
                &self.form,
                date,
                bodyweight,
            )?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFlow {
    SelectingExercise,
    EnteringDetails(DetailEntry),
    Submitted,
}

impl Default for LogFlow {
    fn default() -> Self {
        LogFlow::SelectingExercise
    }
}

impl LogFlow {
    /// Fresh flow starting at exercise selection.
    pub fn new() -> Self {
        LogFlow::SelectingExercise
    }

    /// Skip selection when the exercise is already known: "add set" enters
    /// with an empty or pre-filled form, "edit set" additionally carries the
    /// target record and its original form text.
    pub fn for_exercise(
        exercise: ExerciseDefinition,
        form: FormValues,
        editing: Option<EditTarget>,
    ) -> Self {
        LogFlow::EnteringDetails(DetailEntry {
            exercise,
            form,
            editing,
        })
    }

    /// Move from selection to the details step. `prefill` is typically the
    /// output of [`planner::prefill_form`] over the exercise's most recent
    /// previous record. Ignored outside the selection step.
    pub fn select_exercise(self, exercise: ExerciseDefinition, prefill: FormValues) -> Self {
        match self {
            LogFlow::SelectingExercise => LogFlow::EnteringDetails(DetailEntry {
                exercise,
                form: prefill,
                editing: None,
            }),
            other => {
                log::warn!("select_exercise ignored outside the selection step");
                other
            }
        }
    }

    /// Return to selection, discarding every entered detail value.
    pub fn back(self) -> Self {
        match self {
            LogFlow::EnteringDetails(_) => LogFlow::SelectingExercise,
            other => other,
        }
    }

    /// Mutable access to the form text while in the details step.
    pub fn form_mut(&mut self) -> Option<&mut FormValues> {
        match self {
            LogFlow::EnteringDetails(entry) => Some(&mut entry.form),
            _ => None,
        }
    }

    /// Compute the plan and move to the terminal `Submitted` state.
    ///
    /// On a validation error the flow stays in the details step so the
    /// caller can surface the message and let the user correct the form.
    /// `Submitted` is reached exactly once per successful invocation and
    /// triggers exactly one write-collaborator call (or none, for
    /// [`MutationPlan::NoChanges`]).
    pub fn submit(
        self,
        date: NaiveDate,
        bodyweight: Option<f64>,
    ) -> (Self, Result<MutationPlan, PlanError>) {
        match self {
            LogFlow::EnteringDetails(entry) => match entry.plan(date, bodyweight) {
                Ok(plan) => (LogFlow::Submitted, Ok(plan)),
                Err(err) => (LogFlow::EnteringDetails(entry), Err(err)),
            },
            other => (other, Err(PlanError::NoExerciseSelected)),
        }
    }
}
