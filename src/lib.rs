//! View-model engine for a personal workout tracker.
//!
//! The persistence layer stores one row per logging event, where a single
//! row may stand for N identical sets via its `sets` count. The UI works in
//! individual sets. This crate holds the logic that reconciles the two:
//! exploding stored records into addressable set entries ([`expand`]),
//! grouping them per exercise for a day view ([`group`]), narrowing a
//! collection along exercise/muscle/date dimensions ([`filter::apply`]),
//! bucketing activity per calendar month ([`calendar::active_dates`]),
//! turning raw form input into precise write payloads ([`planner`]) and
//! interpreting personal-best results returned by a write ([`pb`]).
//!
//! Everything here is a pure function over data handed in by the caller.
//! Network and storage live behind the [`backend::WorkoutBackend`] trait
//! and are awaited by the presentation layer, never by this crate.

use serde::{Deserialize, Serialize};

pub mod backend;
pub mod calendar;
pub mod dates;
pub mod expand;
pub mod filter;
pub mod flow;
pub mod group;
pub mod pb;
pub mod planner;

pub use backend::WorkoutBackend;
pub use calendar::active_dates;
pub use expand::{SetEntry, SetMetrics, backing_record_ids, expand};
pub use filter::{FilterSpec, apply};
pub use flow::{DetailEntry, EditTarget, LogFlow, MutationPlan};
pub use group::{ExerciseGroup, group};
pub use pb::{PbDelta, PbMetric, PbResult, interpret};
pub use planner::{
    AddWorkoutPayload, EditWorkoutPayload, FieldEdit, FormValues, PlanError, plan_add, plan_edit,
    prefill_form, resolve_exercise,
};

/// Broad category of an exercise, as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseType {
    Resistance,
    BodyWeight,
    Cardio,
}

impl TryFrom<&str> for ExerciseType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "resistance" => Ok(ExerciseType::Resistance),
            "body-weight" | "bodyweight" => Ok(ExerciseType::BodyWeight),
            "cardio" => Ok(ExerciseType::Cardio),
            other => Err(format!("unknown exercise type '{other}'")),
        }
    }
}

/// Unit system chosen by the user. Display concern only; no value in this
/// crate is ever converted between systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn weight_label(self) -> &'static str {
        match self {
            Units::Metric => "kg",
            Units::Imperial => "lbs",
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            Units::Metric => "km",
            Units::Imperial => "miles",
        }
    }
}

/// The four loggable metrics, in their fixed display order.
///
/// The `Ord` impl follows declaration order, so metric maps keyed by this
/// enum iterate as weight, reps, duration, distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Weight,
    Reps,
    Duration,
    Distance,
}

pub const ALL_METRICS: [Metric; 4] = [
    Metric::Weight,
    Metric::Reps,
    Metric::Duration,
    Metric::Distance,
];

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Reps => "reps",
            Metric::Duration => "duration",
            Metric::Distance => "distance",
        }
    }
}

/// One persisted logging event, exactly as the backend returns it.
///
/// `sets`, when present and positive, compresses that many identical sets
/// into this single record. The record is never mutated in place; edits go
/// through [`planner::plan_edit`] and replace it wholesale on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredWorkoutRecord {
    pub id: i64,
    pub exercise_name: String,
    pub exercise_type: ExerciseType,
    /// RFC 3339 timestamp or a bare `YYYY-MM-DD`, as stored.
    pub date: String,
    #[serde(default)]
    pub sets: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Minutes, the record's native unit.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// User bodyweight at the time of logging, for bodyweight exercises.
    #[serde(default)]
    pub bodyweight: Option<f64>,
}

/// Definition of an exercise: its type, targeted muscles and which metrics
/// the log form should offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: i64,
    pub name: String,
    pub exercise_type: ExerciseType,
    /// Comma-separated muscle names, e.g. `"Chest, Triceps"`.
    #[serde(default)]
    pub muscles: Option<String>,
    #[serde(default)]
    pub log_weight: bool,
    #[serde(default)]
    pub log_reps: bool,
    #[serde(default)]
    pub log_duration: bool,
    #[serde(default)]
    pub log_distance: bool,
}

/// The slice of backend configuration this crate reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub bodyweight: Option<f64>,
    pub units: Units,
}
