//! Turns raw form input into precise write payloads for the backend.
//!
//! Form fields arrive as free text. Parsing is lenient: blank or
//! non-numeric text resolves to "absent", never to zero and never to an
//! error. Validation errors are detected here, before anything is sent to
//! the write collaborator.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::filter::find_definition;
use crate::{ExerciseDefinition, ExerciseType, StoredWorkoutRecord};

/// Raw text of the four metric fields as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub reps: String,
    pub weight: String,
    pub duration: String,
    pub distance: String,
}

fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Why a mutation plan could not be produced. These surface directly to the
/// UI and are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// None of the exercise's enabled metrics resolved to a value.
    NoMetricsEntered { enabled: Vec<&'static str> },
    /// A bodyweight exercise needs the configured bodyweight to compute the
    /// effective weight, and none is configured.
    BodyweightNotConfigured,
    /// No exercise definition could be resolved for the given name.
    ExerciseNotResolved(String),
    /// The workflow was asked to submit without an exercise selected.
    NoExerciseSelected,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::NoMetricsEntered { enabled } => {
                write!(f, "enter at least one value for: {}", enabled.join(", "))
            }
            PlanError::BodyweightNotConfigured => {
                write!(f, "bodyweight is not configured; set it in your profile first")
            }
            PlanError::ExerciseNotResolved(name) => {
                write!(f, "no exercise definition found for '{name}'")
            }
            PlanError::NoExerciseSelected => write!(f, "no exercise selected"),
        }
    }
}

impl std::error::Error for PlanError {}

/// Resolve an exercise definition for an edit/add-set flow, or fail with an
/// explicit error rather than guessing. Exact name first, then a
/// case-insensitive fallback.
pub fn resolve_exercise<'a>(
    definitions_by_name: &'a HashMap<String, ExerciseDefinition>,
    name: &str,
) -> Result<&'a ExerciseDefinition, PlanError> {
    find_definition(definitions_by_name, name)
        .ok_or_else(|| PlanError::ExerciseNotResolved(name.to_string()))
}

/// Payload for creating one logged set. Absent fields are omitted from the
/// serialized object entirely, matching the collaborator's expectations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddWorkoutPayload {
    pub exercise_identifier: String,
    pub date: NaiveDate,
    pub sets: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Bodyweight snapshot the effective weight was computed from, so the
    /// backend can store it on the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyweight_to_use: Option<f64>,
}

/// State of one field in an edit payload. `Unchanged` is omitted from the
/// wire, `Clear` serializes as an explicit `null` so the backend can tell
/// an intentional clear from an omitted field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEdit<T> {
    #[default]
    Unchanged,
    Set(T),
    Clear,
}

impl<T> FieldEdit<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldEdit::Unchanged)
    }
}

impl<T: Serialize> Serialize for FieldEdit<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldEdit::Set(value) => value.serialize(serializer),
            // Unchanged fields are skipped at the struct level; if one is
            // serialized anyway it degrades to null, same as Clear.
            FieldEdit::Unchanged | FieldEdit::Clear => serializer.serialize_none(),
        }
    }
}

/// Minimal-diff payload for replacing a stored record. Only fields whose
/// form text changed are present; the id always is. Field names follow the
/// collaborator's edit contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditWorkoutPayload {
    pub id: i64,
    #[serde(rename = "new_reps", skip_serializing_if = "FieldEdit::is_unchanged")]
    pub reps: FieldEdit<i64>,
    #[serde(rename = "new_weight", skip_serializing_if = "FieldEdit::is_unchanged")]
    pub weight: FieldEdit<f64>,
    #[serde(rename = "new_duration", skip_serializing_if = "FieldEdit::is_unchanged")]
    pub duration: FieldEdit<i64>,
    #[serde(
        rename = "new_distance_arg",
        skip_serializing_if = "FieldEdit::is_unchanged"
    )]
    pub distance: FieldEdit<f64>,
}

impl EditWorkoutPayload {
    fn new(id: i64) -> Self {
        EditWorkoutPayload {
            id,
            reps: FieldEdit::Unchanged,
            weight: FieldEdit::Unchanged,
            duration: FieldEdit::Unchanged,
            distance: FieldEdit::Unchanged,
        }
    }

    fn is_noop(&self) -> bool {
        self.reps.is_unchanged()
            && self.weight.is_unchanged()
            && self.duration.is_unchanged()
            && self.distance.is_unchanged()
    }
}

fn enabled_metric_names(def: &ExerciseDefinition) -> Vec<&'static str> {
    let mut names = Vec::new();
    if def.log_weight {
        names.push("Weight");
    }
    if def.log_reps {
        names.push("Reps");
    }
    if def.log_duration {
        names.push("Duration");
    }
    if def.log_distance {
        names.push("Distance");
    }
    names
}

/// Resolved values of the fields the exercise definition enables. Disabled
/// fields are ignored even when the form carries text for them.
struct ResolvedFields {
    reps: Option<i64>,
    weight: Option<f64>,
    duration: Option<i64>,
    distance: Option<f64>,
}

impl ResolvedFields {
    fn resolve(def: &ExerciseDefinition, form: &FormValues) -> Self {
        ResolvedFields {
            reps: if def.log_reps { parse_int(&form.reps) } else { None },
            weight: if def.log_weight {
                parse_float(&form.weight)
            } else {
                None
            },
            duration: if def.log_duration {
                parse_int(&form.duration)
            } else {
                None
            },
            distance: if def.log_distance {
                parse_float(&form.distance)
            } else {
                None
            },
        }
    }

    fn is_empty(&self) -> bool {
        self.reps.is_none()
            && self.weight.is_none()
            && self.duration.is_none()
            && self.distance.is_none()
    }
}

/// Plan the payload for logging a new set.
///
/// At least one enabled metric must resolve to a value. For bodyweight
/// exercises with weight logging enabled, the weight sent is the configured
/// bodyweight plus whatever the user typed as additional weight (zero when
/// blank); a missing configured bodyweight is an error, never a silently
/// omitted weight. Values are sent in whatever unit the form displays.
pub fn plan_add(
    def: &ExerciseDefinition,
    form: &FormValues,
    date: NaiveDate,
    bodyweight: Option<f64>,
) -> Result<AddWorkoutPayload, PlanError> {
    let fields = ResolvedFields::resolve(def, form);
    if fields.is_empty() {
        return Err(PlanError::NoMetricsEntered {
            enabled: enabled_metric_names(def),
        });
    }

    let (weight, bodyweight_to_use) =
        if def.exercise_type == ExerciseType::BodyWeight && def.log_weight {
            let bw = bodyweight.ok_or(PlanError::BodyweightNotConfigured)?;
            (Some(bw + fields.weight.unwrap_or(0.0)), Some(bw))
        } else {
            (fields.weight, None)
        };

    log::debug!("planned add for '{}' on {date}", def.name);
    Ok(AddWorkoutPayload {
        exercise_identifier: def.name.clone(),
        date,
        sets: 1,
        reps: fields.reps,
        weight,
        duration: fields.duration,
        distance: fields.distance,
        bodyweight_to_use,
    })
}

/// Plan the payload for editing an existing record.
///
/// The diff is against the pre-filled form text: a field whose text equals
/// the original is unchanged and omitted. `Ok(None)` means nothing changed
/// and the caller should skip the write. The record stays compressed: when
/// it stands for several sets, this edit applies to all of them.
///
/// Weight is special-cased. On a bodyweight exercise a changed weight is
/// recomputed as bodyweight + additional. On anything else, clearing the
/// field to blank becomes an explicit [`FieldEdit::Clear`], while text that
/// fails to parse leaves the field unchanged, same as parse failures
/// elsewhere. Cleared reps/duration/distance are likewise left unchanged;
/// the edit contract has no clear semantics for them.
pub fn plan_edit(
    def: &ExerciseDefinition,
    form: &FormValues,
    original: &FormValues,
    record_id: i64,
    bodyweight: Option<f64>,
) -> Result<Option<EditWorkoutPayload>, PlanError> {
    let fields = ResolvedFields::resolve(def, form);
    if fields.is_empty() {
        return Err(PlanError::NoMetricsEntered {
            enabled: enabled_metric_names(def),
        });
    }

    let mut payload = EditWorkoutPayload::new(record_id);

    if def.log_reps && form.reps.trim() != original.reps.trim() {
        if let Some(value) = fields.reps {
            payload.reps = FieldEdit::Set(value);
        }
    }
    if def.log_duration && form.duration.trim() != original.duration.trim() {
        if let Some(value) = fields.duration {
            payload.duration = FieldEdit::Set(value);
        }
    }
    if def.log_distance && form.distance.trim() != original.distance.trim() {
        if let Some(value) = fields.distance {
            payload.distance = FieldEdit::Set(value);
        }
    }

    if def.log_weight && form.weight.trim() != original.weight.trim() {
        if def.exercise_type == ExerciseType::BodyWeight {
            let bw = bodyweight.ok_or(PlanError::BodyweightNotConfigured)?;
            payload.weight = FieldEdit::Set(bw + fields.weight.unwrap_or(0.0));
        } else if form.weight.trim().is_empty() {
            payload.weight = FieldEdit::Clear;
        } else if let Some(value) = fields.weight {
            payload.weight = FieldEdit::Set(value);
        }
    }

    if payload.is_noop() {
        log::info!("edit of record {record_id} produced no changes, skipping write");
        return Ok(None);
    }
    Ok(Some(payload))
}

/// Pre-fill a fresh log form from the most recent previous record of the
/// same exercise, one field per enabled metric. An empty history yields an
/// empty form.
pub fn prefill_form(def: &ExerciseDefinition, previous: &[StoredWorkoutRecord]) -> FormValues {
    let mut form = FormValues::default();
    let Some(prev) = previous.first() else {
        return form;
    };
    if def.log_reps {
        if let Some(reps) = prev.reps {
            form.reps = reps.to_string();
        }
    }
    if def.log_weight {
        if let Some(weight) = prev.weight {
            form.weight = weight.to_string();
        }
    }
    if def.log_duration {
        if let Some(duration) = prev.duration {
            form.duration = duration.to_string();
        }
    }
    if def.log_distance {
        if let Some(distance) = prev.distance {
            form.distance = distance.to_string();
        }
    }
    form
}
