//! Narrows a workout collection along independent filter dimensions.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::local_day;
use crate::{ExerciseDefinition, StoredWorkoutRecord};

/// One filter per dimension: exercise names (OR within), muscle groups
/// (OR within), a single calendar date. A record must satisfy every active
/// dimension; an empty dimension is inactive and always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub exercise_names: BTreeSet<String>,
    pub muscles: BTreeSet<String>,
    pub date: Option<NaiveDate>,
}

impl FilterSpec {
    /// No dimension active: matches everything.
    pub fn is_empty(&self) -> bool {
        self.exercise_names.is_empty() && self.muscles.is_empty() && self.date.is_none()
    }
}

/// Split a definition's comma-separated muscle string into a normalized
/// (trimmed, lower-cased) set.
pub fn parse_muscles(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect()
}

/// Look up an exercise definition by name, falling back to a
/// case-insensitive scan when the exact key is absent.
pub(crate) fn find_definition<'a>(
    definitions_by_name: &'a HashMap<String, ExerciseDefinition>,
    name: &str,
) -> Option<&'a ExerciseDefinition> {
    if let Some(def) = definitions_by_name.get(name) {
        return Some(def);
    }
    definitions_by_name
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, def)| def)
}

/// Apply the filter and return the matching records.
///
/// Pure: the same inputs always yield the same output, and filtering an
/// already-filtered collection again is a no-op. The date dimension matches
/// on the record's local calendar day; a record whose date cannot be parsed
/// never matches an active date dimension. The muscle dimension resolves the
/// record's exercise definition and fails closed when it cannot.
pub fn apply(
    records: &[StoredWorkoutRecord],
    spec: &FilterSpec,
    definitions_by_name: &HashMap<String, ExerciseDefinition>,
) -> Vec<StoredWorkoutRecord> {
    if spec.is_empty() {
        return records.to_vec();
    }

    // Normalize the requested muscles once, the same way definition muscle
    // strings are normalized.
    let wanted_muscles: BTreeSet<String> = spec
        .muscles
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect();

    records
        .iter()
        .filter(|record| matches(record, spec, &wanted_muscles, definitions_by_name))
        .cloned()
        .collect()
}

fn matches(
    record: &StoredWorkoutRecord,
    spec: &FilterSpec,
    wanted_muscles: &BTreeSet<String>,
    definitions_by_name: &HashMap<String, ExerciseDefinition>,
) -> bool {
    if let Some(wanted_date) = spec.date {
        match local_day(&record.date) {
            Some(day) if day == wanted_date => {}
            _ => return false,
        }
    }

    if !spec.exercise_names.is_empty() && !spec.exercise_names.contains(&record.exercise_name) {
        return false;
    }

    if !wanted_muscles.is_empty() {
        let Some(def) = find_definition(definitions_by_name, &record.exercise_name) else {
            log::debug!(
                "no exercise definition for '{}', excluding record {} from muscle filter",
                record.exercise_name,
                record.id
            );
            return false;
        };
        let muscles = def.muscles.as_deref().map(parse_muscles).unwrap_or_default();
        if muscles.intersection(wanted_muscles).next().is_none() {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseType;

    fn record(id: i64, exercise: &str, date: &str) -> StoredWorkoutRecord {
        StoredWorkoutRecord {
            id,
            exercise_name: exercise.to_string(),
            exercise_type: ExerciseType::Resistance,
            date: date.to_string(),
            sets: None,
            reps: Some(5),
            weight: None,
            duration: None,
            distance: None,
            notes: None,
            bodyweight: None,
        }
    }

    fn definition(id: i64, name: &str, muscles: Option<&str>) -> ExerciseDefinition {
        ExerciseDefinition {
            id,
            name: name.to_string(),
            exercise_type: ExerciseType::Resistance,
            muscles: muscles.map(|m| m.to_string()),
            log_weight: true,
            log_reps: true,
            log_duration: false,
            log_distance: false,
        }
    }

    fn definitions() -> HashMap<String, ExerciseDefinition> {
        let mut map = HashMap::new();
        map.insert(
            "Bench".to_string(),
            definition(1, "Bench", Some("Chest, Triceps")),
        );
        map.insert("Squat".to_string(), definition(2, "Squat", Some("Quads")));
        map.insert("Plank".to_string(), definition(3, "Plank", None));
        map
    }

    fn sample_records() -> Vec<StoredWorkoutRecord> {
        vec![
            record(1, "Bench", "2024-05-04"),
            record(2, "Squat", "2024-05-04"),
            record(3, "Bench", "2024-05-06"),
            record(4, "Mystery", "2024-05-06"),
        ]
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = sample_records();
        let out = apply(&records, &FilterSpec::default(), &definitions());
        assert_eq!(out, records);
    }

    #[test]
    fn exercise_dimension_is_or_within() {
        let records = sample_records();
        let spec = FilterSpec {
            exercise_names: ["Bench".to_string(), "Squat".to_string()].into(),
            ..FilterSpec::default()
        };
        let out = apply(&records, &spec, &definitions());
        let ids: Vec<i64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn date_dimension_matches_the_calendar_day() {
        let records = sample_records();
        let spec = FilterSpec {
            date: NaiveDate::from_ymd_opt(2024, 5, 4),
            ..FilterSpec::default()
        };
        let out = apply(&records, &spec, &definitions());
        let ids: Vec<i64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn unparsable_date_never_matches_an_active_date_filter() {
        let records = vec![record(1, "Bench", "garbage")];
        let spec = FilterSpec {
            date: NaiveDate::from_ymd_opt(2024, 5, 4),
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec, &definitions()).is_empty());
    }

    #[test]
    fn muscle_dimension_normalizes_and_intersects() {
        let records = sample_records();
        let spec = FilterSpec {
            muscles: ["  CHEST ".to_string()].into(),
            ..FilterSpec::default()
        };
        let out = apply(&records, &spec, &definitions());
        let ids: Vec<i64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn muscle_dimension_fails_closed_without_a_definition() {
        // "Mystery" has no definition, "Plank" has one without muscles.
        let records = vec![record(1, "Mystery", "2024-05-04"), record(2, "Plank", "2024-05-04")];
        let spec = FilterSpec {
            muscles: ["chest".to_string()].into(),
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec, &definitions()).is_empty());
    }

    #[test]
    fn definition_lookup_falls_back_case_insensitively() {
        let records = vec![record(1, "bench", "2024-05-04")];
        let spec = FilterSpec {
            muscles: ["chest".to_string()].into(),
            ..FilterSpec::default()
        };
        let out = apply(&records, &spec, &definitions());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let records = sample_records();
        let spec = FilterSpec {
            exercise_names: ["Bench".to_string()].into(),
            muscles: ["chest".to_string()].into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6),
        };
        let out = apply(&records, &spec, &definitions());
        let ids: Vec<i64> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn apply_is_idempotent() {
        let records = sample_records();
        let defs = definitions();
        let spec = FilterSpec {
            exercise_names: ["Bench".to_string()].into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 4),
            ..FilterSpec::default()
        };
        let once = apply(&records, &spec, &defs);
        let twice = apply(&once, &spec, &defs);
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_muscles_drops_empty_segments() {
        let set = parse_muscles(" Chest , , Triceps,");
        assert_eq!(set.len(), 2);
        assert!(set.contains("chest"));
        assert!(set.contains("triceps"));
    }
}
