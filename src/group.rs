//! Groups exploded set entries per exercise for a day-level view.

use std::collections::HashMap;

use serde::Serialize;

use crate::expand::{SetEntry, expand};
use crate::StoredWorkoutRecord;

/// All displayed sets of one exercise, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseGroup {
    pub exercise_name: String,
    pub entries: Vec<SetEntry>,
}

/// Expand every record and collect the entries per exercise name.
///
/// Groups appear in the order their exercise is first encountered in the
/// input; entries within a group keep input order, and within one record's
/// expansion, set-index order. Records that expand to nothing (blank
/// exercise name) contribute no group, so empty groups are never emitted.
pub fn group(records: &[StoredWorkoutRecord]) -> Vec<ExerciseGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Vec<SetEntry>> = HashMap::new();

    for record in records {
        for entry in expand(record) {
            if !by_name.contains_key(&entry.exercise_name) {
                order.push(entry.exercise_name.clone());
            }
            by_name
                .entry(entry.exercise_name.clone())
                .or_default()
                .push(entry);
        }
    }

    order
        .into_iter()
        .map(|name| {
            let entries = by_name.remove(&name).unwrap_or_default();
            ExerciseGroup {
                exercise_name: name,
                entries,
            }
        })
        .collect()
}
