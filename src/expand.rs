//! Explodes set-compressed records into UI-addressable set entries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Metric, StoredWorkoutRecord, Units};

/// Metrics present on a set, keyed in fixed display order. Only metrics the
/// record actually carries appear in the map.
pub type SetMetrics = BTreeMap<Metric, f64>;

/// One displayed set, the unit the user edits or deletes.
///
/// Several entries may share a `record_id`: they are clones of one
/// compressed record, and editing or deleting any of them edits or deletes
/// all of them. Callers should surface that to the user rather than hide it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetEntry {
    /// Stable synthetic id, `"{record_id}-{index}"`. Re-expanding the same
    /// record yields the same ids.
    pub ui_id: String,
    /// Back-reference to the stored record this entry came from.
    pub record_id: i64,
    pub exercise_name: String,
    pub metrics: SetMetrics,
}

impl SetEntry {
    /// Short human-readable line for a set row, e.g. `"5 reps, 100 kg"`.
    /// A set without metrics still gets a line instead of disappearing.
    pub fn summary(&self, units: Units) -> String {
        if self.metrics.is_empty() {
            return "set logged, no metrics".to_string();
        }
        let mut parts = Vec::new();
        if let Some(r) = self.metrics.get(&Metric::Reps) {
            parts.push(format!("{} reps", *r as i64));
        }
        if let Some(w) = self.metrics.get(&Metric::Weight) {
            parts.push(format!("{} {}", w, units.weight_label()));
        }
        if let Some(d) = self.metrics.get(&Metric::Duration) {
            parts.push(format!("{} min", *d as i64));
        }
        if let Some(d) = self.metrics.get(&Metric::Distance) {
            parts.push(format!("{} {}", d, units.distance_label()));
        }
        parts.join(", ")
    }
}

/// Number of sets a record stands for: its `sets` count when positive,
/// otherwise one.
pub fn effective_sets(record: &StoredWorkoutRecord) -> usize {
    match record.sets {
        Some(n) if n > 0 => n as usize,
        _ => 1,
    }
}

/// Explode a stored record into its individual set entries.
///
/// A record with `sets = k > 0` produces exactly `k` entries with identical
/// metrics, ids `"{id}-0"` through `"{id}-{k-1}"`, all back-referencing the
/// record. Records without any metric still produce entries with an empty
/// metrics map. A record with a blank exercise name is a data-integrity
/// problem: it is logged and skipped, returning no entries.
pub fn expand(record: &StoredWorkoutRecord) -> Vec<SetEntry> {
    if record.exercise_name.trim().is_empty() {
        log::warn!("skipping workout record {} with no exercise name", record.id);
        return Vec::new();
    }

    let mut metrics = SetMetrics::new();
    if let Some(w) = record.weight {
        metrics.insert(Metric::Weight, w);
    }
    if let Some(r) = record.reps {
        metrics.insert(Metric::Reps, r as f64);
    }
    if let Some(d) = record.duration {
        metrics.insert(Metric::Duration, d as f64);
    }
    if let Some(d) = record.distance {
        metrics.insert(Metric::Distance, d);
    }

    (0..effective_sets(record))
        .map(|i| SetEntry {
            ui_id: format!("{}-{}", record.id, i),
            record_id: record.id,
            exercise_name: record.exercise_name.clone(),
            metrics: metrics.clone(),
        })
        .collect()
}

/// Distinct stored-record ids behind a selection of set entries, in first
/// appearance order. Deleting these ids deletes every shown set that shares
/// them, which is exactly what the compressed data model means.
pub fn backing_record_ids(entries: &[SetEntry]) -> Vec<i64> {
    let mut ids = Vec::new();
    for entry in entries {
        if !ids.contains(&entry.record_id) {
            ids.push(entry.record_id);
        }
    }
    ids
}
