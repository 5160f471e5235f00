//! Display-side interpretation of personal-best results returned by a write.
//!
//! The backend computes personal bests; this module only decides whether a
//! notification is warranted and shapes it for display.

use serde::{Deserialize, Serialize};

use crate::{Metric, Units};

/// One tracked metric inside a PB result, as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PbMetric {
    pub achieved: bool,
    pub new_value: f64,
    #[serde(default)]
    pub previous_value: Option<f64>,
}

/// The result object a write call hands back. Absent metrics were not
/// tracked for this exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PbResult {
    pub weight: Option<PbMetric>,
    pub reps: Option<PbMetric>,
    pub duration: Option<PbMetric>,
    pub distance: Option<PbMetric>,
}

/// Display model for one achieved personal best.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PbDelta {
    pub metric: Metric,
    pub achieved: bool,
    pub new_value: f64,
    pub previous_value: Option<f64>,
}

impl PbDelta {
    /// Notification line, with the unit the current display settings use.
    pub fn headline(&self, units: Units) -> String {
        let unit = match self.metric {
            Metric::Weight => units.weight_label(),
            Metric::Reps => "reps",
            Metric::Duration => "min",
            Metric::Distance => units.distance_label(),
        };
        match self.previous_value {
            Some(previous) => format!(
                "New {} PB: {} {} (previous {} {})",
                self.metric.label(),
                self.new_value,
                unit,
                previous,
                unit
            ),
            None => format!("New {} PB: {} {}", self.metric.label(), self.new_value, unit),
        }
    }
}

/// Decide whether a write achieved any personal best.
///
/// `None` in means no PB tracking occurred; a result where no metric was
/// achieved collapses to `None` as well, so callers can skip the
/// notification with a single check. Achieved metrics come back in the
/// fixed weight, reps, duration, distance order.
pub fn interpret(result: Option<&PbResult>) -> Option<Vec<PbDelta>> {
    let result = result?;
    let mut deltas = Vec::new();
    for (metric, slot) in [
        (Metric::Weight, result.weight),
        (Metric::Reps, result.reps),
        (Metric::Duration, result.duration),
        (Metric::Distance, result.distance),
    ] {
        if let Some(pb) = slot {
            if pb.achieved {
                deltas.push(PbDelta {
                    metric,
                    achieved: true,
                    new_value: pb.new_value,
                    previous_value: pb.previous_value,
                });
            }
        }
    }
    if deltas.is_empty() { None } else { Some(deltas) }
}
