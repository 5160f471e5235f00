//! Buckets workout activity by calendar month for date-picker highlighting.

use std::collections::BTreeSet;

use chrono::Datelike;

use crate::StoredWorkoutRecord;
use crate::dates::local_day;

/// Collect the `YYYY-MM-DD` dates within the given month that have at least
/// one record.
///
/// The input is usually the output of [`crate::filter::apply`]; no
/// filtering happens here beyond the month bucket. Records whose date is
/// missing or unparsable are skipped, never an error.
pub fn active_dates(records: &[StoredWorkoutRecord], year: i32, month: u32) -> BTreeSet<String> {
    let mut dates = BTreeSet::new();
    for record in records {
        let Some(day) = local_day(&record.date) else {
            log::debug!(
                "workout record {} has unparsable date '{}', excluded from calendar",
                record.id,
                record.date
            );
            continue;
        };
        if day.year() == year && day.month() == month {
            dates.insert(day.format("%Y-%m-%d").to_string());
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExerciseType;

    fn record(id: i64, date: &str) -> StoredWorkoutRecord {
        StoredWorkoutRecord {
            id,
            exercise_name: "Squat".to_string(),
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

    #[test]
    fn only_dates_inside_the_month_are_returned() {
        let records = vec![
            record(1, "2024-05-04"),
            record(2, "2024-05-04"),
            record(3, "2024-05-31"),
            record(4, "2024-04-30"),
            record(5, "2023-05-10"),
        ];
        let dates = active_dates(&records, 2024, 5);
        let expected: BTreeSet<String> =
            ["2024-05-04".to_string(), "2024-05-31".to_string()].into();
        assert_eq!(dates, expected);
    }

    #[test]
    fn unparsable_dates_are_tolerated() {
        let records = vec![record(1, "not-a-date"), record(2, ""), record(3, "2024-05-10")];
        let dates = active_dates(&records, 2024, 5);
        assert_eq!(dates.len(), 1);
        assert!(dates.contains("2024-05-10"));
    }

    #[test]
    fn empty_month_yields_empty_set() {
        let records = vec![record(1, "2024-05-04")];
        assert!(active_dates(&records, 2024, 6).is_empty());
        assert!(active_dates(&[], 2024, 5).is_empty());
    }
}
