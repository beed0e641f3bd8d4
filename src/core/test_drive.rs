//! Test-drive views and conversion stats.

use super::date_range::DateRange;
use crate::models::{TestDrive, TestDriveStatus};
use serde::Serialize;

/// Scheduled drives, soonest first.
#[must_use]
pub fn upcoming(drives: &[TestDrive]) -> Vec<&TestDrive> {
    let mut scheduled: Vec<&TestDrive> = drives
        .iter()
        .filter(|drive| drive.status == TestDriveStatus::Scheduled)
        .collect();
    scheduled.sort_by_key(|drive| drive.date);
    scheduled
}

/// Completed drives, most recent first.
#[must_use]
pub fn completed(drives: &[TestDrive]) -> Vec<&TestDrive> {
    let mut done: Vec<&TestDrive> = drives
        .iter()
        .filter(|drive| drive.status == TestDriveStatus::Completed)
        .collect();
    done.sort_by(|a, b| b.date.cmp(&a.date));
    done
}

/// Booking counts and conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TestDriveStats {
    /// All bookings
    pub total: usize,
    /// Still scheduled
    pub scheduled: usize,
    /// Completed
    pub completed: usize,
    /// Completed share of all bookings, in percent
    pub conversion: f64,
}

/// Counts the drives by status. Conversion is 0 without bookings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn test_drive_stats<'a, I>(drives: I) -> TestDriveStats
where
    I: IntoIterator<Item = &'a TestDrive>,
{
    let mut stats = TestDriveStats::default();
    for drive in drives {
        stats.total += 1;
        match drive.status {
            TestDriveStatus::Scheduled => stats.scheduled += 1,
            TestDriveStatus::Completed => stats.completed += 1,
        }
    }
    if stats.total > 0 {
        stats.conversion = stats.completed as f64 / stats.total as f64 * 100.0;
    }
    stats
}

/// Stats over the drives dated inside `range`.
#[must_use]
pub fn test_drive_stats_in(drives: &[TestDrive], range: DateRange) -> TestDriveStats {
    test_drive_stats(drives.iter().filter(|drive| range.contains(drive.date)))
}
