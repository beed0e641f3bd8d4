//! Test-drive store - customer bookings and their completion.

use super::new_id;
use crate::{
    errors::{Error, Result},
    models::{CarType, NewTestDrive, TestDrive, TestDriveStatus},
    storage::PersistedStore,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Test-drive bookings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveStore {
    /// In booking order
    #[serde(default)]
    pub test_drives: Vec<TestDrive>,
}

impl PersistedStore for TestDriveStore {
    const STORAGE_KEY: &'static str = "test-drive-storage";
}

impl TestDriveStore {
    /// Looks up a booking by id.
    #[must_use]
    pub fn test_drive(&self, id: &str) -> Option<&TestDrive> {
        self.test_drives.iter().find(|drive| drive.id == id)
    }

    /// Books a test drive. New bookings always start as `Scheduled`.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for a new car without a brand.
    pub fn add_test_drive(&mut self, new: NewTestDrive) -> Result<&TestDrive> {
        let car_brand = match new.car_type {
            CarType::New => Some(
                new.car_brand
                    .ok_or(Error::MissingField { field: "carBrand" })?,
            ),
            CarType::Used => None,
        };

        self.test_drives.push(TestDrive {
            id: new_id(),
            sales_person_id: new.sales_person_id,
            customer_name: new.customer_name,
            customer_phone: new.customer_phone,
            car_type: new.car_type,
            car_brand,
            date: new.date,
            status: TestDriveStatus::Scheduled,
            notes: new.notes,
        });

        let drive = &self.test_drives[self.test_drives.len() - 1];
        debug!(id = %drive.id, date = %drive.date, "Booked test drive");
        Ok(drive)
    }

    /// Moves a booking from `Scheduled` to `Completed`. Completing an already
    /// completed drive is a no-op.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id.
    pub fn mark_completed(&mut self, id: &str) -> Result<&TestDrive> {
        let drive = self
            .test_drives
            .iter_mut()
            .find(|drive| drive.id == id)
            .ok_or_else(|| Error::NotFound {
                entity: "TestDrive",
                id: id.to_string(),
            })?;
        drive.status = TestDriveStatus::Completed;
        Ok(drive)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::CarBrand;
    use crate::test_utils::{date, test_drive_booking};

    #[test]
    fn test_booking_starts_scheduled() {
        let mut store = TestDriveStore::default();
        let drive = store
            .add_test_drive(test_drive_booking("Kalle", Some(CarBrand::Subaru), date(2024, 6, 10)))
            .unwrap();
        assert_eq!(drive.status, TestDriveStatus::Scheduled);
        assert_eq!(drive.car_brand, Some(CarBrand::Subaru));
    }

    #[test]
    fn test_mark_completed() {
        let mut store = TestDriveStore::default();
        let id = store
            .add_test_drive(test_drive_booking("Kalle", None, date(2024, 6, 10)))
            .unwrap()
            .id
            .clone();

        let drive = store.mark_completed(&id).unwrap();
        assert_eq!(drive.status, TestDriveStatus::Completed);
        assert!(store.mark_completed("missing").is_err());
    }

    #[test]
    fn test_new_car_booking_requires_brand() {
        let mut store = TestDriveStore::default();
        let mut booking = test_drive_booking("Kalle", None, date(2024, 6, 10));
        booking.car_type = CarType::New;
        assert!(matches!(
            store.add_test_drive(booking),
            Err(Error::MissingField { field: "carBrand" })
        ));
    }
}
