//! Dealership records - sales, sales people and test drives.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Whether a car is sold or shown new or second-hand.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CarType {
    /// Brand-new car
    New,
    /// Second-hand car of any make
    Used,
}

/// Brands sold as new cars. Used cars carry no brand.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CarBrand {
    /// Renault
    Renault,
    /// Dacia
    Dacia,
    /// Alpine
    Alpine,
    /// Subaru
    Subaru,
    /// smart
    Smart,
    /// BYD
    Byd,
    /// Hongqi
    Hongqi,
    /// Jeep
    Jeep,
    /// Alfa Romeo, serialized with a space
    #[serde(rename = "ALFA ROMEO")]
    #[strum(serialize = "ALFA ROMEO")]
    AlfaRomeo,
    /// Abarth
    Abarth,
    /// Fiat
    Fiat,
    /// RAM
    Ram,
    /// Dodge
    Dodge,
    /// INEOS
    Ineos,
}

/// One sold car. `car_brand` is `Some` exactly when `car_type` is `New`,
/// and the field is left out of the serialized form otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Unique identifier
    pub id: String,
    /// Id of the seller in the sales people list
    pub sales_person_id: String,
    /// New or used
    pub car_type: CarType,
    /// Brand of a new car
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_brand: Option<CarBrand>,
    /// Sale price in kronor
    pub value: f64,
    /// When the sale was recorded
    pub date: DateTime<Utc>,
}

impl SaleRecord {
    /// Brand label for lists: the brand for new cars, "Begagnad" for used ones.
    #[must_use]
    pub fn display_brand(&self) -> &str {
        self.car_brand.as_ref().map_or("Begagnad", AsRef::as_ref)
    }
}

/// Validated sale input; produced by [`crate::core::validation::SaleDraft::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewSale {
    /// Id of the seller
    pub sales_person_id: String,
    /// New or used
    pub car_type: CarType,
    /// Required for new cars, dropped for used ones
    pub car_brand: Option<CarBrand>,
    /// Sale price, zero or more
    pub value: f64,
}

/// Team member who sells cars, with their sales goals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPerson {
    /// Unique identifier; the email for registered users
    pub id: String,
    /// Display name
    pub name: String,
    /// Cars to sell per calendar month
    pub monthly_goal: u32,
    /// Cars to sell per calendar year
    pub yearly_goal: u32,
}

/// Booking lifecycle. A booking only ever moves from scheduled to completed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TestDriveStatus {
    /// Booked and not yet done
    Scheduled,
    /// Done
    Completed,
}

/// A booked test drive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDrive {
    /// Unique identifier
    pub id: String,
    /// Id of the sales person who booked it
    pub sales_person_id: String,
    /// Customer name
    pub customer_name: String,
    /// Customer phone number
    pub customer_phone: String,
    /// New or used
    pub car_type: CarType,
    /// Brand of a new car
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_brand: Option<CarBrand>,
    /// Day of the drive
    pub date: NaiveDate,
    /// Scheduled or completed
    pub status: TestDriveStatus,
    /// Free-text notes, possibly empty
    #[serde(default)]
    pub notes: String,
}

/// Validated booking input; status is always `Scheduled` on creation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTestDrive {
    /// Id of the booking sales person
    pub sales_person_id: String,
    /// Customer name
    pub customer_name: String,
    /// Customer phone number
    pub customer_phone: String,
    /// New or used
    pub car_type: CarType,
    /// Brand of a new car
    pub car_brand: Option<CarBrand>,
    /// Day of the drive
    pub date: NaiveDate,
    /// Free-text notes
    pub notes: String,
}
