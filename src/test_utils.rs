//! Shared test utilities for `LedgerBuddy`.
//!
//! This module provides an in-memory storage backend and small builders for
//! records with sensible defaults.

use crate::{
    errors::Result,
    models::{
        CarBrand, CarType, NewSale, NewTestDrive, NewTransaction, SaleRecord, SalesPerson,
        Transaction, TransactionCategory,
    },
    storage::SqliteStorage,
    stores::new_id,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Creates an in-memory `SQLite` storage with all tables initialized.
/// This is the standard setup for all persistence tests.
pub async fn setup_test_storage() -> Result<SqliteStorage> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(SqliteStorage::new(db))
}

/// Calendar date; panics on an invalid date.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// UTC timestamp on the hour.
#[allow(clippy::unwrap_used)]
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn expense(amount: f64, category: TransactionCategory, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        amount,
        description: format!("{category} purchase"),
        category,
        date,
        is_expense: true,
    }
}

pub fn income(amount: f64, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        amount,
        description: "Salary".to_string(),
        category: TransactionCategory::Income,
        date,
        is_expense: false,
    }
}

/// Stored transaction built directly, for aggregation tests that skip the store.
pub fn record(new: NewTransaction) -> Transaction {
    Transaction {
        id: new_id(),
        amount: new.amount,
        description: new.description,
        category: new.category,
        date: new.date,
        is_expense: new.is_expense,
    }
}

pub fn new_car_sale(person: &str, brand: CarBrand, value: f64) -> NewSale {
    NewSale {
        sales_person_id: person.to_string(),
        car_type: CarType::New,
        car_brand: Some(brand),
        value,
    }
}

pub fn used_car_sale(person: &str, value: f64) -> NewSale {
    NewSale {
        sales_person_id: person.to_string(),
        car_type: CarType::Used,
        car_brand: None,
        value,
    }
}

/// Stored sale worth 100 000. A brand makes it a new-car sale, `None` a used one.
pub fn sale_record(person: &str, brand: Option<CarBrand>, date: DateTime<Utc>) -> SaleRecord {
    SaleRecord {
        id: new_id(),
        sales_person_id: person.to_string(),
        car_type: if brand.is_some() {
            CarType::New
        } else {
            CarType::Used
        },
        car_brand: brand,
        value: 100_000.0,
        date,
    }
}

/// Sales person with the default 20/240 goals.
pub fn sales_person(id: &str, name: &str) -> SalesPerson {
    SalesPerson {
        id: id.to_string(),
        name: name.to_string(),
        monthly_goal: 20,
        yearly_goal: 240,
    }
}

/// Booking for `customer` by sales person "p1". A brand books a new car,
/// `None` a used one.
pub fn test_drive_booking(
    customer: &str,
    brand: Option<CarBrand>,
    date: NaiveDate,
) -> NewTestDrive {
    NewTestDrive {
        sales_person_id: "p1".to_string(),
        customer_name: customer.to_string(),
        customer_phone: "070-000 00 00".to_string(),
        car_type: if brand.is_some() {
            CarType::New
        } else {
            CarType::Used
        },
        car_brand: brand,
        date,
        notes: String::new(),
    }
}
