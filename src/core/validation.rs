//! Form drafts and their validation.
//!
//! A draft holds raw form input as typed. `validate` turns it into the
//! store-ready `New*` record or reports the first problem found.

use crate::{
    errors::{Error, Result},
    models::{CarBrand, CarType, NewSale, NewTestDrive, NewTransaction, TransactionCategory},
};
use chrono::NaiveDate;

fn required(value: &str, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::MissingField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

/// New cars must name a brand; used cars never keep one.
fn brand_for(car_type: CarType, car_brand: Option<CarBrand>) -> Result<Option<CarBrand>> {
    match car_type {
        CarType::New => car_brand
            .map(Some)
            .ok_or(Error::MissingField { field: "carBrand" }),
        CarType::Used => Ok(None),
    }
}

/// The record-sale form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaleDraft {
    /// Required
    pub car_type: Option<CarType>,
    /// Required for new cars
    pub car_brand: Option<CarBrand>,
    /// Whole kronor; blank means 0. Spaces used as thousands separators are accepted.
    pub value: String,
}

impl SaleDraft {
    /// Validates the draft as a sale by `sales_person_id`.
    ///
    /// # Errors
    /// Returns `Error::MissingField` without a car type or without a brand for
    /// a new car, and `Error::InvalidValue` for a non-numeric value.
    pub fn validate(self, sales_person_id: &str) -> Result<NewSale> {
        let car_type = self.car_type.ok_or(Error::MissingField { field: "carType" })?;
        let car_brand = brand_for(car_type, self.car_brand)?;

        let digits: String = self.value.chars().filter(|c| !c.is_whitespace()).collect();
        let value = if digits.is_empty() {
            0
        } else {
            digits.parse::<u64>().map_err(|_| Error::InvalidValue {
                field: "value",
                value: self.value.clone(),
            })?
        };

        #[allow(clippy::cast_precision_loss)]
        let value = value as f64;
        Ok(NewSale {
            sales_person_id: sales_person_id.to_string(),
            car_type,
            car_brand,
            value,
        })
    }
}

/// The book-test-drive form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestDriveDraft {
    /// Required
    pub customer_name: String,
    /// Required
    pub customer_phone: String,
    /// New or used
    pub car_type: CarType,
    /// Required for new cars
    pub car_brand: Option<CarBrand>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Optional
    pub notes: String,
}

impl TestDriveDraft {
    /// Validates the draft as a booking by `sales_person_id`.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for a blank required field or a new car
    /// without a brand, and `Error::InvalidValue` for a malformed date.
    pub fn validate(self, sales_person_id: &str) -> Result<NewTestDrive> {
        let customer_name = required(&self.customer_name, "customerName")?;
        let customer_phone = required(&self.customer_phone, "customerPhone")?;
        let raw_date = required(&self.date, "date")?;
        let date =
            NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| Error::InvalidValue {
                field: "date",
                value: raw_date.clone(),
            })?;

        Ok(NewTestDrive {
            sales_person_id: sales_person_id.to_string(),
            customer_name,
            customer_phone,
            car_type: self.car_type,
            car_brand: brand_for(self.car_type, self.car_brand)?,
            date,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// The add-transaction form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Decimal amount as typed
    pub amount: String,
    /// Required
    pub description: String,
    /// Required
    pub category: Option<TransactionCategory>,
    /// Expense or income toggle
    pub is_expense: bool,
}

impl TransactionDraft {
    /// Validates the draft as a transaction dated `today`.
    ///
    /// Type and category are kept consistent: the income category is never an
    /// expense, and a non-expense is always filed under income.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for blank input, `Error::InvalidValue` for
    /// a non-numeric amount and `Error::InvalidAmount` for a non-positive one.
    pub fn validate(self, today: NaiveDate) -> Result<NewTransaction> {
        let raw_amount = required(&self.amount, "amount")?;
        let description = required(&self.description, "description")?;
        let category = self.category.ok_or(Error::MissingField { field: "category" })?;

        let amount: f64 = raw_amount.parse().map_err(|_| Error::InvalidValue {
            field: "amount",
            value: raw_amount.clone(),
        })?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(Error::InvalidAmount { amount });
        }

        let is_expense = self.is_expense && category != TransactionCategory::Income;
        let category = if is_expense {
            category
        } else {
            TransactionCategory::Income
        };

        Ok(NewTransaction {
            amount,
            description,
            category,
            date: today,
            is_expense,
        })
    }
}
