//! Sales store - the dealership's sales ledger and its sales people.
//!
//! Sales are immutable once recorded. `sales_person_id` is a lookup key into
//! `sales_people`; a sale whose person is unknown is kept but ignored by the
//! per-person aggregations.

use super::new_id;
use crate::{
    errors::{Error, Result},
    models::{CarType, NewSale, SaleRecord, SalesPerson},
    storage::PersistedStore,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Sales ledger and the people who sell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStore {
    /// Every recorded sale, oldest first
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    /// Registered sales people
    #[serde(default)]
    pub sales_people: Vec<SalesPerson>,
}

impl PersistedStore for SalesStore {
    const STORAGE_KEY: &'static str = "sales-storage";
}

/// Checks that both sales goals are positive.
///
/// # Errors
/// Returns `Error::InvalidValue` for field `goal` when either goal is zero.
pub fn validate_goals(monthly_goal: u32, yearly_goal: u32) -> Result<()> {
    if monthly_goal == 0 || yearly_goal == 0 {
        return Err(Error::InvalidValue {
            field: "goal",
            value: format!("{monthly_goal}/{yearly_goal}"),
        });
    }
    Ok(())
}

impl SalesStore {
    /// Looks up a sales person by id.
    #[must_use]
    pub fn sales_person(&self, id: &str) -> Option<&SalesPerson> {
        self.sales_people.iter().find(|person| person.id == id)
    }

    /// Sales recorded by one person, in ledger order.
    pub fn sales_for_person<'a>(
        &'a self,
        person_id: &'a str,
    ) -> impl Iterator<Item = &'a SaleRecord> {
        self.sales
            .iter()
            .filter(move |sale| sale.sales_person_id == person_id)
    }

    /// Records a sale dated `now`.
    ///
    /// The brand is required for new cars and discarded for used ones.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for a negative or non-finite value and
    /// `Error::MissingField` for a new car without a brand.
    pub fn add_sale(&mut self, new: NewSale, now: DateTime<Utc>) -> Result<&SaleRecord> {
        if !(new.value.is_finite() && new.value >= 0.0) {
            return Err(Error::InvalidAmount { amount: new.value });
        }

        let car_brand = match new.car_type {
            CarType::New => Some(
                new.car_brand
                    .ok_or(Error::MissingField { field: "carBrand" })?,
            ),
            CarType::Used => None,
        };

        self.sales.push(SaleRecord {
            id: new_id(),
            sales_person_id: new.sales_person_id,
            car_type: new.car_type,
            car_brand,
            value: new.value,
            date: now,
        });

        let sale = &self.sales[self.sales.len() - 1];
        debug!(
            id = %sale.id,
            person = %sale.sales_person_id,
            car_type = %sale.car_type,
            "Recorded sale"
        );
        Ok(sale)
    }

    /// Registers a sales person under `id`. Registering an existing id returns
    /// the stored person unchanged.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for a blank name and `Error::InvalidValue`
    /// when a goal is zero.
    pub fn add_sales_person(
        &mut self,
        id: String,
        name: String,
        monthly_goal: u32,
        yearly_goal: u32,
    ) -> Result<&SalesPerson> {
        if name.trim().is_empty() {
            return Err(Error::MissingField { field: "name" });
        }
        validate_goals(monthly_goal, yearly_goal)?;

        if let Some(index) = self.sales_people.iter().position(|person| person.id == id) {
            debug!(%id, "Sales person already registered");
            return Ok(&self.sales_people[index]);
        }

        self.sales_people.push(SalesPerson {
            id,
            name: name.trim().to_string(),
            monthly_goal,
            yearly_goal,
        });
        let person = &self.sales_people[self.sales_people.len() - 1];
        info!(id = %person.id, name = %person.name, "Registered sales person");
        Ok(person)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::CarBrand;
    use crate::test_utils::{at, new_car_sale, used_car_sale};

    #[test]
    fn test_add_sale_stamps_date_and_appends() {
        let mut store = SalesStore::default();
        let now = at(2024, 6, 1, 9);
        store.add_sale(new_car_sale("p1", CarBrand::Renault, 200_000.0), now).unwrap();
        store.add_sale(used_car_sale("p1", 90_000.0), now).unwrap();

        assert_eq!(store.sales.len(), 2);
        assert_eq!(store.sales[0].car_brand, Some(CarBrand::Renault));
        assert_eq!(store.sales[1].date, now);
    }

    #[test]
    fn test_new_car_requires_brand() {
        let mut store = SalesStore::default();
        let sale = NewSale {
            sales_person_id: "p1".to_string(),
            car_type: CarType::New,
            car_brand: None,
            value: 1.0,
        };
        let result = store.add_sale(sale, at(2024, 6, 1, 9));
        assert!(matches!(result, Err(Error::MissingField { field: "carBrand" })));
        assert!(store.sales.is_empty());
    }

    #[test]
    fn test_used_car_drops_brand() {
        let mut store = SalesStore::default();
        let sale = NewSale {
            sales_person_id: "p1".to_string(),
            car_type: CarType::Used,
            car_brand: Some(CarBrand::Jeep),
            value: 50_000.0,
        };
        let recorded = store.add_sale(sale, at(2024, 6, 1, 9)).unwrap();
        assert!(recorded.car_brand.is_none());
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut store = SalesStore::default();
        let result = store.add_sale(used_car_sale("p1", -1.0), at(2024, 6, 1, 9));
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_register_sales_person_is_idempotent() {
        let mut store = SalesStore::default();
        store
            .add_sales_person("anna@segeltorp.se".to_string(), "Anna".to_string(), 20, 240)
            .unwrap();
        let again = store
            .add_sales_person("anna@segeltorp.se".to_string(), "Other".to_string(), 5, 60)
            .unwrap();

        assert_eq!(again.name, "Anna");
        assert_eq!(store.sales_people.len(), 1);
    }

    #[test]
    fn test_register_rejects_zero_goal() {
        let mut store = SalesStore::default();
        let result = store.add_sales_person("p1".to_string(), "Anna".to_string(), 0, 240);
        assert!(matches!(result, Err(Error::InvalidValue { field: "goal", .. })));
    }

    #[test]
    fn test_sales_for_person_filters() {
        let mut store = SalesStore::default();
        let now = at(2024, 6, 1, 9);
        store.add_sale(used_car_sale("p1", 1.0), now).unwrap();
        store.add_sale(used_car_sale("p2", 1.0), now).unwrap();
        store.add_sale(used_car_sale("p1", 1.0), now).unwrap();

        assert_eq!(store.sales_for_person("p1").count(), 2);
        assert_eq!(store.sales_for_person("nobody").count(), 0);
    }
}
