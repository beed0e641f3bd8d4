//! Client-side record stores.
//!
//! Each store exclusively owns its collection and is mutated through `&mut self`.
//! Callers hold no authoritative copies; they re-read the store after every
//! mutation and hand the snapshot to the aggregation functions in
//! [`crate::core`]. Every store persists as one JSON blob (see
//! [`crate::storage::PersistedStore`]).

/// Demo login state
pub mod auth;
/// Team chat messages
pub mod chat;
/// Transactions, budgets and goals
pub mod finance;
/// Broadcast notifications
pub mod notification;
/// Sales ledger and sales people
pub mod sales;
/// Test-drive bookings
pub mod test_drive;

pub use auth::AuthStore;
pub use chat::ChatStore;
pub use finance::FinanceStore;
pub use notification::NotificationStore;
pub use sales::SalesStore;
pub use test_drive::TestDriveStore;

use crate::errors::{Error, Result};
use uuid::Uuid;

/// Fresh record id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Amounts stored in the ledgers must be finite and strictly positive.
pub(crate) fn ensure_positive(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(0.01).is_ok());
        assert!(ensure_positive(0.0).is_err());
        assert!(ensure_positive(-5.0).is_err());
        assert!(ensure_positive(f64::NAN).is_err());
        assert!(ensure_positive(f64::INFINITY).is_err());
    }
}
