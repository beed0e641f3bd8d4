//! Application state: every store, loaded from and saved to one storage backend.

use crate::{
    config::app::BudgetSeed,
    errors::Result,
    storage::{KeyValueStorage, PersistedStore, load_store, save_store},
    stores::{
        AuthStore, ChatStore, FinanceStore, NotificationStore, SalesStore, TestDriveStore,
    },
};
use tracing::{debug, error, info, warn};

/// All client-side stores of the app.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Logged-in user, if any
    pub auth: AuthStore,
    /// Transactions, budgets and savings goals
    pub finance: FinanceStore,
    /// Sales ledger and sales people
    pub sales: SalesStore,
    /// Test-drive bookings
    pub test_drives: TestDriveStore,
    /// Team chat
    pub chat: ChatStore,
    /// Broadcast notifications
    pub notifications: NotificationStore,
}

/// Loads one store. A missing, unreadable or corrupt blob yields the default
/// store so the app always starts.
async fn load_or_default<S, K>(storage: &K) -> S
where
    S: PersistedStore,
    K: KeyValueStorage + Sync,
{
    match load_store::<S, K>(storage).await {
        Ok(store) => {
            debug!(key = S::STORAGE_KEY, "Loaded store");
            store
        }
        Err(e) => {
            warn!(key = S::STORAGE_KEY, error = %e, "Could not load store, starting empty");
            S::default()
        }
    }
}

/// Saves one store, logging instead of failing.
async fn persist<S, K>(storage: &K, store: &S) -> bool
where
    S: PersistedStore + Sync,
    K: KeyValueStorage + Sync,
{
    match save_store(storage, store).await {
        Ok(()) => true,
        Err(e) => {
            error!(key = S::STORAGE_KEY, error = %e, "Failed to persist store");
            false
        }
    }
}

impl AppState {
    /// Loads every store from `storage`.
    pub async fn load<K: KeyValueStorage + Sync>(storage: &K) -> Self {
        let state = Self {
            auth: load_or_default(storage).await,
            finance: load_or_default(storage).await,
            sales: load_or_default(storage).await,
            test_drives: load_or_default(storage).await,
            chat: load_or_default(storage).await,
            notifications: load_or_default(storage).await,
        };
        info!(
            transactions = state.finance.transactions.len(),
            sales = state.sales.sales.len(),
            test_drives = state.test_drives.test_drives.len(),
            "Application state loaded"
        );
        state
    }

    /// Writes every store to `storage`. Returns how many stores failed to save;
    /// the in-memory state is kept either way.
    pub async fn persist_all<K: KeyValueStorage + Sync>(&self, storage: &K) -> usize {
        let saved = [
            persist(storage, &self.auth).await,
            persist(storage, &self.finance).await,
            persist(storage, &self.sales).await,
            persist(storage, &self.test_drives).await,
            persist(storage, &self.chat).await,
            persist(storage, &self.notifications).await,
        ];
        let failures = saved.iter().filter(|ok| !**ok).count();
        if failures == 0 {
            info!("Application state saved");
        }
        failures
    }

    /// Adds a budget for each seeded category that has none yet.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` for a non-positive seed amount.
    pub fn seed_budgets(&mut self, seeds: &[BudgetSeed]) -> Result<usize> {
        info!("Seeding budgets. Found {} configurations from TOML.", seeds.len());
        let mut added = 0;
        for seed in seeds {
            if self
                .finance
                .budgets
                .iter()
                .any(|budget| budget.category == seed.category)
            {
                debug!(category = %seed.category, "Budget already exists. Skipping.");
                continue;
            }
            self.finance.add_budget(seed.into())?;
            added += 1;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::{BudgetPeriod, CarBrand, NewGoal, NotificationKind, TransactionCategory};
    use crate::test_utils::{
        at, date, expense, income, new_car_sale, setup_test_storage, used_car_sale,
    };

    #[tokio::test]
    async fn test_load_empty_storage_gives_defaults() -> Result<()> {
        let storage = setup_test_storage().await?;
        let state = AppState::load(&storage).await;
        assert_eq!(state, AppState::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_every_store() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut state = AppState::default();
        state.auth.login("anna@segeltorp.se", Some("Anna"))?;
        state.finance.add_transaction(income(2000.0, date(2024, 6, 1)))?;
        state
            .finance
            .add_transaction(expense(500.0, TransactionCategory::Food, date(2024, 6, 2)))?;
        state.sales.add_sale(
            new_car_sale("anna@segeltorp.se", CarBrand::Hongqi, 410_000.0),
            at(2024, 6, 2, 9),
        )?;
        state
            .sales
            .add_sale(used_car_sale("anna@segeltorp.se", 95_000.0), at(2024, 6, 1, 9))?;
        state.chat.add_message("anna@segeltorp.se", "Hej!", at(2024, 6, 2, 10))?;
        state
            .notifications
            .add(NotificationKind::Chat, "Nytt meddelande", "Hej!", at(2024, 6, 2, 10));

        assert_eq!(state.persist_all(&storage).await, 0);
        let loaded = AppState::load(&storage).await;

        assert_eq!(loaded, state);
        // newest transaction first
        assert_eq!(loaded.finance.transactions[0].amount, 500.0);
        assert_eq!(loaded.sales.sales[1].car_brand, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_computed_amounts_reload_bit_for_bit() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut state = AppState::default();
        let odd_amount = 0.237_000_000_000_000_02;
        state.finance.add_transaction(expense(
            odd_amount,
            TransactionCategory::Food,
            date(2024, 6, 3),
        ))?;
        for step in 1..=500_u32 {
            state.finance.add_goal(NewGoal {
                name: format!("Sparmål {step}"),
                target_amount: f64::from(step) * 0.001 + 0.1,
                current_amount: 0.1 + 0.2,
                deadline: None,
            })?;
        }

        assert_eq!(state.persist_all(&storage).await, 0);
        let loaded = AppState::load(&storage).await;

        assert_eq!(loaded, state);
        assert_eq!(
            loaded.finance.transactions[0].amount.to_bits(),
            f64::to_bits(odd_amount)
        );
        assert!(
            loaded
                .finance
                .goals
                .iter()
                .zip(&state.finance.goals)
                .all(|(a, b)| a.target_amount.to_bits() == b.target_amount.to_bits())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_used_sale_blob_has_no_brand() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut state = AppState::default();
        state.sales.add_sale(used_car_sale("p1", 50_000.0), at(2024, 6, 1, 8))?;
        state.persist_all(&storage).await;

        let blob = storage.get(SalesStore::STORAGE_KEY).await?.unwrap();
        assert!(!blob.contains("carBrand"));
        assert!(blob.contains("\"carType\":\"used\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_store_falls_back_to_default() -> Result<()> {
        let storage = setup_test_storage().await?;
        let mut state = AppState::default();
        state.chat.add_message("p1", "Hej", at(2024, 6, 1, 8))?;
        state.persist_all(&storage).await;
        storage.set(FinanceStore::STORAGE_KEY, "not json").await?;

        let loaded = AppState::load(&storage).await;
        assert_eq!(loaded.finance, FinanceStore::default());
        assert_eq!(loaded.chat, state.chat);
        Ok(())
    }

    #[test]
    fn test_seed_budgets_skips_existing_categories() {
        let mut state = AppState::default();
        let seeds = vec![
            BudgetSeed {
                category: TransactionCategory::Food,
                amount: 4000.0,
                period: BudgetPeriod::Monthly,
            },
            BudgetSeed {
                category: TransactionCategory::Transport,
                amount: 1200.0,
                period: BudgetPeriod::Monthly,
            },
        ];

        assert_eq!(state.seed_budgets(&seeds).unwrap(), 2);
        assert_eq!(state.seed_budgets(&seeds).unwrap(), 0);
        assert_eq!(state.finance.budgets.len(), 2);
    }
}
