//! Finance store - transactions, budgets and savings goals.
//!
//! New transactions go to the front of the ledger (newest first); budgets and
//! goals keep insertion order. Updates are partial patches applied by id.

use super::{ensure_positive, new_id};
use crate::{
    errors::{Error, Result},
    models::{
        Budget, BudgetPatch, FinancialGoal, GoalPatch, NewBudget, NewGoal, NewTransaction,
        Transaction, TransactionPatch,
    },
    storage::PersistedStore,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Personal finance ledger.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceStore {
    /// Newest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Spending limits, in insertion order
    #[serde(default)]
    pub budgets: Vec<Budget>,
    /// Savings goals, in insertion order
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
}

impl PersistedStore for FinanceStore {
    const STORAGE_KEY: &'static str = "finance-storage";
}

fn not_found(entity: &'static str, id: &str) -> Error {
    Error::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn ensure_non_negative(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

/// Trimmed goal name; blank names are rejected.
fn goal_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        Err(Error::MissingField { field: "name" })
    } else {
        Ok(name.to_string())
    }
}

impl FinanceStore {
    /// Looks up a transaction by id.
    #[must_use]
    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Looks up a budget by id.
    #[must_use]
    pub fn budget(&self, id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Looks up a savings goal by id.
    #[must_use]
    pub fn goal(&self, id: &str) -> Option<&FinancialGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Adds a transaction at the head of the ledger.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` unless the amount is finite and positive.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let amount = ensure_positive(new.amount)?;
        let transaction = Transaction {
            id: new_id(),
            amount,
            description: new.description,
            category: new.category,
            date: new.date,
            is_expense: new.is_expense,
        };
        debug!(id = %transaction.id, category = %transaction.category, "Added transaction");
        self.transactions.insert(0, transaction);
        Ok(&self.transactions[0])
    }

    /// Applies a partial update to a transaction.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id and `Error::InvalidAmount`
    /// for a non-positive amount; nothing is changed in either case.
    pub fn update_transaction(
        &mut self,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<&Transaction> {
        let amount = patch.amount.map(ensure_positive).transpose()?;
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Transaction", id))?;

        if let Some(amount) = amount {
            transaction.amount = amount;
        }
        if let Some(description) = patch.description {
            transaction.description = description;
        }
        if let Some(category) = patch.category {
            transaction.category = category;
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(is_expense) = patch.is_expense {
            transaction.is_expense = is_expense;
        }
        Ok(transaction)
    }

    /// Removes a transaction, returning it.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id.
    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("Transaction", id))?;
        Ok(self.transactions.remove(index))
    }

    /// Appends a budget.
    ///
    /// # Errors
    /// Returns `Error::InvalidAmount` unless the amount is finite and positive.
    pub fn add_budget(&mut self, new: NewBudget) -> Result<&Budget> {
        let amount = ensure_positive(new.amount)?;
        self.budgets.push(Budget {
            id: new_id(),
            category: new.category,
            amount,
            period: new.period,
        });
        let budget = &self.budgets[self.budgets.len() - 1];
        debug!(id = %budget.id, category = %budget.category, "Added budget");
        Ok(budget)
    }

    /// Applies a partial update to a budget.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id and `Error::InvalidAmount`
    /// for a non-positive amount.
    pub fn update_budget(&mut self, id: &str, patch: BudgetPatch) -> Result<&Budget> {
        let amount = patch.amount.map(ensure_positive).transpose()?;
        let budget = self
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("Budget", id))?;

        if let Some(category) = patch.category {
            budget.category = category;
        }
        if let Some(amount) = amount {
            budget.amount = amount;
        }
        if let Some(period) = patch.period {
            budget.period = period;
        }
        Ok(budget)
    }

    /// Removes a budget, returning it.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id.
    pub fn delete_budget(&mut self, id: &str) -> Result<Budget> {
        let index = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| not_found("Budget", id))?;
        Ok(self.budgets.remove(index))
    }

    /// Appends a savings goal with a trimmed name.
    ///
    /// # Errors
    /// Returns `Error::MissingField` for a blank name and `Error::InvalidAmount`
    /// for a non-positive target or a negative saved amount.
    pub fn add_goal(&mut self, new: NewGoal) -> Result<&FinancialGoal> {
        let name = goal_name(&new.name)?;
        let target_amount = ensure_positive(new.target_amount)?;
        let current_amount = ensure_non_negative(new.current_amount)?;

        self.goals.push(FinancialGoal {
            id: new_id(),
            name,
            target_amount,
            current_amount,
            deadline: new.deadline,
        });
        Ok(&self.goals[self.goals.len() - 1])
    }

    /// Applies a partial update to a savings goal, with the same checks as
    /// [`Self::add_goal`] for every field the patch sets.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id, `Error::MissingField` for a
    /// blank name and `Error::InvalidAmount` for out-of-range amounts.
    pub fn update_goal(&mut self, id: &str, patch: GoalPatch) -> Result<&FinancialGoal> {
        let target_amount = patch.target_amount.map(ensure_positive).transpose()?;
        let current_amount = patch.current_amount.map(ensure_non_negative).transpose()?;
        let name = patch.name.as_deref().map(goal_name).transpose()?;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found("Goal", id))?;

        if let Some(name) = name {
            goal.name = name;
        }
        if let Some(target_amount) = target_amount {
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = current_amount {
            goal.current_amount = current_amount;
        }
        if let Some(deadline) = patch.deadline {
            goal.deadline = deadline;
        }
        Ok(goal)
    }

    /// Removes a savings goal, returning it.
    ///
    /// # Errors
    /// Returns `Error::NotFound` for an unknown id.
    pub fn delete_goal(&mut self, id: &str) -> Result<FinancialGoal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| not_found("Goal", id))?;
        Ok(self.goals.remove(index))
    }
}
