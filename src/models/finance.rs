//! Finance records - transactions, budgets and savings goals.
//!
//! Field names serialize in camelCase so a persisted finance blob reads
//! `{ "transactions": [...], "budgets": [...], "goals": [...] }` with
//! `isExpense`, `targetAmount` and friends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Spending / income category attached to every transaction and budget.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransactionCategory {
    /// Groceries and eating out
    Food,
    /// Clothes and other shopping
    Shopping,
    /// Fuel, tickets and fares
    Transport,
    /// Going out and subscriptions
    Entertainment,
    /// Rent and mortgage
    Housing,
    /// Power, water and internet
    Utilities,
    /// Care and medicine
    Healthcare,
    /// Courses and books
    Education,
    /// Trips
    Travel,
    /// Personal care
    Personal,
    /// Salary and other money in
    Income,
    /// Anything else
    Other,
}

impl TransactionCategory {
    /// Human-readable label shown next to the category icon.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Shopping => "Shopping",
            Self::Transport => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Personal => "Personal",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }

    /// Every category except `Income`.
    pub fn expense_categories() -> impl Iterator<Item = Self> {
        Self::iter().filter(|category| *category != Self::Income)
    }
}

/// A single ledger entry. `amount` is always positive; direction is carried by `is_expense`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: String,
    /// Positive amount
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Spending or income category
    pub category: TransactionCategory,
    /// Day the transaction happened
    pub date: NaiveDate,
    /// `true` for money out, `false` for income
    pub is_expense: bool,
}

/// Validated input for a new transaction (everything but the id).
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    /// Positive amount
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Spending or income category
    pub category: TransactionCategory,
    /// Day the transaction happened
    pub date: NaiveDate,
    /// `true` for money out
    pub is_expense: bool,
}

/// Partial update applied by id; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionPatch {
    /// New amount
    pub amount: Option<f64>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<TransactionCategory>,
    /// New date
    pub date: Option<NaiveDate>,
    /// New direction
    pub is_expense: Option<bool>,
}

/// Recurring window a budget is meant for.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BudgetPeriod {
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every calendar month
    Monthly,
}

/// Spending limit for one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Unique identifier
    pub id: String,
    /// Category the limit applies to
    pub category: TransactionCategory,
    /// Spending limit
    pub amount: f64,
    /// Intended window; progress is always measured per calendar month
    pub period: BudgetPeriod,
}

/// Validated input for a new budget.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBudget {
    /// Category the limit applies to
    pub category: TransactionCategory,
    /// Spending limit
    pub amount: f64,
    /// Intended window
    pub period: BudgetPeriod,
}

/// Partial budget update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetPatch {
    /// New category
    pub category: Option<TransactionCategory>,
    /// New limit
    pub amount: Option<f64>,
    /// New window
    pub period: Option<BudgetPeriod>,
}

/// Savings target. `current_amount` may exceed `target_amount`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    /// Unique identifier
    pub id: String,
    /// Display name, never blank
    pub name: String,
    /// Amount to save
    pub target_amount: f64,
    /// Amount saved so far
    pub current_amount: f64,
    /// Optional day to reach the target by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Validated input for a new savings goal.
#[derive(Clone, Debug, PartialEq)]
pub struct NewGoal {
    /// Display name
    pub name: String,
    /// Amount to save
    pub target_amount: f64,
    /// Amount already saved
    pub current_amount: f64,
    /// Optional deadline
    pub deadline: Option<NaiveDate>,
}

/// Partial goal update. `deadline: Some(None)` clears the deadline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalPatch {
    /// New name
    pub name: Option<String>,
    /// New target
    pub target_amount: Option<f64>,
    /// New saved amount
    pub current_amount: Option<f64>,
    /// New deadline, or `Some(None)` to clear it
    pub deadline: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trips_through_strings() {
        assert_eq!(
            TransactionCategory::from_str("food").unwrap(),
            TransactionCategory::Food
        );
        assert_eq!(TransactionCategory::Healthcare.to_string(), "healthcare");
        assert_eq!(
            serde_json::to_string(&TransactionCategory::Income).unwrap(),
            "\"income\""
        );
    }

    #[test]
    fn test_expense_categories_exclude_income() {
        let categories: Vec<_> = TransactionCategory::expense_categories().collect();
        assert_eq!(categories.len(), 11);
        assert!(!categories.contains(&TransactionCategory::Income));
    }

    #[test]
    fn test_transaction_serializes_camel_case() {
        let transaction = Transaction {
            id: "t1".to_string(),
            amount: 500.0,
            description: "Groceries".to_string(),
            category: TransactionCategory::Food,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            is_expense: true,
        };
        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["isExpense"], true);
        assert_eq!(json["date"], "2024-06-15");
        assert_eq!(json["category"], "food");
    }

    #[test]
    fn test_goal_without_deadline_omits_field() {
        let goal = FinancialGoal {
            id: "g1".to_string(),
            name: "Emergency Fund".to_string(),
            target_amount: 5000.0,
            current_amount: 2000.0,
            deadline: None,
        };
        let json = serde_json::to_value(&goal).unwrap();
        assert!(json.get("deadline").is_none());
        assert_eq!(json["targetAmount"], 5000.0);
    }
}
