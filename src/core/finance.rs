//! Finance aggregations - totals, category breakdowns, budget and goal progress.
//!
//! Every function is a pure read over a store snapshot and recomputes from the
//! full ledger on each call. Time-windowed functions take `today` explicitly.

use super::date_range::DateRange;
use crate::{
    models::{Budget, FinancialGoal, Transaction, TransactionCategory},
    stores::FinanceStore,
};
use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator;

/// Share of a budget used in the current calendar month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// Expenses in the budget's category this month
    pub spent: f64,
    /// `max(0, amount - spent)`
    pub remaining: f64,
    /// `min(100, spent / amount * 100)`, 0 for a zero-amount budget
    pub percentage: f64,
}

/// Traffic-light state of a budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    /// Under 80% used
    OnTrack,
    /// 80% or more used
    NearLimit,
    /// Fully used
    OverBudget,
}

impl BudgetProgress {
    /// Status thresholds are 80% and 100%.
    #[must_use]
    pub fn status(&self) -> BudgetStatus {
        if self.percentage >= 100.0 {
            BudgetStatus::OverBudget
        } else if self.percentage >= 80.0 {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        }
    }
}

/// Sum of all income entries.
#[must_use]
pub fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| !t.is_expense)
        .map(|t| t.amount)
        .sum()
}

/// Sum of all expense entries.
#[must_use]
pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense)
        .map(|t| t.amount)
        .sum()
}

/// `total_income - total_expenses`
#[must_use]
pub fn balance(transactions: &[Transaction]) -> f64 {
    total_income(transactions) - total_expenses(transactions)
}

/// Expense total for one category. Income entries never count, so the
/// `Income` category always totals zero.
#[must_use]
pub fn category_total(transactions: &[Transaction], category: TransactionCategory) -> f64 {
    transactions
        .iter()
        .filter(|t| t.category == category && t.is_expense)
        .map(|t| t.amount)
        .sum()
}

/// Entries of one category, income and expenses alike, in ledger order.
pub fn transactions_by_category(
    transactions: &[Transaction],
    category: TransactionCategory,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

/// Entries dated within `range`, bounds included.
pub fn transactions_by_date_range(
    transactions: &[Transaction],
    range: DateRange,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .collect()
}

/// The first `count` entries of the ledger, which are the most recent ones.
#[must_use]
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> &[Transaction] {
    &transactions[..count.min(transactions.len())]
}

/// Progress of one budget against expenses in `today`'s calendar month.
#[must_use]
pub fn progress_for_budget(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BudgetProgress {
    let month = DateRange::whole_month(today);
    let spent: f64 = transactions
        .iter()
        .filter(|t| t.category == budget.category && t.is_expense && month.contains(t.date))
        .map(|t| t.amount)
        .sum();

    let remaining = (budget.amount - spent).max(0.0);
    let percentage = if budget.amount > 0.0 {
        (spent / budget.amount * 100.0).min(100.0)
    } else {
        0.0
    };

    BudgetProgress {
        spent,
        remaining,
        percentage,
    }
}

/// Progress of the budget with `budget_id`; an unknown id yields all zeros.
#[must_use]
pub fn budget_progress(store: &FinanceStore, budget_id: &str, today: NaiveDate) -> BudgetProgress {
    store
        .budget(budget_id)
        .map(|budget| progress_for_budget(budget, &store.transactions, today))
        .unwrap_or_default()
}

/// A budget together with its progress.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetSummary<'a> {
    /// The budget
    pub budget: &'a Budget,
    /// Usage this month
    pub progress: BudgetProgress,
    /// Derived from `progress`
    pub status: BudgetStatus,
}

/// Every budget with its progress, in store order.
#[must_use]
pub fn budget_overview(store: &FinanceStore, today: NaiveDate) -> Vec<BudgetSummary<'_>> {
    store
        .budgets
        .iter()
        .map(|budget| {
            let progress = progress_for_budget(budget, &store.transactions, today);
            BudgetSummary {
                budget,
                progress,
                status: progress.status(),
            }
        })
        .collect()
}

/// Direction filter of the transaction list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionKind {
    /// No direction filter
    #[default]
    All,
    /// Money out only
    Expense,
    /// Money in only
    Income,
}

/// Search, category and direction filters of the transaction list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description; empty matches everything
    pub query: String,
    /// Only this category, when set
    pub category: Option<TransactionCategory>,
    /// Direction filter
    pub kind: TransactionKind,
}

impl TransactionFilter {
    fn matches(&self, transaction: &Transaction, query: &str) -> bool {
        let matches_search = transaction.description.to_lowercase().contains(query);
        let matches_category = self
            .category
            .is_none_or(|category| transaction.category == category);
        let matches_kind = match self.kind {
            TransactionKind::All => true,
            TransactionKind::Expense => transaction.is_expense,
            TransactionKind::Income => !transaction.is_expense,
        };
        matches_search && matches_category && matches_kind
    }
}

/// Entries matching every part of `filter`, in ledger order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let query = filter.query.to_lowercase();
    transactions
        .iter()
        .filter(|t| filter.matches(t, &query))
        .collect()
}

/// One slice of the expense breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Expense category
    pub category: TransactionCategory,
    /// Total spent in it
    pub amount: f64,
    /// Share of all expenses, 0-100
    pub percentage: f64,
}

/// Expense categories that have spending, largest first. Equal amounts keep
/// category order. Empty when there are no expenses.
#[must_use]
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let total = total_expenses(transactions);
    if total <= 0.0 {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = TransactionCategory::iter()
        .filter(|category| {
            transactions
                .iter()
                .any(|t| t.is_expense && t.category == *category)
        })
        .map(|category| {
            let amount = category_total(transactions, category);
            CategoryShare {
                category,
                amount,
                percentage: amount / total * 100.0,
            }
        })
        .collect();

    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

/// Completion of a savings goal, capped at 100. A zero target counts as 0%.
#[must_use]
pub fn goal_progress(goal: &FinancialGoal) -> f64 {
    if goal.target_amount > 0.0 {
        (goal.current_amount / goal.target_amount * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// Headline numbers of the balance card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FinanceSummary {
    /// Total income
    pub income: f64,
    /// Total expenses
    pub expenses: f64,
    /// Income minus expenses
    pub balance: f64,
}

/// Totals over the whole ledger.
#[must_use]
pub fn summarize(transactions: &[Transaction]) -> FinanceSummary {
    let income = total_income(transactions);
    let expenses = total_expenses(transactions);
    FinanceSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}
