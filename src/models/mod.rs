//! Domain records shared by the stores, the aggregation layer and the report.

/// Transactions, budgets and savings goals
pub mod finance;
/// Sales, sales people and test drives
pub mod sales;
/// Users, chat messages and notifications
pub mod team;

pub use finance::{
    Budget, BudgetPatch, BudgetPeriod, FinancialGoal, GoalPatch, NewBudget, NewGoal,
    NewTransaction, Transaction, TransactionCategory, TransactionPatch,
};
pub use sales::{
    CarBrand, CarType, NewSale, NewTestDrive, SaleRecord, SalesPerson, TestDrive,
    TestDriveStatus,
};
pub use team::{ChatMessage, Notification, NotificationKind, User, UserPatch, UserRole};
