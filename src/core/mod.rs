/// Sign-up across the auth and sales stores
pub mod auth;

/// Inclusive date ranges, presets and the calendar range picker
pub mod date_range;

/// Budget progress, totals and transaction queries
pub mod finance;

/// Currency, progress bar and relative time formatting
pub mod format;

/// Sales and bookings that broadcast a notification
pub mod notify;

/// HTML sales report rendering and export
pub mod report;

/// Sales rollups, leaderboards and KPIs
pub mod sales;

/// Upcoming/completed test drives and conversion
pub mod test_drive;

/// Form drafts validated into store inputs
pub mod validation;

pub use date_range::DateRange;
pub use finance::{BudgetProgress, BudgetStatus};
pub use report::{ReportInput, export_report, generate_report_html, report_file_name};
pub use sales::{LeaderboardEntry, kpi_metrics, monthly_leaderboard, yearly_leaderboard};
