use chrono::Utc;
use dotenvy::dotenv;
use ledger_buddy::{
    config::{self, database},
    core::{
        DateRange, ReportInput,
        finance::{budget_overview, summarize},
        format::{format_currency, format_progress_bar},
        export_report, kpi_metrics, monthly_leaderboard,
    },
    errors::Result,
    state::AppState,
    storage::SqliteStorage,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open storage and make sure the blob table exists
    let database_url = database::resolve_database_url(app_config.storage.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    let storage = SqliteStorage::new(db);

    // 5. Load every store and seed configured budgets
    let mut state = AppState::load(&storage).await;
    let seeded = state.seed_budgets(&app_config.budgets)?;
    if seeded > 0 {
        info!("Seeded {} budgets from configuration", seeded);
    }

    let now = Utc::now();
    let today = now.date_naive();
    let currency = app_config.report.currency.as_str();

    // 6. Finance summary
    let summary = summarize(&state.finance.transactions);
    info!(
        income = %format_currency(summary.income, currency),
        expenses = %format_currency(summary.expenses, currency),
        balance = %format_currency(summary.balance, currency),
        "Finance summary"
    );
    for entry in budget_overview(&state.finance, today) {
        info!(
            "{:<14} {}",
            entry.budget.category.label(),
            format_progress_bar(entry.progress.percentage, None)
        );
    }

    // 7. Sales summary
    let kpi = kpi_metrics(&state.sales.sales, &state.sales.sales_people, today);
    info!(
        month = kpi.month.total,
        year = kpi.year.total,
        team_goal = kpi.team_monthly_goal,
        "Sales this month: {}",
        format_progress_bar(kpi.team_monthly_progress, None)
    );
    for entry in monthly_leaderboard(&state.sales.sales, &state.sales.sales_people, today) {
        info!(
            "#{} {} - {} of {}",
            entry.rank, entry.person.name, entry.sales_count, entry.goal
        );
    }

    // 8. Export this month's report
    let input = ReportInput {
        range: DateRange::current_month(today),
        sales: &state.sales.sales,
        people: &state.sales.sales_people,
        test_drives: &state.test_drives.test_drives,
        currency,
    };
    export_report(&app_config.report.output_dir, &input)
        .inspect_err(|e| error!("Failed to export report: {}", e))?;

    // 9. Save state; failures are logged per store
    let failures = state.persist_all(&storage).await;
    if failures > 0 {
        warn!("{} stores could not be saved", failures);
    }

    Ok(())
}
