//! Application configuration loading from config.toml
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults below. Budgets listed under `[[budgets]]` seed an empty finance
//! store on first run.

use crate::errors::{Error, Result};
use crate::models::{BudgetPeriod, NewBudget, TransactionCategory};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// `[storage]` section
    #[serde(default)]
    pub storage: StorageConfig,
    /// `[sales]` section
    #[serde(default)]
    pub sales: SalesConfig,
    /// `[report]` section
    #[serde(default)]
    pub report: ReportConfig,
    /// Budgets to seed when the finance store is empty
    #[serde(default)]
    pub budgets: Vec<BudgetSeed>,
}

/// Where the stores are persisted
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Overridden by `DATABASE_URL` when set
    pub database_url: Option<String>,
}

/// Goals given to newly registered sales people
#[derive(Debug, Deserialize)]
pub struct SalesConfig {
    /// Cars per calendar month, default 20
    #[serde(default = "default_monthly_goal")]
    pub monthly_goal: u32,
    /// Cars per calendar year, default 240
    #[serde(default = "default_yearly_goal")]
    pub yearly_goal: u32,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            monthly_goal: default_monthly_goal(),
            yearly_goal: default_yearly_goal(),
        }
    }
}

const fn default_monthly_goal() -> u32 {
    20
}

const fn default_yearly_goal() -> u32 {
    240
}

/// Sales report output
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Directory the exported HTML report is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Currency suffix used when formatting sale values
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            currency: default_currency(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_currency() -> String {
    "kr".to_string()
}

/// A budget entry from config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetSeed {
    /// Category to budget
    pub category: TransactionCategory,
    /// Monthly limit
    pub amount: f64,
    /// Defaults to monthly
    #[serde(default = "default_period")]
    pub period: BudgetPeriod,
}

const fn default_period() -> BudgetPeriod {
    BudgetPeriod::Monthly
}

impl From<&BudgetSeed> for NewBudget {
    fn from(seed: &BudgetSeed) -> Self {
        Self {
            category: seed.category,
            amount: seed.amount,
            period: seed.period,
        }
    }
}

impl AppConfig {
    /// Rejects configurations the stores would refuse later on.
    ///
    /// # Errors
    /// Returns `Error::Config` for zero goals and `Error::InvalidAmount`
    /// for non-positive seed budgets.
    pub fn validate(&self) -> Result<()> {
        if self.sales.monthly_goal == 0 || self.sales.yearly_goal == 0 {
            return Err(Error::Config {
                message: "Sales goals must be positive".to_string(),
            });
        }

        if let Some(seed) = self
            .budgets
            .iter()
            .find(|seed| !(seed.amount.is_finite() && seed.amount > 0.0))
        {
            return Err(Error::InvalidAmount {
                amount: seed.amount,
            });
        }

        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or the values fail [`AppConfig::validate`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration text.
///
/// # Errors
/// Returns `Error::Config` for invalid TOML and the errors of
/// [`AppConfig::validate`].
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads ./config.toml, or the defaults when the file does not exist.
///
/// # Errors
/// Returns the errors of [`load_config`] when the file exists.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_config(path)
    } else {
        info!("No config.toml found, using default configuration");
        Ok(AppConfig::default())
    }
}
