//! Sales report generation
//!
//! This module turns a snapshot of the sales, sales people and test drives into
//! a static HTML document covering one date range. Rendering is deterministic:
//! the same input always yields the same bytes, and the only dates in the
//! output are the range boundaries.

use super::{
    date_range::DateRange,
    format::format_currency,
    sales::{CarTypeCounts, brand_counts},
    test_drive::test_drive_stats_in,
};
use crate::{
    errors::Result,
    models::{SaleRecord, SalesPerson, TestDrive},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, info, instrument};

const TEMPLATE_NAME: &str = "sales_report.html";
const REPORT_TEMPLATE: &str = include_str!("../../templates/sales_report.html");

/// Everything the report is computed from.
#[derive(Clone, Copy, Debug)]
pub struct ReportInput<'a> {
    /// Days covered by the report
    pub range: DateRange,
    /// Whole sales ledger; filtered by `range`
    pub sales: &'a [SaleRecord],
    /// Every sales person, listed even without sales
    pub people: &'a [SalesPerson],
    /// Every booking; filtered by `range`
    pub test_drives: &'a [TestDrive],
    /// Suffix for formatted amounts, e.g. "kr"
    pub currency: &'a str,
}

/// Headline sales figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverviewSection {
    /// Cars sold
    pub total: usize,
    /// New cars sold
    pub new: usize,
    /// Used cars sold
    pub used: usize,
    /// Summed value, formatted
    pub total_value: String,
    /// Mean value, formatted
    pub average_value: String,
}

/// One row of the brand table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrandRow {
    /// Brand label
    pub brand: String,
    /// New cars sold
    pub count: usize,
    /// Summed value, formatted
    pub value: String,
}

/// Test-drive figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestDriveSection {
    /// Bookings in range
    pub total: usize,
    /// Not yet done
    pub scheduled: usize,
    /// Done
    pub completed: usize,
    /// Completed share with one decimal and a percent sign
    pub conversion: String,
}

/// One row of the per-seller table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonRow {
    /// Sales person id
    pub id: String,
    /// Display name
    pub name: String,
    /// Cars sold
    pub total: usize,
    /// New cars sold
    pub new: usize,
    /// Used cars sold
    pub used: usize,
    /// Summed value, formatted
    pub value: String,
}

/// Report contents with every figure already formatted for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    /// First day, `YYYY-MM-DD`
    pub start: String,
    /// Last day, `YYYY-MM-DD`
    pub end: String,
    /// Headline figures
    pub overview: OverviewSection,
    /// Most sold brand first
    pub brands: Vec<BrandRow>,
    /// Booking figures
    pub test_drives: TestDriveSection,
    /// Most sales first
    pub people: Vec<PersonRow>,
}

impl SalesReport {
    /// Aggregates the records dated inside the input's range.
    ///
    /// Sales people are listed most sales first (ties by id), including those
    /// without any sales in the range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(input: &ReportInput<'_>) -> Self {
        let in_range: Vec<&SaleRecord> = input
            .sales
            .iter()
            .filter(|sale| input.range.contains(sale.date.date_naive()))
            .collect();
        let money = |amount: f64| format_currency(amount, input.currency);

        let counts: CarTypeCounts = in_range.iter().copied().collect();
        let total_value: f64 = in_range.iter().map(|sale| sale.value).sum();
        let average_value = if in_range.is_empty() {
            0.0
        } else {
            total_value / in_range.len() as f64
        };

        let brands = brand_counts(in_range.iter().copied(), None)
            .into_iter()
            .map(|row| BrandRow {
                brand: row.brand.to_string(),
                count: row.count,
                value: money(row.value),
            })
            .collect();

        let drives = test_drive_stats_in(input.test_drives, input.range);

        let mut people: Vec<(&SalesPerson, CarTypeCounts, f64)> = input
            .people
            .iter()
            .map(|person| {
                let own: Vec<&SaleRecord> = in_range
                    .iter()
                    .copied()
                    .filter(|sale| sale.sales_person_id == person.id)
                    .collect();
                let value = own.iter().map(|sale| sale.value).sum();
                (person, own.into_iter().collect(), value)
            })
            .collect();
        people.sort_by(|(a, a_counts, _), (b, b_counts, _)| {
            b_counts.total.cmp(&a_counts.total).then_with(|| a.id.cmp(&b.id))
        });

        Self {
            start: input.range.start().to_string(),
            end: input.range.end().to_string(),
            overview: OverviewSection {
                total: counts.total,
                new: counts.new,
                used: counts.used,
                total_value: money(total_value),
                average_value: money(average_value),
            },
            brands,
            test_drives: TestDriveSection {
                total: drives.total,
                scheduled: drives.scheduled,
                completed: drives.completed,
                conversion: format!("{:.1}%", drives.conversion),
            },
            people: people
                .into_iter()
                .map(|(person, counts, value)| PersonRow {
                    id: person.id.clone(),
                    name: person.name.clone(),
                    total: counts.total,
                    new: counts.new,
                    used: counts.used,
                    value: money(value),
                })
                .collect(),
        }
    }
}

/// Renders the report for `input` as a standalone HTML document.
///
/// User-provided text such as names is HTML-escaped.
///
/// # Errors
/// Returns `Error::Template` if the template fails to parse or render.
pub fn generate_report_html(input: &ReportInput<'_>) -> Result<String> {
    let report = SalesReport::build(input);

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, REPORT_TEMPLATE)?;
    let context = Context::from_serialize(&report)?;
    let html = tera.render(TEMPLATE_NAME, &context)?;

    debug!(start = %report.start, end = %report.end, bytes = html.len(), "Rendered sales report");
    Ok(html)
}

/// File name of the exported report: `forsaljningsrapport-<start>.html`.
#[must_use]
pub fn report_file_name(range: DateRange) -> String {
    format!("forsaljningsrapport-{}.html", range.start())
}

/// Renders the report and writes it into `dir`, creating the directory if needed.
///
/// # Errors
/// Returns `Error::Template` on rendering failures and `Error::Io` when the
/// file cannot be written.
#[instrument(skip(input), fields(start = %input.range.start(), end = %input.range.end()))]
pub fn export_report(dir: &Path, input: &ReportInput<'_>) -> Result<PathBuf> {
    let html = generate_report_html(input)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(input.range));
    std::fs::write(&path, html)?;

    info!(path = %path.display(), "Exported sales report");
    Ok(path)
}
