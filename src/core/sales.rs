//! Sales aggregations - per-person rollups, brand counts, leaderboards and KPIs.
//!
//! Month and year windows are calendar windows: a sale belongs to the current
//! month when its (UTC) date has the same year and month as `today`. This is
//! not a rolling 30-day window.

use crate::models::{CarBrand, CarType, SaleRecord, SalesPerson};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// Sale counts split by car type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CarTypeCounts {
    /// All sales
    pub total: usize,
    /// New-car sales
    pub new: usize,
    /// Used-car sales
    pub used: usize,
}

impl CarTypeCounts {
    fn record(&mut self, car_type: CarType) {
        self.total += 1;
        match car_type {
            CarType::New => self.new += 1,
            CarType::Used => self.used += 1,
        }
    }
}

impl<'a> FromIterator<&'a SaleRecord> for CarTypeCounts {
    fn from_iter<I: IntoIterator<Item = &'a SaleRecord>>(sales: I) -> Self {
        let mut counts = Self::default();
        for sale in sales {
            counts.record(sale.car_type);
        }
        counts
    }
}

/// Calendar window a sale is counted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SalesWindow {
    /// Same calendar month and year as today
    Month,
    /// Same calendar year as today
    Year,
}

impl SalesWindow {
    /// Whether `sale` falls in this window around `today`.
    #[must_use]
    pub fn contains(self, sale: &SaleRecord, today: NaiveDate) -> bool {
        let day = sale.date.date_naive();
        match self {
            Self::Month => day.year() == today.year() && day.month() == today.month(),
            Self::Year => day.year() == today.year(),
        }
    }

    const fn goal(self, person: &SalesPerson) -> u32 {
        match self {
            Self::Month => person.monthly_goal,
            Self::Year => person.yearly_goal,
        }
    }
}

/// Month and year counts for one sales person.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonRollup {
    /// Sales this calendar month
    pub month: CarTypeCounts,
    /// Sales this calendar year
    pub year: CarTypeCounts,
}

/// Counts `person_id`'s sales in the month and year around `today`.
#[must_use]
pub fn person_rollup(sales: &[SaleRecord], person_id: &str, today: NaiveDate) -> PersonRollup {
    let mut rollup = PersonRollup::default();
    for sale in sales.iter().filter(|sale| sale.sales_person_id == person_id) {
        if SalesWindow::Year.contains(sale, today) {
            rollup.year.record(sale.car_type);
            if SalesWindow::Month.contains(sale, today) {
                rollup.month.record(sale.car_type);
            }
        }
    }
    rollup
}

/// New-car sales of one brand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BrandCount {
    /// The brand
    pub brand: CarBrand,
    /// Cars sold
    pub count: usize,
    /// Summed sale value
    pub value: f64,
}

/// New-car sales grouped by brand, most sold first, ties in catalog order.
/// With `person_id` set only that person's sales are counted.
#[must_use]
pub fn brand_counts<'a, I>(sales: I, person_id: Option<&str>) -> Vec<BrandCount>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let mut by_brand: HashMap<CarBrand, BrandCount> = HashMap::new();
    let matching = sales
        .into_iter()
        .filter(|sale| person_id.is_none_or(|id| sale.sales_person_id == id));
    for sale in matching {
        if let (CarType::New, Some(brand)) = (sale.car_type, sale.car_brand) {
            let entry = by_brand.entry(brand).or_insert(BrandCount {
                brand,
                count: 0,
                value: 0.0,
            });
            entry.count += 1;
            entry.value += sale.value;
        }
    }

    let mut counts: Vec<BrandCount> = by_brand.into_values().collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.brand.cmp(&b.brand)));
    counts
}

/// `min(100, count / goal * 100)`; a zero goal reads as 0%.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn goal_progress(count: usize, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (count as f64 / f64::from(goal) * 100.0).min(100.0)
}

/// One ranked row of a leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardEntry<'a> {
    /// 1 is the top seller
    pub rank: usize,
    /// The ranked sales person
    pub person: &'a SalesPerson,
    /// Sales in the window
    pub sales_count: usize,
    /// Monthly or yearly goal, matching the window
    pub goal: u32,
    /// Goal completion, 0-100
    pub progress: f64,
}

/// Ranks sales people by their number of sales in `window`.
///
/// People without sales in the window are left out, as are sales by unknown
/// people. Equal counts are ordered by person id.
#[must_use]
pub fn leaderboard<'a>(
    sales: &[SaleRecord],
    people: &'a [SalesPerson],
    window: SalesWindow,
    today: NaiveDate,
) -> Vec<LeaderboardEntry<'a>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for sale in sales.iter().filter(|sale| window.contains(sale, today)) {
        *counts.entry(sale.sales_person_id.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&SalesPerson, usize)> = people
        .iter()
        .filter_map(|person| {
            counts
                .get(person.id.as_str())
                .map(|count| (person, *count))
        })
        .collect();
    ranked.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.id.cmp(&b.id)));

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (person, sales_count))| {
            let goal = window.goal(person);
            LeaderboardEntry {
                rank: index + 1,
                person,
                sales_count,
                goal,
                progress: goal_progress(sales_count, goal),
            }
        })
        .collect()
}

/// [`leaderboard`] over the current calendar month.
#[must_use]
pub fn monthly_leaderboard<'a>(
    sales: &[SaleRecord],
    people: &'a [SalesPerson],
    today: NaiveDate,
) -> Vec<LeaderboardEntry<'a>> {
    leaderboard(sales, people, SalesWindow::Month, today)
}

/// [`leaderboard`] over the current calendar year.
#[must_use]
pub fn yearly_leaderboard<'a>(
    sales: &[SaleRecord],
    people: &'a [SalesPerson],
    today: NaiveDate,
) -> Vec<LeaderboardEntry<'a>> {
    leaderboard(sales, people, SalesWindow::Year, today)
}

/// Team-wide key figures for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct KpiMetrics {
    /// Every recorded sale
    pub all_time: CarTypeCounts,
    /// Sales this calendar month
    pub month: CarTypeCounts,
    /// Sales this calendar year
    pub year: CarTypeCounts,
    /// Summed value of every sale
    pub total_value: f64,
    /// Mean sale value, 0 without sales
    pub average_value: f64,
    /// Sum of every sales person's monthly goal
    pub team_monthly_goal: u32,
    /// This month's sales against the team goal, 0-100
    pub team_monthly_progress: f64,
}

/// Computes the dashboard figures around `today`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn kpi_metrics(
    sales: &[SaleRecord],
    people: &[SalesPerson],
    today: NaiveDate,
) -> KpiMetrics {
    let all_time: CarTypeCounts = sales.iter().collect();
    let month: CarTypeCounts = sales
        .iter()
        .filter(|sale| SalesWindow::Month.contains(sale, today))
        .collect();
    let year: CarTypeCounts = sales
        .iter()
        .filter(|sale| SalesWindow::Year.contains(sale, today))
        .collect();

    let total_value: f64 = sales.iter().map(|sale| sale.value).sum();
    let average_value = if sales.is_empty() {
        0.0
    } else {
        total_value / sales.len() as f64
    };
    let team_monthly_goal = people.iter().map(|person| person.monthly_goal).sum();

    KpiMetrics {
        all_time,
        month,
        year,
        total_value,
        average_value,
        team_monthly_goal,
        team_monthly_progress: goal_progress(month.total, team_monthly_goal),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{at, date, sale_record, sales_person};

    fn people() -> Vec<SalesPerson> {
        vec![
            sales_person("anna", "Anna"),
            sales_person("bertil", "Bertil"),
            sales_person("cecilia", "Cecilia"),
        ]
    }

    #[test]
    fn test_calendar_month_not_rolling_window() {
        let today = date(2024, 6, 15);
        let first_of_month = sale_record("anna", Some(CarBrand::Fiat), at(2024, 6, 1, 0));
        let last_of_previous = sale_record("anna", None, at(2024, 5, 31, 23));

        assert!(SalesWindow::Month.contains(&first_of_month, today));
        assert!(!SalesWindow::Month.contains(&last_of_previous, today));
        assert!(SalesWindow::Year.contains(&last_of_previous, today));
        // same month in another year
        let last_year = sale_record("anna", None, at(2023, 6, 15, 12));
        assert!(!SalesWindow::Month.contains(&last_year, today));
    }

    #[test]
    fn test_person_rollup_splits_by_type_and_window() {
        let sales = vec![
            sale_record("anna", Some(CarBrand::Renault), at(2024, 6, 2, 10)),
            sale_record("anna", None, at(2024, 6, 3, 10)),
            sale_record("anna", Some(CarBrand::Dacia), at(2024, 2, 3, 10)),
            sale_record("anna", None, at(2023, 12, 31, 10)),
            sale_record("bertil", None, at(2024, 6, 3, 10)),
        ];
        let rollup = person_rollup(&sales, "anna", date(2024, 6, 20));

        assert_eq!(rollup.month, CarTypeCounts { total: 2, new: 1, used: 1 });
        assert_eq!(rollup.year, CarTypeCounts { total: 3, new: 2, used: 1 });
    }

    #[test]
    fn test_brand_counts_ignore_used_cars() {
        let sales = vec![
            sale_record("anna", Some(CarBrand::Renault), at(2024, 6, 2, 10)),
            sale_record("anna", Some(CarBrand::Renault), at(2024, 6, 3, 10)),
            sale_record("anna", Some(CarBrand::Byd), at(2024, 6, 3, 10)),
            sale_record("anna", None, at(2024, 6, 3, 10)),
            sale_record("bertil", Some(CarBrand::Ram), at(2024, 6, 3, 10)),
        ];
        let counts = brand_counts(&sales, Some("anna"));

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].brand, CarBrand::Renault);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[0].value, 200_000.0);
        assert_eq!(counts[1].brand, CarBrand::Byd);

        let everyone = brand_counts(&sales, None);
        assert_eq!(everyone.len(), 3);
        // Byd and Ram tie on one sale; catalog order puts Byd first
        assert_eq!(everyone[1].brand, CarBrand::Byd);
        assert_eq!(everyone[2].brand, CarBrand::Ram);
    }

    #[test]
    fn test_leaderboard_orders_by_count() {
        let people = people();
        let sales = vec![
            sale_record("bertil", None, at(2024, 6, 2, 10)),
            sale_record("cecilia", None, at(2024, 6, 2, 10)),
            sale_record("cecilia", None, at(2024, 6, 3, 10)),
            sale_record("cecilia", None, at(2024, 6, 4, 10)),
            sale_record("anna", None, at(2024, 5, 4, 10)),
        ];
        let board = monthly_leaderboard(&sales, &people, date(2024, 6, 10));

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].person.id, "cecilia");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].sales_count, 3);
        assert_eq!(board[0].goal, 20);
        assert_eq!(board[0].progress, 15.0);
        assert_eq!(board[1].person.id, "bertil");
        assert!(board.windows(2).all(|pair| pair[0].sales_count >= pair[1].sales_count));
    }

    #[test]
    fn test_leaderboard_ties_break_by_id() {
        let people = vec![sales_person("zed", "Zed"), sales_person("adam", "Adam")];
        let sales = vec![
            sale_record("zed", None, at(2024, 6, 2, 10)),
            sale_record("adam", None, at(2024, 6, 2, 11)),
        ];
        let board = monthly_leaderboard(&sales, &people, date(2024, 6, 10));
        assert_eq!(board[0].person.id, "adam");
        assert_eq!(board[1].person.id, "zed");
    }

    #[test]
    fn test_yearly_leaderboard_uses_yearly_goal() {
        let people = people();
        let sales = vec![
            sale_record("anna", None, at(2024, 1, 2, 10)),
            sale_record("anna", None, at(2024, 6, 2, 10)),
            sale_record("ghost", None, at(2024, 6, 2, 10)),
        ];
        let board = yearly_leaderboard(&sales, &people, date(2024, 6, 10));

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].sales_count, 2);
        assert_eq!(board[0].goal, 240);
    }

    #[test]
    fn test_goal_progress_caps_at_100() {
        assert_eq!(goal_progress(10, 20), 50.0);
        assert_eq!(goal_progress(25, 20), 100.0);
        assert_eq!(goal_progress(5, 0), 0.0);
    }

    #[test]
    fn test_kpi_metrics() {
        let people = people();
        let mut sales = vec![
            sale_record("anna", Some(CarBrand::Jeep), at(2024, 6, 2, 10)),
            sale_record("bertil", None, at(2024, 6, 3, 10)),
            sale_record("bertil", None, at(2023, 6, 3, 10)),
        ];
        sales[1].value = 50_000.0;
        sales[2].value = 150_000.0;

        let kpi = kpi_metrics(&sales, &people, date(2024, 6, 10));
        assert_eq!(kpi.all_time, CarTypeCounts { total: 3, new: 1, used: 2 });
        assert_eq!(kpi.month.total, 2);
        assert_eq!(kpi.year.total, 2);
        assert_eq!(kpi.total_value, 300_000.0);
        assert_eq!(kpi.average_value, 100_000.0);
        assert_eq!(kpi.team_monthly_goal, 60);
        assert_eq!(kpi.team_monthly_progress, 2.0 / 60.0 * 100.0);
    }

    #[test]
    fn test_kpi_metrics_empty() {
        assert_eq!(kpi_metrics(&[], &[], date(2024, 6, 10)), KpiMetrics::default());
    }
}
