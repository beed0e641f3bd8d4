//! Inclusive calendar-date ranges, the week/month presets used by the report
//! screen and the two-tap range picker over a Monday-first month grid.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` range of calendar dates. `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, swapping the bounds if they arrive reversed.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// First day, inclusive.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day, inclusive.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Monday of `today`'s week through `today`.
    #[must_use]
    pub fn current_week(today: NaiveDate) -> Self {
        let offset = u64::from(today.weekday().num_days_from_monday());
        let monday = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
        Self::new(monday, today)
    }

    /// First of `today`'s month through `today`.
    #[must_use]
    pub fn current_month(today: NaiveDate) -> Self {
        Self::new(first_of_month(today), today)
    }

    /// The whole calendar month containing `day`.
    #[must_use]
    pub fn whole_month(day: NaiveDate) -> Self {
        Self::new(first_of_month(day), last_of_month(day))
    }
}

/// First day of `day`'s month.
#[must_use]
pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Last day of `day`'s month.
#[must_use]
pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(day)
}

/// Cells of a Monday-first calendar page: leading `None`s pad the first week,
/// followed by every day of the month.
#[must_use]
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let padding = first.weekday().num_days_from_monday() as usize;

    std::iter::repeat_n(None, padding)
        .chain(
            first
                .iter_days()
                .take_while(|day| day.month() == month)
                .map(Some),
        )
        .collect()
}

/// How a calendar cell renders relative to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellMark {
    /// The selected start day
    Start,
    /// The selected end day
    End,
    /// Strictly between start and end
    InRange,
    /// Not selected
    Outside,
}

/// Two-tap range picker: taps alternate between setting the start and the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeSelection {
    start: NaiveDate,
    end: NaiveDate,
    selecting_start: bool,
}

impl RangeSelection {
    /// Starts from `initial`, waiting for a new start date.
    #[must_use]
    pub const fn new(initial: DateRange) -> Self {
        Self {
            start: initial.start,
            end: initial.end,
            selecting_start: true,
        }
    }

    /// Applies a tap to the start or the end, then flips which one the next
    /// tap sets.
    pub fn select(&mut self, date: NaiveDate) {
        if self.selecting_start {
            self.start = date;
        } else {
            self.end = date;
        }
        self.selecting_start = !self.selecting_start;
    }

    /// Whether the next tap sets the start.
    #[must_use]
    pub const fn is_selecting_start(&self) -> bool {
        self.selecting_start
    }

    /// How the cell for `date` renders.
    #[must_use]
    pub fn mark(&self, date: NaiveDate) -> CellMark {
        if date == self.start {
            CellMark::Start
        } else if date == self.end {
            CellMark::End
        } else if self.start <= date && date <= self.end {
            CellMark::InRange
        } else {
            CellMark::Outside
        }
    }

    /// The saved range, with reversed taps put back in order.
    #[must_use]
    pub fn finish(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}
