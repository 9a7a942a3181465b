//! Month grid for the upcoming view

use chrono::{Datelike, Months, NaiveDate};

/// Days of one month laid out for a Sunday-first calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the month
    pub first: NaiveDate,
    /// Empty cells before the 1st (0 when the month starts on Sunday)
    pub leading_blanks: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Grid for the month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        let days = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .collect();
        Self {
            first,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        }
    }

    /// e.g. "January 2024"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn prev(&self) -> NaiveDate {
        self.first
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.first)
    }

    pub fn next(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .unwrap_or(self.first)
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse a `YYYY-MM` month selector into the first day of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d").ok()
}

/// `YYYY-MM`
pub fn format_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
