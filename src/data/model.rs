use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::impute::{self, Strategy};

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// A single yearly observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Start of the reporting period (January 1st for yearly data).
    pub period: NaiveDate,
    /// Unemployment rate in percent; `None` when the source cell was empty.
    pub rate: Option<f64>,
}

impl Observation {
    pub fn new(period: NaiveDate, rate: Option<f64>) -> Self {
        Self { period, rate }
    }
}

// ---------------------------------------------------------------------------
// DateRange – inclusive [start, end]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp both ends into `bounds`.
    pub fn clamped_to(&self, bounds: &DateRange) -> Self {
        Self {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Continuous x coordinate for a date: the year plus the elapsed fraction.
pub fn period_to_x(date: NaiveDate) -> f64 {
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed table, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Observation>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest period, or `None` for an empty table.
    pub fn span(&self) -> Option<DateRange> {
        let start = self.rows.iter().map(|r| r.period).min()?;
        let end = self.rows.iter().map(|r| r.period).max()?;
        Some(DateRange::new(start, end))
    }

    /// The rate column.
    pub fn rates(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.rate).collect()
    }

    pub fn missing_count(&self) -> usize {
        self.rows.iter().filter(|r| r.rate.is_none()).count()
    }

    /// Copy of the table with `strategy` applied to the rate column.
    ///
    /// `DropMissing` removes whole rows so periods stay aligned with rates.
    pub fn imputed(&self, strategy: Strategy) -> Dataset {
        if strategy == Strategy::DropMissing {
            return Dataset::from_rows(
                self.rows.iter().filter(|r| r.rate.is_some()).copied().collect(),
            );
        }
        let rates = impute::apply(strategy, &self.rates());
        let rows = self
            .rows
            .iter()
            .zip(rates)
            .map(|(row, rate)| Observation::new(row.period, rate))
            .collect();
        Dataset::from_rows(rows)
    }
}
