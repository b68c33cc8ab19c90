use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::document_number::NumberSeries;

/// An Indian fiscal year, 1 April to 31 March.
///
/// Identified by the calendar year it starts in: `FiscalYear(2025)` is
/// FY 2025-26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalYear(pub i32);

impl FiscalYear {
    pub fn starting(year: i32) -> Self {
        Self(year)
    }

    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            Self(date.year())
        } else {
            Self(date.year() - 1)
        }
    }

    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 4, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0 + 1, 3, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// Two-digit start and end years, e.g. `2526` for FY 2025-26.
    pub fn code(&self) -> String {
        format!(
            "{:02}{:02}",
            self.0.rem_euclid(100),
            (self.0 + 1).rem_euclid(100)
        )
    }

    /// Label as shown in period pickers, e.g. `FY 2025-2026`.
    pub fn label(&self) -> String {
        format!("FY {}-{}", self.0, self.0 + 1)
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl NumberSeries {
    /// Series whose prefix is `stem` followed by the fiscal-year code,
    /// e.g. stem `TE` in FY 2025-26 gives prefix `TE2526`.
    pub fn for_fiscal_year(stem: &str, year: FiscalYear, width: usize) -> Self {
        Self::new(format!("{}{}", stem, year.code()), width)
    }
}
