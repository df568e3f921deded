use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportingMonthError {
    #[error("expected a YYYY-MM month, got '{0}'")]
    Format(String),

    #[error("month out of range: {year}-{month:02}")]
    OutOfRange { year: i32, month: u32 },
}

/// One calendar month, the period over which sales are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    pub fn new(
        year: i32,
        month: u32,
    ) -> Result<Self, ReportingMonthError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or(ReportingMonthError::OutOfRange { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Range was checked on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}

impl FromStr for ReportingMonth {
    type Err = ReportingMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| ReportingMonthError::Format(s.to_string()))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(ReportingMonthError::Format(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| ReportingMonthError::Format(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ReportingMonthError::Format(s.to_string()))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for ReportingMonth {
    type Error = ReportingMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportingMonth> for String {
    fn from(month: ReportingMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
