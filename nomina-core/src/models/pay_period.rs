use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("invalid period label '{0}', expected YYYY-MM-{{1|2|full}}")]
    Malformed(String),

    #[error("month {0} out of range 1..=12")]
    MonthOutOfRange(u32),

    #[error("year {0} must be positive")]
    YearOutOfRange(i32),
}

/// Which slice of the month a payroll run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSpan {
    FirstHalf,
    SecondHalf,
    FullMonth,
}

impl PeriodSpan {
    /// Marker used in the canonical period label.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::FirstHalf => "1",
            Self::SecondHalf => "2",
            Self::FullMonth => "full",
        }
    }

    /// Human-readable label used in reports.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::FirstHalf => "1ra Quincena",
            Self::SecondHalf => "2da Quincena",
            Self::FullMonth => "Mes Completo",
        }
    }

    pub fn parse(marker: &str) -> Option<Self> {
        match marker {
            "1" => Some(Self::FirstHalf),
            "2" => Some(Self::SecondHalf),
            "full" => Some(Self::FullMonth),
            _ => None,
        }
    }
}

/// A payroll period: year, month and half-month/full-month span.
///
/// The canonical label (`"2026-03-1"`, `"2026-03-full"`) is the key payroll
/// records are stored under, so `label()` and `FromStr` must stay inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    year: i32,
    month: u32,
    span: PeriodSpan,
}

impl PayPeriod {
    pub fn new(year: i32, month: u32, span: PeriodSpan) -> Result<Self, PeriodParseError> {
        // Zero or negative years would break the YYYY-MM label round-trip.
        if year < 1 {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month, span })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn span(&self) -> PeriodSpan {
        self.span
    }

    /// Canonical store key, `YYYY-MM-{1|2|full}`.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}-{}", self.year, self.month, self.span.marker())
    }

    /// First and last calendar day covered, both inclusive.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        // Month is validated at construction.
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month validated at construction");
        let mid_start = NaiveDate::from_ymd_opt(self.year, self.month, 16)
            .expect("month validated at construction");
        let last = self.last_day_of_month();
        match self.span {
            PeriodSpan::FirstHalf => (first, mid_start.pred_opt().unwrap_or(first)),
            PeriodSpan::SecondHalf => (mid_start, last),
            PeriodSpan::FullMonth => (first, last),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (start, end) = self.bounds();
        start <= date && date <= end
    }

    fn last_day_of_month(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("month validated at construction")
            .pred_opt()
            .expect("first of month always has a predecessor")
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PayPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let (Some(year), Some(month), Some(marker)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(PeriodParseError::Malformed(s.to_string()));
        };
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::Malformed(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::Malformed(s.to_string()))?;
        let span =
            PeriodSpan::parse(marker).ok_or_else(|| PeriodParseError::Malformed(s.to_string()))?;
        Self::new(year, month, span)
    }
}
