//! Worked-hours tally over attendance check-in/check-out records.
//!
//! Hours within a pay period are split into regular time (capped at
//! [`REGULAR_HOURS_PER_DAY`] per shift) and overtime. Records without a
//! check-out, outside the period window, or with a non-positive duration
//! are ignored.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{AttendanceRecord, PayPeriod};

pub const REGULAR_HOURS_PER_DAY: Decimal = dec!(8);

/// Regular and overtime hours accumulated over a pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkedHours {
    pub regular: Decimal,
    pub overtime: Decimal,
}

impl WorkedHours {
    /// Tallies the hours one employee worked during `period`.
    ///
    /// A record belongs to the period when its check-in date falls inside
    /// the period bounds. Hours per shift beyond the daily cap count as
    /// overtime.
    pub fn tally(records: &[AttendanceRecord], employee_id: &str, period: &PayPeriod) -> Self {
        let mut tally = Self::default();
        for record in records {
            if record.employee_id != employee_id {
                continue;
            }
            let Some(check_out) = record.check_out else {
                continue;
            };
            if !period.contains(record.check_in.date_naive()) {
                continue;
            }
            let minutes = (check_out - record.check_in).num_minutes();
            if minutes <= 0 {
                continue;
            }
            let hours = Decimal::from(minutes) / dec!(60);
            let regular = hours.min(REGULAR_HOURS_PER_DAY);
            tally.regular += regular;
            tally.overtime += hours - regular;
        }
        tally
    }

    pub fn total(&self) -> Decimal {
        self.regular + self.overtime
    }

    /// Equivalent days worked at the regular daily cap.
    pub fn days_worked(&self) -> Decimal {
        self.regular / REGULAR_HOURS_PER_DAY
    }
}
