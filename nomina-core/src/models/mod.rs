mod attendance;
mod employee;
mod pay_period;
mod payroll_record;
mod rates_config;

pub use attendance::AttendanceRecord;
pub use employee::Employee;
pub use pay_period::{PayPeriod, PeriodParseError, PeriodSpan};
pub use payroll_record::{DetailKind, PayrollDetail, PayrollRecord, PayrollStatus};
pub use rates_config::{
    BenefitRates, DEFAULT_MONTHLY_HOURS, DEFAULT_OVERTIME_FACTOR, EmployeeRates, OvertimeRate,
    RatesConfig, RatesConfigError, SocialSecurityRates,
};
