//! Payroll and finance calculations: fully loaded labor cost, per-employee
//! pay statements from either a fixed salary or attendance hours, and
//! cost-plus-margin quotations.

pub mod attendance_hours;
pub mod common;
pub mod labor_cost;
pub mod payroll;
pub mod quotation;

pub use attendance_hours::{REGULAR_HOURS_PER_DAY, WorkedHours};
pub use labor_cost::{LaborCostCalculator, LaborCostDetails};
pub use payroll::{PaySource, PayStatement, PayrollCalculator};
pub use quotation::{QuotationCalculator, QuotationError, QuotationInput, QuotationResult};
