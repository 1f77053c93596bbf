pub mod calculator;
pub mod error;
pub mod pricing;
pub mod types;

pub use calculator::{compute_bill, compute_bill_detailed};
pub use error::{BillingError, PlanTableError};
pub use pricing::PlanTable;
pub use types::{BillBreakdown, DetailedBill, PlanDefinition, TierBound, TierCharge, TierRate};
