use thiserror::Error;

/// Failure while computing a bill
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillingError {
    #[error("Unknown plan: {0}")]
    UnknownPlan(u32),
}

/// A plan table that cannot be used for billing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanTableError {
    #[error("Plan table has no plans")]
    Empty,

    #[error("Plan {0} is defined more than once")]
    DuplicatePlan(u32),

    #[error("Plan {0} has no tiers")]
    NoTiers(u32),

    #[error("Plan {plan}: base fee must be a finite, non-negative amount (got {fee})")]
    InvalidBaseFee { plan: u32, fee: f64 },

    #[error("Plan {plan} tier {tier}: rate must be a finite, non-negative amount (got {rate})")]
    InvalidRate { plan: u32, tier: usize, rate: f64 },

    #[error("Plan {plan} tier {tier}: upper bound must be finite and above the previous tier (got {bound})")]
    InvalidBound { plan: u32, tier: usize, bound: f64 },

    #[error("Plan {plan} tier {tier}: only the last tier may be unbounded")]
    UnboundedNotLast { plan: u32, tier: usize },
}
