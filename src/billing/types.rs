use serde::{Deserialize, Serialize};

/// Upper limit of a tier, as a cumulative usage ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierBound {
    Bounded(f64),
    Unbounded,
}

impl TierBound {
    /// Width still available in this tier once `consumed` units went to earlier tiers
    pub fn width_after(&self, consumed: f64) -> Option<f64> {
        match self {
            TierBound::Bounded(ceiling) => Some(ceiling - consumed),
            TierBound::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, TierBound::Unbounded)
    }
}

/// A usage band billed at a single unit rate
#[derive(Debug, Clone, PartialEq)]
pub struct TierRate {
    pub upper_bound: TierBound,
    pub unit_rate: f64,
}

impl TierRate {
    pub fn up_to(ceiling: f64, unit_rate: f64) -> Self {
        Self {
            upper_bound: TierBound::Bounded(ceiling),
            unit_rate,
        }
    }

    pub fn unbounded(unit_rate: f64) -> Self {
        Self {
            upper_bound: TierBound::Unbounded,
            unit_rate,
        }
    }
}

/// Base fee plus the ordered tiers of a plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDefinition {
    pub base_monthly_fee: f64,
    pub tiers: Vec<TierRate>,
}

impl PlanDefinition {
    pub fn new(base_monthly_fee: f64, tiers: Vec<TierRate>) -> Self {
        Self {
            base_monthly_fee,
            tiers,
        }
    }
}

/// Bill amounts in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillBreakdown {
    pub base_fee: i64,
    pub usage_fee: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
}

/// Units allocated to one tier during a calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCharge {
    pub tier: usize,
    pub units: f64,
    pub unit_rate: f64,
    pub charge: f64,
}

/// Breakdown together with the per-tier allocation that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedBill {
    pub plan_id: u32,
    pub breakdown: BillBreakdown,
    pub tier_charges: Vec<TierCharge>,
}
