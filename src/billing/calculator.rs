use crate::billing::error::BillingError;
use crate::billing::{BillBreakdown, DetailedBill, PlanDefinition, PlanTable, TierCharge};
use crate::debug_println;

/// Base fees are prorated against a fixed 30-day month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Consumption tax applied to the subtotal
pub const TAX_RATE: f64 = 0.10;

/// Compute the bill for `usage` units over `days` days on `plan_id`
///
/// Usage and days are not validated here; callers that take user input go
/// through [`crate::form::BillForm`] first.
pub fn compute_bill(
    table: &PlanTable,
    plan_id: u32,
    usage: f64,
    days: u32,
) -> Result<BillBreakdown, BillingError> {
    compute_bill_detailed(table, plan_id, usage, days).map(|bill| bill.breakdown)
}

/// Same as [`compute_bill`], keeping the per-tier allocation
pub fn compute_bill_detailed(
    table: &PlanTable,
    plan_id: u32,
    usage: f64,
    days: u32,
) -> Result<DetailedBill, BillingError> {
    let plan = table
        .get(plan_id)
        .ok_or(BillingError::UnknownPlan(plan_id))?;

    let base_fee_raw = prorated_base_fee(plan, days);
    let (usage_fee_raw, tier_charges) = allocate_usage(plan, usage);

    let subtotal_raw = base_fee_raw + usage_fee_raw;
    let tax = (subtotal_raw * TAX_RATE).floor();
    // Floor after adding tax, not floor(subtotal) + tax
    let total = (subtotal_raw + tax).floor();

    debug_println!(
        "Plan {}: base {} + usage {} = subtotal {}, tax {}, total {}",
        plan_id,
        base_fee_raw,
        usage_fee_raw,
        subtotal_raw,
        tax,
        total
    );

    Ok(DetailedBill {
        plan_id,
        breakdown: BillBreakdown {
            base_fee: base_fee_raw.round() as i64,
            usage_fee: usage_fee_raw.floor() as i64,
            subtotal: subtotal_raw.floor() as i64,
            tax: tax as i64,
            total: total as i64,
        },
        tier_charges,
    })
}

/// Monthly base fee scaled to the billed days
pub fn prorated_base_fee(plan: &PlanDefinition, days: u32) -> f64 {
    let daily_base = plan.base_monthly_fee / DAYS_PER_MONTH;
    daily_base * days as f64
}

/// Walk the tiers in order and return the raw usage fee with its line items
pub fn allocate_usage(plan: &PlanDefinition, usage: f64) -> (f64, Vec<TierCharge>) {
    let mut usage_fee = 0.0;
    let mut remaining = usage;
    let mut consumed = 0.0;
    let mut charges = Vec::new();

    for (index, tier) in plan.tiers.iter().enumerate() {
        if remaining > 0.0 {
            let tier_usage = match tier.upper_bound.width_after(consumed) {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            let charge = tier_usage * tier.unit_rate;

            usage_fee += charge;
            remaining -= tier_usage;
            consumed += tier_usage;

            charges.push(TierCharge {
                tier: index,
                units: tier_usage,
                unit_rate: tier.unit_rate,
                charge,
            });
        } else {
            break;
        }
    }

    if remaining > 0.0 {
        debug_println!("{} units exceed the last tier and were not billed", remaining);
    }

    (usage_fee, charges)
}

impl PlanTable {
    pub fn compute_bill(
        &self,
        plan_id: u32,
        usage: f64,
        days: u32,
    ) -> Result<BillBreakdown, BillingError> {
        compute_bill(self, plan_id, usage, days)
    }
}
