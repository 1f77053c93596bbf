use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::error::PlanTableError;
use super::{PlanDefinition, TierBound, TierRate};
use crate::debug_println;

/// Built-in plan table, validated once on first use
static DEFAULT_PLAN_TABLE: Lazy<PlanTable> = Lazy::new(|| {
    PlanTable::new(PlanTable::default_plans()).expect("built-in plan table must be valid")
});

/// Immutable map from plan identifier to plan definition
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTable {
    plans: BTreeMap<u32, PlanDefinition>,
}

impl PlanTable {
    /// Build a table, rejecting duplicate ids and malformed tiers
    pub fn new<I>(plans: I) -> Result<Self, PlanTableError>
    where
        I: IntoIterator<Item = (u32, PlanDefinition)>,
    {
        let mut map = BTreeMap::new();

        for (id, plan) in plans {
            validate_plan(id, &plan)?;
            if map.insert(id, plan).is_some() {
                return Err(PlanTableError::DuplicatePlan(id));
            }
        }

        if map.is_empty() {
            return Err(PlanTableError::Empty);
        }

        debug_println!("Plan table built with {} plans", map.len());

        Ok(Self { plans: map })
    }

    /// The built-in table shared by every caller
    pub fn builtin() -> &'static PlanTable {
        &DEFAULT_PLAN_TABLE
    }

    /// Built-in plan definitions
    pub fn default_plans() -> Vec<(u32, PlanDefinition)> {
        vec![
            (
                1,
                PlanDefinition::new(
                    1950.0,
                    vec![TierRate::up_to(20.0, 730.0), TierRate::unbounded(680.0)],
                ),
            ),
            (
                3,
                PlanDefinition::new(
                    1950.0,
                    vec![TierRate::up_to(10.0, 600.0), TierRate::unbounded(500.0)],
                ),
            ),
            (4, PlanDefinition::new(1100.0, vec![TierRate::unbounded(400.0)])),
            // First 1.4 units are included in the base fee
            (
                8,
                PlanDefinition::new(
                    800.0,
                    vec![TierRate::up_to(1.4, 0.0), TierRate::unbounded(720.0)],
                ),
            ),
            (
                9,
                PlanDefinition::new(
                    1900.0,
                    vec![TierRate::up_to(5.0, 610.0), TierRate::unbounded(520.0)],
                ),
            ),
            (10, PlanDefinition::new(1600.0, vec![TierRate::unbounded(530.0)])),
        ]
    }

    pub fn get(&self, plan_id: u32) -> Option<&PlanDefinition> {
        self.plans.get(&plan_id)
    }

    pub fn contains(&self, plan_id: u32) -> bool {
        self.plans.contains_key(&plan_id)
    }

    /// Plan ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.plans.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &PlanDefinition)> {
        self.plans.iter().map(|(id, plan)| (*id, plan))
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn validate_plan(id: u32, plan: &PlanDefinition) -> Result<(), PlanTableError> {
    if !plan.base_monthly_fee.is_finite() || plan.base_monthly_fee < 0.0 {
        return Err(PlanTableError::InvalidBaseFee {
            plan: id,
            fee: plan.base_monthly_fee,
        });
    }

    if plan.tiers.is_empty() {
        return Err(PlanTableError::NoTiers(id));
    }

    let last = plan.tiers.len() - 1;
    let mut previous_ceiling = 0.0;

    for (index, tier) in plan.tiers.iter().enumerate() {
        if !tier.unit_rate.is_finite() || tier.unit_rate < 0.0 {
            return Err(PlanTableError::InvalidRate {
                plan: id,
                tier: index,
                rate: tier.unit_rate,
            });
        }

        match tier.upper_bound {
            TierBound::Bounded(ceiling) => {
                if !ceiling.is_finite() || ceiling <= previous_ceiling {
                    return Err(PlanTableError::InvalidBound {
                        plan: id,
                        tier: index,
                        bound: ceiling,
                    });
                }
                previous_ceiling = ceiling;
            }
            TierBound::Unbounded if index != last => {
                return Err(PlanTableError::UnboundedNotLast {
                    plan: id,
                    tier: index,
                });
            }
            TierBound::Unbounded => {}
        }
    }

    Ok(())
}
