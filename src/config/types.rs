use crate::billing::{PlanDefinition, PlanTable, PlanTableError, TierBound, TierRate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::DEFAULT_CURRENCY_SYMBOL;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Replaces the built-in plan table when non-empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<PlanConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub id: u32,
    pub base_monthly_fee: f64,
    pub tiers: Vec<TierConfig>,
}

/// One tier; a missing `up_to` means unbounded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,
    pub rate: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file is corrupted: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid plan table: {0}")]
    InvalidPlans(#[from] PlanTableError),
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Config {
    /// Build the plan table this configuration describes
    pub fn plan_table(&self) -> Result<PlanTable, PlanTableError> {
        if self.plans.is_empty() {
            return Ok(PlanTable::builtin().clone());
        }

        PlanTable::new(self.plans.iter().map(|plan| (plan.id, plan.to_definition())))
    }
}

impl PlanConfig {
    pub fn from_definition(id: u32, plan: &PlanDefinition) -> Self {
        Self {
            id,
            base_monthly_fee: plan.base_monthly_fee,
            tiers: plan
                .tiers
                .iter()
                .map(|tier| TierConfig {
                    up_to: match tier.upper_bound {
                        TierBound::Bounded(ceiling) => Some(ceiling),
                        TierBound::Unbounded => None,
                    },
                    rate: tier.unit_rate,
                })
                .collect(),
        }
    }

    pub fn to_definition(&self) -> PlanDefinition {
        PlanDefinition::new(
            self.base_monthly_fee,
            self.tiers
                .iter()
                .map(|tier| match tier.up_to {
                    Some(ceiling) => TierRate::up_to(ceiling, tier.rate),
                    None => TierRate::unbounded(tier.rate),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plans_fall_back_to_builtin() {
        let config = Config {
            currency_symbol: "$".to_string(),
            plans: Vec::new(),
        };
        assert_eq!(&config.plan_table().unwrap(), PlanTable::builtin());
    }

    #[test]
    fn test_plan_config_conversion() {
        let plan = PlanTable::builtin().get(1).unwrap();
        let config = PlanConfig::from_definition(1, plan);

        assert_eq!(config.tiers[0].up_to, Some(20.0));
        assert_eq!(config.tiers[1].up_to, None);
        assert_eq!(&config.to_definition(), plan);
    }

    #[test]
    fn test_invalid_plans_surface_table_error() {
        let config = Config {
            currency_symbol: "¥".to_string(),
            plans: vec![PlanConfig {
                id: 3,
                base_monthly_fee: 100.0,
                tiers: Vec::new(),
            }],
        };
        assert_eq!(config.plan_table(), Err(PlanTableError::NoTiers(3)));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [[plans]]
            id = 2
            base_monthly_fee = 500.0
            tiers = [{ up_to = 3.0, rate = 0.0 }, { rate = 100.0 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
        let table = config.plan_table().unwrap();
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![2]);
        assert_eq!(table.compute_bill(2, 4.0, 30).unwrap().usage_fee, 100);
    }
}
