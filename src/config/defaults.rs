use super::types::{Config, PlanConfig};
use crate::billing::PlanTable;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

impl Default for Config {
    fn default() -> Self {
        Config {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            plans: PlanTable::builtin()
                .iter()
                .map(|(id, plan)| PlanConfig::from_definition(id, plan))
                .collect(),
        }
    }
}
