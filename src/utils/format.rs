use crate::billing::{PlanDefinition, TierBound};

/// Format an amount in the smallest currency unit, e.g. `¥20872`
pub fn format_currency(symbol: &str, amount: i64) -> String {
    if amount < 0 {
        format!("-{}{}", symbol, amount.unsigned_abs())
    } else {
        format!("{}{}", symbol, amount)
    }
}

/// Format a usage quantity without trailing zeros
pub fn format_units(units: f64) -> String {
    if units.fract() == 0.0 {
        format!("{:.0}", units)
    } else {
        let formatted = format!("{:.4}", units);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// One-line summary of a plan, e.g. `¥1950/month; up to 20 @ ¥730, above @ ¥680`
pub fn describe_plan(symbol: &str, plan: &PlanDefinition) -> String {
    let tiers: Vec<String> = match plan.tiers.as_slice() {
        [only] if only.upper_bound.is_unbounded() => {
            vec![format!("all @ {}{}", symbol, format_units(only.unit_rate))]
        }
        tiers => tiers
            .iter()
            .map(|tier| match tier.upper_bound {
                TierBound::Bounded(ceiling) => format!(
                    "up to {} @ {}{}",
                    format_units(ceiling),
                    symbol,
                    format_units(tier.unit_rate)
                ),
                TierBound::Unbounded => {
                    format!("above @ {}{}", symbol, format_units(tier.unit_rate))
                }
            })
            .collect(),
    };

    format!(
        "{}{}/month; {}",
        symbol,
        format_units(plan.base_monthly_fee),
        tiers.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::PlanTable;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("¥", 20872), "¥20872");
        assert_eq!(format_currency("$", 0), "$0");
        assert_eq!(format_currency("¥", -15), "-¥15");
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(20.0), "20");
        assert_eq!(format_units(1.4), "1.4");
        assert_eq!(format_units(0.125), "0.125");
        assert_eq!(format_units(2.5), "2.5");
    }

    #[test]
    fn test_describe_plan() {
        let table = PlanTable::builtin();
        assert_eq!(
            describe_plan("¥", table.get(1).unwrap()),
            "¥1950/month; up to 20 @ ¥730, above @ ¥680"
        );
        assert_eq!(
            describe_plan("¥", table.get(4).unwrap()),
            "¥1100/month; all @ ¥400"
        );
        assert_eq!(
            describe_plan("$", table.get(8).unwrap()),
            "$800/month; up to 1.4 @ $0, above @ $720"
        );
    }
}
