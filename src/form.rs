use crate::billing::calculator::{allocate_usage, prorated_base_fee, TAX_RATE};
use crate::billing::{BillBreakdown, BillingError, PlanTable};
use crate::utils::format_currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when usage or days cannot be used
pub const INVALID_INPUT_MESSAGE: &str = "Enter a valid usage amount and number of days";

/// Raw totals at or above this no longer fit the integer breakdown
const MAX_RAW_TOTAL: f64 = i64::MAX as f64;

/// Rejected form input; no calculation is attempted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInput,

    #[error("Invalid plan number: {0:?}")]
    InvalidPlan(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Billing(#[from] BillingError),
}

/// Raw text fields as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillForm {
    pub plan: String,
    pub usage: String,
    pub days: String,
}

/// Validated calculation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillRequest {
    pub plan_id: u32,
    pub usage: f64,
    pub days: u32,
}

/// The five output lines of a bill
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBill {
    pub base_fee: String,
    pub usage_fee: String,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl BillForm {
    pub fn new(plan: impl Into<String>, usage: impl Into<String>, days: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            usage: usage.into(),
            days: days.into(),
        }
    }

    /// Parse and validate all three fields
    pub fn parse(&self) -> Result<BillRequest, InputError> {
        let plan_text = self.plan.trim();
        let plan_id = plan_text
            .parse::<u32>()
            .map_err(|_| InputError::InvalidPlan(plan_text.to_string()))?;

        let usage = self
            .usage
            .trim()
            .parse::<f64>()
            .map_err(|_| InputError::InvalidInput)?;
        if !usage.is_finite() || usage < 0.0 {
            return Err(InputError::InvalidInput);
        }

        let days = self
            .days
            .trim()
            .parse::<u32>()
            .map_err(|_| InputError::InvalidInput)?;
        if days == 0 {
            return Err(InputError::InvalidInput);
        }

        Ok(BillRequest {
            plan_id,
            usage,
            days,
        })
    }

    /// Parse against `table`: the plan must exist and the bill must fit in `i64`
    pub fn request(&self, table: &PlanTable) -> Result<BillRequest, FormError> {
        let request = self.parse()?;
        let plan = table
            .get(request.plan_id)
            .ok_or(BillingError::UnknownPlan(request.plan_id))?;

        let subtotal = prorated_base_fee(plan, request.days) + allocate_usage(plan, request.usage).0;
        let total = subtotal + (subtotal * TAX_RATE).floor();
        if !total.is_finite() || total >= MAX_RAW_TOTAL {
            return Err(InputError::InvalidInput.into());
        }

        Ok(request)
    }

    /// Validate, compute and format in one step
    pub fn submit(&self, table: &PlanTable, currency_symbol: &str) -> Result<RenderedBill, FormError> {
        let request = self.request(table)?;
        let breakdown = table.compute_bill(request.plan_id, request.usage, request.days)?;
        Ok(RenderedBill::new(&breakdown, currency_symbol))
    }
}

impl RenderedBill {
    pub fn new(breakdown: &BillBreakdown, currency_symbol: &str) -> Self {
        let line = |label: &str, amount: i64| {
            format!("{} = {}", label, format_currency(currency_symbol, amount))
        };

        Self {
            base_fee: line("Base fee", breakdown.base_fee),
            usage_fee: line("Usage fee", breakdown.usage_fee),
            subtotal: line("Subtotal", breakdown.subtotal),
            tax: line("Tax", breakdown.tax),
            total: line("Total", breakdown.total),
        }
    }

    /// Lines in display order
    pub fn lines(&self) -> [&str; 5] {
        [
            self.base_fee.as_str(),
            self.usage_fee.as_str(),
            self.subtotal.as_str(),
            self.tax.as_str(),
            self.total.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_form() {
        let request = BillForm::new("1", " 25 ", "15").parse().unwrap();
        assert_eq!(
            request,
            BillRequest {
                plan_id: 1,
                usage: 25.0,
                days: 15,
            }
        );

        let fractional = BillForm::new("8", "1.4", "30").parse().unwrap();
        assert_eq!(fractional.usage, 1.4);
    }

    #[test]
    fn test_zero_usage_is_valid() {
        assert!(BillForm::new("4", "0", "1").parse().is_ok());
    }

    #[test]
    fn test_rejects_bad_usage() {
        for usage in ["", "abc", "-1", "-0.5", "NaN", "inf"] {
            let result = BillForm::new("1", usage, "30").parse();
            assert_eq!(result, Err(InputError::InvalidInput), "usage {:?}", usage);
        }
    }

    #[test]
    fn test_rejects_bad_days() {
        for days in ["", "0", "-3", "2.5", "ten"] {
            let result = BillForm::new("1", "10", days).parse();
            assert_eq!(result, Err(InputError::InvalidInput), "days {:?}", days);
        }
    }

    #[test]
    fn test_rejects_bad_plan() {
        let result = BillForm::new("one", "10", "30").parse();
        assert_eq!(result, Err(InputError::InvalidPlan("one".to_string())));
    }

    #[test]
    fn test_submit_renders_five_lines() {
        let rendered = BillForm::new("1", "25", "15")
            .submit(PlanTable::builtin(), "¥")
            .unwrap();

        assert_eq!(
            rendered.lines(),
            [
                "Base fee = ¥975",
                "Usage fee = ¥18000",
                "Subtotal = ¥18975",
                "Tax = ¥1897",
                "Total = ¥20872",
            ]
        );
    }

    #[test]
    fn test_submit_unknown_plan() {
        let result = BillForm::new("99", "10", "30").submit(PlanTable::builtin(), "¥");
        assert_eq!(result, Err(FormError::Billing(BillingError::UnknownPlan(99))));
    }

    #[test]
    fn test_invalid_input_message() {
        assert_eq!(InputError::InvalidInput.to_string(), INVALID_INPUT_MESSAGE);
        let err = BillForm::new("1", "x", "1").submit(PlanTable::builtin(), "¥").unwrap_err();
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);
    }

    #[test]
    fn test_rejects_usage_beyond_integer_range() {
        for usage in ["1e300", "1e17"] {
            let result = BillForm::new("4", usage, "30").submit(PlanTable::builtin(), "¥");
            assert_eq!(
                result,
                Err(FormError::Input(InputError::InvalidInput)),
                "usage {:?}",
                usage
            );
        }

        // 1e16 units at 400 is 4.4e18 with tax, still below i64::MAX
        let request = BillForm::new("4", "1e16", "30")
            .request(PlanTable::builtin())
            .unwrap();
        assert_eq!(request.usage, 1e16);
    }

    #[test]
    fn test_request_checks_plan() {
        let result = BillForm::new("2", "10", "30").request(PlanTable::builtin());
        assert_eq!(result, Err(FormError::Billing(BillingError::UnknownPlan(2))));
    }
}
