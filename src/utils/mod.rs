pub mod debug;
pub mod format;

pub use format::{describe_plan, format_currency, format_units};
