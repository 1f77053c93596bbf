use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tierbill")]
#[command(version, about = "Tiered utility bill calculator")]
pub struct Cli {
    /// Plan number
    #[arg(short = 'p', long = "plan")]
    pub plan: Option<String>,

    /// Usage amount for the billing period
    #[arg(short = 'u', long = "usage", allow_hyphen_values = true)]
    pub usage: Option<String>,

    /// Number of days billed
    #[arg(short = 'd', long = "days", allow_hyphen_values = true)]
    pub days: Option<String>,

    /// Print the bill as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Show how usage was split across tiers
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// List the available plans
    #[arg(long = "list-plans")]
    pub list_plans: bool,

    /// Open the interactive bill form
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Config file to use instead of ~/.tierbill/config.toml
    #[arg(long = "config-file", value_name = "PATH", env = "TIERBILL_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
