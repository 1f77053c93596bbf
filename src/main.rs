use tierbill::billing::{compute_bill_detailed, BillingError, DetailedBill, PlanTable};
use tierbill::cli::Cli;
use tierbill::config::{Config, ConfigLoader};
use tierbill::form::{BillForm, FormError, RenderedBill};
use tierbill::utils::{describe_plan, format_units};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        let config_path = cli
            .config_file
            .clone()
            .unwrap_or_else(Config::get_config_path);
        if Config::init_at(&config_path)? {
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config_file.as_deref())?;

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    let table = config.plan_table()?;

    if cli.list_plans {
        print_plans(&table, &config.currency_symbol);
        return Ok(());
    }

    if cli.interactive {
        #[cfg(feature = "tui")]
        {
            tierbill::ui::run_bill_form(table, config.currency_symbol)?;
        }
        #[cfg(not(feature = "tui"))]
        {
            eprintln!("TUI feature is not enabled. Please install with --features tui");
            std::process::exit(1);
        }
        return Ok(());
    }

    let (Some(plan), Some(usage), Some(days)) = (cli.plan, cli.usage, cli.days) else {
        eprintln!("Error: --plan, --usage and --days are required");
        eprintln!("Run with --help for usage, or --interactive for the bill form");
        std::process::exit(1);
    };

    let request = match BillForm::new(plan, usage, days).request(&table) {
        Ok(request) => request,
        Err(e @ FormError::Billing(BillingError::UnknownPlan(_))) => {
            eprintln!("Error: {}", e);
            let ids: Vec<String> = table.ids().map(|id| id.to_string()).collect();
            eprintln!("Available plans: {}", ids.join(", "));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let bill = compute_bill_detailed(&table, request.plan_id, request.usage, request.days)?;

    if cli.json {
        let json = if cli.verbose {
            serde_json::to_string_pretty(&bill)?
        } else {
            serde_json::to_string_pretty(&bill.breakdown)?
        };
        println!("{}", json);
        return Ok(());
    }

    if cli.verbose {
        print_tier_charges(&bill, &config.currency_symbol);
    }

    for line in RenderedBill::new(&bill.breakdown, &config.currency_symbol).lines() {
        println!("{}", line);
    }

    Ok(())
}

fn print_plans(table: &PlanTable, currency_symbol: &str) {
    for (id, plan) in table.iter() {
        println!("Plan {:>3}: {}", id, describe_plan(currency_symbol, plan));
    }
}

fn print_tier_charges(bill: &DetailedBill, currency_symbol: &str) {
    println!("Plan {}", bill.plan_id);
    for charge in &bill.tier_charges {
        println!(
            "  Tier {}: {} × {}{} = {}{}",
            charge.tier + 1,
            format_units(charge.units),
            currency_symbol,
            format_units(charge.unit_rate),
            currency_symbol,
            format_units(charge.charge)
        );
    }
    println!();
}
