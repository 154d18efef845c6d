use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use nomina_cli::RosterLoader;
use nomina_core::calculations::{
    LaborCostCalculator, PaySource, PayrollCalculator, QuotationCalculator, QuotationInput,
};
use nomina_core::models::{PayPeriod, PeriodSpan};
use nomina_core::store::{PayrollStore, StoreConfig, StoreRegistry};
use nomina_core::{GenerateOutcome, PayrollGenerator};
use nomina_store_json::JsonStoreFactory;

/// Payroll and labor-cost toolkit for small Colombian businesses.
#[derive(Parser, Debug)]
#[command(name = "nomina")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Tenant data directory holding the JSON collections
    #[arg(long, global = true, default_value = "./data")]
    data_dir: PathBuf,

    /// Store backend to use
    #[arg(long, global = true, default_value = "json")]
    backend: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an employee roster from a CSV file
    ImportRoster {
        /// Path to the roster CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the fully loaded cost of one employee-month
    LaborCost {
        /// Monthly base salary in pesos
        #[arg(short, long)]
        salary: Decimal,
    },

    /// Price a job from labor hours, materials and a desired margin
    Quote {
        /// Estimated labor hours
        #[arg(long)]
        hours: Decimal,

        /// Hourly cost to use directly
        #[arg(long, conflicts_with = "salary")]
        hourly_cost: Option<Decimal>,

        /// Derive the hourly cost from this monthly salary instead
        #[arg(long)]
        salary: Option<Decimal>,

        /// Material costs in pesos
        #[arg(long, default_value = "0")]
        materials: Decimal,

        /// Desired margin as a percentage of the sell price
        #[arg(long)]
        margin: Decimal,
    },

    /// Generate draft payroll records for a pay period
    Generate {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        /// Period span: 1, 2 or full
        #[arg(long, default_value = "full")]
        period: String,

        /// Restrict generation to one employee id
        #[arg(long)]
        employee: Option<String>,
    },

    /// Preview pay statements for a period without persisting anything
    Report {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,

        /// Period span: 1, 2 or full
        #[arg(long, default_value = "full")]
        period: String,

        /// Whether pay comes from the fixed salary or attendance hours
        #[arg(long, value_enum, default_value_t = ReportSource::Salary)]
        source: ReportSource,
    },

    /// Print the tenant rate configuration
    ShowConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ReportSource {
    Salary,
    Attendance,
}

fn parse_period(year: i32, month: u32, marker: &str) -> Result<PayPeriod> {
    let span = PeriodSpan::parse(marker)
        .with_context(|| format!("invalid period span '{marker}' (expected 1, 2 or full)"))?;
    PayPeriod::new(year, month, span).context("invalid pay period")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut registry = StoreRegistry::new();
    registry.register(Box::new(JsonStoreFactory));
    let store_config = StoreConfig {
        backend: cli.backend.clone(),
        data_dir: cli.data_dir.display().to_string(),
    };
    let store = registry
        .create(&store_config)
        .await
        .with_context(|| format!("failed to open '{}' store", cli.backend))?;

    match cli.command {
        Command::ImportRoster { file } => import_roster(store.as_ref(), &file).await,
        Command::LaborCost { salary } => labor_cost(store.as_ref(), salary).await,
        Command::Quote {
            hours,
            hourly_cost,
            salary,
            materials,
            margin,
        } => quote(store.as_ref(), hours, hourly_cost, salary, materials, margin).await,
        Command::Generate {
            year,
            month,
            period,
            employee,
        } => generate(store.as_ref(), year, month, &period, employee).await,
        Command::Report {
            year,
            month,
            period,
            source,
        } => report(store.as_ref(), year, month, &period, source).await,
        Command::ShowConfig => show_config(store.as_ref()).await,
    }
}

async fn import_roster(store: &dyn PayrollStore, file: &PathBuf) -> Result<()> {
    println!("Loading roster from: {}", file.display());

    let csv = File::open(file).with_context(|| format!("failed to open: {}", file.display()))?;
    let records = RosterLoader::parse(csv)
        .with_context(|| format!("failed to parse CSV: {}", file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let written = RosterLoader::load(store, &records).await;

    println!(
        "Successfully imported {written} of {} employees.",
        records.len()
    );
    Ok(())
}

async fn labor_cost(store: &dyn PayrollStore, salary: Decimal) -> Result<()> {
    let config = store.load_rates().await?;
    let details = LaborCostCalculator::new(&config).calculate(salary);

    println!("Labor cost for base salary {}", details.base_salary);
    println!("  Social security: {}", details.social_security);
    println!("  Benefits:        {}", details.benefits);
    println!("  Total cost:      {}", details.total_cost);
    println!(
        "  Hourly cost:     {} ({} hours/month)",
        details.hourly_cost.round_dp(2),
        config.monthly_hours
    );
    Ok(())
}

async fn quote(
    store: &dyn PayrollStore,
    hours: Decimal,
    hourly_cost: Option<Decimal>,
    salary: Option<Decimal>,
    materials: Decimal,
    margin: Decimal,
) -> Result<()> {
    let config = store.load_rates().await?;

    // clap rejects passing both flags at parse time.
    let base_hourly_cost = match (hourly_cost, salary) {
        (Some(hourly), None) => hourly,
        (None, Some(salary)) => {
            LaborCostCalculator::new(&config)
                .calculate(salary)
                .hourly_cost
        }
        (None, None) => bail!("either --hourly-cost or --salary is required"),
        (Some(_), Some(_)) => bail!("--hourly-cost conflicts with --salary"),
    };

    let input = QuotationInput {
        hours,
        base_hourly_cost,
        material_costs: materials,
        desired_margin: margin,
    };
    let result = QuotationCalculator::new(&config).calculate(&input)?;

    println!("Quotation at {}% margin", result.margin_percentage);
    println!(
        "  Direct labor:  {} ({} h x {})",
        result.direct_labor_cost,
        hours,
        base_hourly_cost.round_dp(2)
    );
    println!("  Materials:     {}", result.material_costs);
    println!(
        "  Overhead:      {} ({}%)",
        result.overhead_amount, config.overhead_percent
    );
    println!("  Total cost:    {}", result.total_cost);
    println!("  Sell price:    {}", result.sell_price.round_dp(2));
    println!("  Profit:        {}", result.profit.round_dp(2));
    Ok(())
}

async fn generate(
    store: &dyn PayrollStore,
    year: i32,
    month: u32,
    marker: &str,
    employee: Option<String>,
) -> Result<()> {
    let period = parse_period(year, month, marker)?;
    let config = store.load_rates().await?;
    let generator = PayrollGenerator::new(store, &config);

    match employee {
        Some(id) => {
            let outcome = generator.generate(&id, &period).await?;
            match outcome {
                GenerateOutcome::Generated(record) => {
                    println!(
                        "Generated payroll {} for employee {}: net {}",
                        record.period, record.employee_id, record.net_salary
                    );
                }
                GenerateOutcome::AlreadyExists(record) => {
                    println!(
                        "Payroll {} for employee {} already exists: net {}",
                        record.period, record.employee_id, record.net_salary
                    );
                }
            }
        }
        None => {
            let records = generator.generate_all(&period).await?;
            println!(
                "Payroll {} covers {} employees.",
                period.label(),
                records.len()
            );
            for record in &records {
                println!(
                    "  {}: gross {} deductions {} net {}",
                    record.employee_id, record.gross_salary, record.deductions, record.net_salary
                );
            }
        }
    }
    Ok(())
}

async fn report(
    store: &dyn PayrollStore,
    year: i32,
    month: u32,
    marker: &str,
    source: ReportSource,
) -> Result<()> {
    let period = parse_period(year, month, marker)?;
    let config = store.load_rates().await?;
    let employees = store.list_employees().await?;
    let attendance = match source {
        ReportSource::Salary => Vec::new(),
        ReportSource::Attendance => store.list_attendance().await?,
    };

    let calculator = PayrollCalculator::new(&config);
    println!(
        "Pay statements for {} ({}, {} employees)",
        period.label(),
        period.span().display_label(),
        employees.len()
    );
    for employee in &employees {
        let pay_source = match source {
            ReportSource::Salary => PaySource::FixedSalary,
            ReportSource::Attendance => PaySource::AttendanceHours {
                records: &attendance,
            },
        };
        let statement = calculator.statement(employee, &period, pay_source);
        println!(
            "  {}: {} days, base {} overtime {} subsidy {} gross {} deductions {} net {}",
            employee.full_name(),
            statement.days_worked,
            statement.base_pay.round_dp(2),
            statement.overtime_pay.round_dp(2),
            statement.transport_subsidy,
            statement.gross_pay.round_dp(2),
            statement.total_deductions.round_dp(2),
            statement.net_pay.round_dp(2)
        );
    }
    Ok(())
}

async fn show_config(store: &dyn PayrollStore) -> Result<()> {
    let config = store.load_rates().await?;
    let json = serde_json::to_string_pretty(&config).context("failed to render configuration")?;
    println!("{json}");
    Ok(())
}
