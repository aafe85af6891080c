use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use tax_core::calculations::{
    EmploymentInsurancePremiums, IncomeTaxCalculator, PensionContribution, PensionPlan,
    employment_insurance_premiums, oas_recovery_tax, pension_contribution,
};
use tax_core::{IncomeTaxRequest, IncomeTaxSummary, Jurisdiction, TaxTables};
use tax_data::{default_tables, load_tables};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Canadian federal and provincial income tax calculator.
///
/// Uses the embedded 2024 tables unless both `--brackets` and
/// `--year-config` are given.
#[derive(Debug, Parser)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Gross annual income.
    #[arg(long)]
    income: Decimal,

    /// Province or territory of residence (e.g. ON, QC, BC).
    #[arg(long, default_value = "ON", value_parser = parse_residence)]
    province: Jurisdiction,

    /// Tax year whose tables are used.
    #[arg(long, default_value = "2024")]
    year: i32,

    /// Annual inflation rate used to index brackets (e.g. 0.02).
    #[arg(long, default_value = "0")]
    inflation_rate: Decimal,

    /// Number of years to index brackets forward.
    #[arg(long, default_value_t = 0)]
    years: u32,

    /// Extra federal non-refundable credits, in tax dollars.
    #[arg(long, default_value = "0")]
    federal_credit: Decimal,

    /// Extra provincial non-refundable credits, in tax dollars.
    #[arg(long, default_value = "0")]
    provincial_credit: Decimal,

    /// OAS benefit received, to compute the recovery tax.
    #[arg(long)]
    oas_received: Option<Decimal>,

    /// Bracket CSV to use instead of the embedded tables.
    #[arg(long, requires = "year_config")]
    brackets: Option<PathBuf>,

    /// Year parameter CSV to use instead of the embedded tables.
    #[arg(long, requires = "brackets")]
    year_config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_residence(s: &str) -> Result<Jurisdiction, String> {
    match Jurisdiction::parse(s) {
        Some(Jurisdiction::Federal) => Err("residence must be a province or territory".to_string()),
        Some(jurisdiction) => Ok(jurisdiction),
        None => Err(format!("unknown province or territory code '{s}'")),
    }
}

#[derive(Debug, Serialize)]
struct Report {
    residence: Jurisdiction,
    tax_year: i32,
    income_tax: IncomeTaxSummary,
    pension: Option<PensionContribution>,
    employment_insurance: Option<EmploymentInsurancePremiums>,
    oas_recovery_tax: Option<Decimal>,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_tables(cli: &Cli) -> Result<TaxTables> {
    let (Some(brackets), Some(year_config)) = (&cli.brackets, &cli.year_config) else {
        return default_tables().context("Failed to load embedded tables");
    };

    debug!(brackets = %brackets.display(), year_config = %year_config.display(), "loading tables");
    let brackets_file = File::open(brackets)
        .with_context(|| format!("Failed to open: {}", brackets.display()))?;
    let year_config_file = File::open(year_config)
        .with_context(|| format!("Failed to open: {}", year_config.display()))?;

    load_tables(brackets_file, year_config_file).with_context(|| {
        format!(
            "Failed to load tables from {} and {}",
            brackets.display(),
            year_config.display()
        )
    })
}

fn print_report(report: &Report) {
    let summary = &report.income_tax;

    println!("{} {} income tax", report.residence.name(), report.tax_year);
    println!("  Federal tax:        {:>12}", summary.federal_tax);
    println!("  Provincial tax:     {:>12}", summary.provincial_tax);
    println!("  Total tax:          {:>12}", summary.total_tax);
    println!("  After-tax income:   {:>12}", summary.after_tax_income);
    println!("  Effective rate:     {:>12}", summary.effective_tax_rate.round_dp(4));
    println!("  Marginal rate:      {:>12}", summary.marginal_tax_rate.round_dp(4));

    if let Some(pension) = &report.pension {
        let plan = match pension.plan {
            PensionPlan::Cpp => "CPP",
            PensionPlan::Qpp => "QPP",
        };
        println!("  {plan} contribution:   {:>12}", pension.contribution);
    }
    if let Some(ei) = &report.employment_insurance {
        println!("  EI premium:         {:>12}", ei.ei_premium);
        if ei.qpip_premium > Decimal::ZERO {
            println!("  QPIP premium:       {:>12}", ei.qpip_premium);
        }
    }
    if let Some(recovery) = report.oas_recovery_tax {
        println!("  OAS recovery tax:   {:>12}", recovery);
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let tables = read_tables(&cli)?;

    let request = IncomeTaxRequest {
        gross_income: cli.income,
        residence: cli.province,
        tax_year: cli.year,
        inflation_rate: cli.inflation_rate,
        years_to_inflate: cli.years,
        federal_credits: cli.federal_credit,
        provincial_credits: cli.provincial_credit,
    };
    let income_tax = IncomeTaxCalculator::new(&tables)
        .calculate(&request)
        .with_context(|| format!("Failed to calculate {} {} income tax", cli.province, cli.year))?;

    let config = match tables.year_config(cli.year) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!("{err}; skipping payroll figures");
            None
        }
    };

    let report = Report {
        residence: cli.province,
        tax_year: cli.year,
        income_tax,
        pension: config.map(|c| pension_contribution(cli.income, cli.province, c)),
        employment_insurance: config.map(|c| employment_insurance_premiums(cli.income, cli.province, c)),
        oas_recovery_tax: config
            .zip(cli.oas_received)
            .map(|(c, received)| oas_recovery_tax(cli.income, received, c)),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    Ok(())
}
