//! Integration tests for the embedded tables and the income tax pipeline.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::{
    CalculationError, DividendKind, IncomeTaxCalculator, dividend_tax_credit,
    employment_insurance_premiums, oas_recovery_tax, pension_contribution, rrsp_deduction_limit,
};
use tax_core::{IncomeTaxRequest, Jurisdiction, TableError, TaxTables, TaxYearConfigError};
use tax_data::{BRACKETS_2024_CSV, TableLoaderError, YEAR_CONFIG_2024_CSV, default_tables, load_tables};

fn tables() -> TaxTables {
    default_tables().expect("Embedded tables should load")
}

// =========================================================================
// Embedded data
// =========================================================================

#[test]
fn test_embedded_tables_cover_every_jurisdiction() {
    let tables = tables();

    assert_eq!(tables.table_count(), 14);
    assert_eq!(tables.available_years(), vec![2024]);
    assert!(tables.table(Jurisdiction::Federal, 2024).is_ok());
    for province in Jurisdiction::provinces() {
        assert!(
            tables.table(*province, 2024).is_ok(),
            "Missing 2024 table for {}",
            province
        );
    }
}

#[test]
fn test_embedded_tables_are_progressive() {
    let tables = tables();

    for jurisdiction in tables.jurisdictions_for(2024) {
        let table = tables.table(jurisdiction, 2024).expect("table");
        assert!(table.is_progressive(), "{} rates decrease", jurisdiction);
    }
}

#[test]
fn test_embedded_federal_table() {
    let tables = tables();
    let federal = tables.table(Jurisdiction::Federal, 2024).expect("table");

    assert_eq!(federal.segments().len(), 5);
    assert_eq!(federal.segments()[0].upper_bound, Some(dec!(55867)));
    assert_eq!(federal.segments()[4].lower_bound, dec!(246752));
    assert_eq!(federal.segments()[4].upper_bound, None);
    assert_eq!(federal.base_credit(), dec!(15705));
    assert_eq!(federal.base_credit_rate(), dec!(0.15));
}

#[test]
fn test_embedded_year_config() {
    let tables = tables();
    let config = tables.year_config(2024).expect("year config");

    assert_eq!(config.quebec_abatement_rate, dec!(0.165));
    assert_eq!(config.ympe, dec!(68500));
    assert_eq!(config.tfsa_annual_limit, dec!(7000));
}

#[test]
fn test_load_tables_reports_bad_data() {
    let brackets = "tax_year,jurisdiction,lower_bound,upper_bound,rate,base_credit\n2024,ZZ,0,,0.1,0";

    let result = load_tables(brackets.as_bytes(), YEAR_CONFIG_2024_CSV.as_bytes());

    assert!(matches!(result, Err(TableLoaderError::UnknownJurisdiction(_))));
}

#[test]
fn test_load_tables_rejects_negative_abatement_rate() {
    let year_config = YEAR_CONFIG_2024_CSV.replacen(",0.165,", ",-0.5,", 1);

    let result = load_tables(BRACKETS_2024_CSV.as_bytes(), year_config.as_bytes());

    assert!(matches!(
        result,
        Err(TableLoaderError::InvalidYearConfig {
            tax_year: 2024,
            source: TaxYearConfigError::InvalidRate {
                field: "quebec_abatement_rate",
                ..
            },
        })
    ));
}

#[test]
fn test_load_tables_accepts_embedded_csv() {
    let tables = load_tables(BRACKETS_2024_CSV.as_bytes(), YEAR_CONFIG_2024_CSV.as_bytes())
        .expect("Should load");

    assert_eq!(tables.table_count(), 14);
}

// =========================================================================
// Income tax
// =========================================================================

#[test]
fn test_ontario_75000() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let summary = calculator
        .calculate(&IncomeTaxRequest::new(dec!(75000), Jurisdiction::Ontario, 2024))
        .expect("Should calculate");

    assert_eq!(summary.federal_tax, dec!(9946.57));
    assert_eq!(summary.provincial_tax, dec!(4127.06));
    assert_eq!(summary.total_tax, dec!(14073.63));
    assert_eq!(summary.after_tax_income, dec!(60926.37));
    assert_eq!(summary.effective_tax_rate, dec!(0.1876484));
    assert_eq!(summary.marginal_tax_rate, dec!(0.2965));
}

#[test]
fn test_quebec_75000_applies_abatement() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let (federal, provincial) = calculator
        .calculate_parts(&IncomeTaxRequest::new(dec!(75000), Jurisdiction::Quebec, 2024))
        .expect("Should calculate");

    // 12302.32 before abatement
    assert_eq!(federal.gross_tax_before_credit, dec!(10272.44));
    assert_eq!(federal.final_tax, dec!(7916.69));
    assert_eq!(federal.marginal_rate, dec!(0.171175));
    assert_eq!(provincial.gross_tax_before_credit, dec!(11661.00));
    assert_eq!(provincial.final_tax, dec!(9133.16));
}

#[test]
fn test_alberta_50000() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let summary = calculator
        .calculate(&IncomeTaxRequest::new(dec!(50000), Jurisdiction::Alberta, 2024))
        .expect("Should calculate");

    assert_eq!(summary.federal_tax, dec!(5144.25));
    assert_eq!(summary.provincial_tax, dec!(2811.50));
    assert_eq!(summary.effective_tax_rate, dec!(0.159115));
    assert_eq!(summary.marginal_tax_rate, dec!(0.25));
}

#[test]
fn test_british_columbia_150000() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let summary = calculator
        .calculate(&IncomeTaxRequest::new(dec!(150000), Jurisdiction::BritishColumbia, 2024))
        .expect("Should calculate");

    assert_eq!(summary.federal_tax, dec!(27426.25));
    assert_eq!(summary.provincial_tax, dec!(12271.75));
    assert_eq!(summary.total_tax, dec!(39698.00));
    assert_eq!(summary.marginal_tax_rate, dec!(0.407));
}

#[test]
fn test_income_below_basic_personal_amount_owes_nothing() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let summary = calculator
        .calculate(&IncomeTaxRequest::new(dec!(10000), Jurisdiction::Ontario, 2024))
        .expect("Should calculate");

    assert_eq!(summary.total_tax, Decimal::ZERO);
    assert_eq!(summary.after_tax_income, dec!(10000));
    assert_eq!(summary.effective_tax_rate, Decimal::ZERO);
}

#[test]
fn test_zero_income_has_zero_effective_rate() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let summary = calculator
        .calculate(&IncomeTaxRequest::new(Decimal::ZERO, Jurisdiction::Ontario, 2024))
        .expect("Should calculate");

    assert_eq!(summary.total_tax, Decimal::ZERO);
    assert_eq!(summary.effective_tax_rate, Decimal::ZERO);
}

#[test]
fn test_indexation_lowers_tax_on_same_income() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);
    let request = IncomeTaxRequest {
        inflation_rate: dec!(0.02),
        years_to_inflate: 2,
        ..IncomeTaxRequest::new(dec!(75000), Jurisdiction::Ontario, 2024)
    };

    let summary = calculator.calculate(&request).expect("Should calculate");

    assert_eq!(summary.federal_tax, dec!(9727.26));
    assert_eq!(summary.provincial_tax, dec!(4016.55));
    assert_eq!(summary.total_tax, dec!(13743.81));
}

#[test]
fn test_extra_credits_are_floored_at_zero() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);
    let request = IncomeTaxRequest {
        federal_credits: dec!(1000),
        provincial_credits: dec!(50000),
        ..IncomeTaxRequest::new(dec!(75000), Jurisdiction::Ontario, 2024)
    };

    let summary = calculator.calculate(&request).expect("Should calculate");

    assert_eq!(summary.federal_tax, dec!(8946.57));
    assert_eq!(summary.provincial_tax, Decimal::ZERO);
}

#[test]
fn test_missing_year_is_an_error() {
    let tables = tables();
    let calculator = IncomeTaxCalculator::new(&tables);

    let result = calculator.calculate(&IncomeTaxRequest::new(dec!(75000), Jurisdiction::Ontario, 2030));

    let Err(CalculationError::Table(TableError::TableNotFound {
        available, ..
    })) = result
    else {
        panic!("Expected TableNotFound, got: {:?}", result);
    };
    assert_eq!(available, vec![2024]);
}

// =========================================================================
// Supplementary calculations with embedded parameters
// =========================================================================

#[test]
fn test_payroll_figures_for_ontario_employee() {
    let tables = tables();
    let config = tables.year_config(2024).expect("year config");

    let pension = pension_contribution(dec!(75000), Jurisdiction::Ontario, config);
    let ei = employment_insurance_premiums(dec!(75000), Jurisdiction::Ontario, config);

    assert_eq!(pension.contribution, dec!(3867.50));
    assert_eq!(ei.ei_premium, dec!(1049.12));
    assert_eq!(ei.qpip_premium, Decimal::ZERO);
}

#[test]
fn test_oas_dividends_and_rrsp() {
    let tables = tables();
    let config = tables.year_config(2024).expect("year config");

    assert_eq!(oas_recovery_tax(dec!(100000), dec!(8500), config), dec!(1350.45));
    assert_eq!(
        dividend_tax_credit(dec!(1000), DividendKind::Eligible, config).federal_credit,
        dec!(207.27)
    );
    assert_eq!(rrsp_deduction_limit(dec!(100000), config), dec!(18000));
}
