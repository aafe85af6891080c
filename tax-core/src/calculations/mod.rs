//! Tax calculation modules.
//!
//! The income tax pipeline runs, per jurisdiction, in this order:
//!
//! 1. [`index_table`] projects a bracket table forward for inflation.
//! 2. [`evaluate_tax`] accumulates tax over the bracket segments.
//! 3. [`apply_adjustment`] reduces federal tax by the Quebec abatement.
//! 4. [`apply_credit`] subtracts the basic personal credit and any other
//!    non-refundable credits, flooring at zero.
//! 5. [`effective_rate`] relates the final tax to gross income.
//!
//! [`IncomeTaxCalculator`] drives the pipeline for a federal and provincial
//! pair. Payroll contributions, OAS recovery, dividend credits and registered
//! plan limits sit alongside it and read their parameters from
//! [`TaxYearConfig`](crate::TaxYearConfig).

pub mod adjustment;
pub mod brackets;
pub mod common;
pub mod credits;
pub mod dividends;
pub mod income_tax;
pub mod indexation;
pub mod limits;
pub mod oas;
pub mod payroll;
pub mod rates;

pub use adjustment::{apply_abatement, apply_adjustment};
pub use brackets::{evaluate_tax, marginal_rate, segment_for_income};
pub use credits::apply_credit;
pub use dividends::{DividendKind, DividendTaxCredit, dividend_tax_credit};
pub use income_tax::{CalculationError, IncomeTaxCalculator, calculate_jurisdiction_tax};
pub use indexation::{IndexationError, index_table, inflation_factor};
pub use limits::{resp_grant, rrsp_deduction_limit, tfsa_contribution_room};
pub use oas::{oas_recovery_schedule, oas_recovery_tax};
pub use payroll::{
    EmploymentInsurancePremiums, PensionContribution, PensionPlan, employment_insurance_premiums,
    pension_contribution,
};
pub use rates::effective_rate;
