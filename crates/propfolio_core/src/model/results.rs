//! Engine output structures.
//!
//! These shapes are the engine's only boundary: KPI and forecast consumers
//! receive them verbatim and are responsible for currency formatting,
//! ownership-percentage multiplication for "my share" displays, and any
//! aggregation beyond simple summation.

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::events::LoanType;

/// Accrued amounts per cost category. Categories with nothing accrued in
/// the window are absent, not zero entries.
pub type CategoryTotals = FxHashMap<String, f64>;

/// Rent integrated over an accrual window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RentAccrual {
    pub gross_rent: f64,
    /// Days with a rent in force. `occupied_days + vacancy_days` partitions
    /// the window whenever the tenancy sequence is non-empty.
    pub occupied_days: i32,
    pub vacancy_days: i32,
    /// Rent foregone across the vacancy days, at the last in-force rate
    /// (0 when no rent was ever known).
    pub vacancy_loss: f64,
}

/// Where a loan balance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSource {
    /// Manually recorded on the latest loan event — ground truth.
    Manual,
    /// Estimated by the amortization walk.
    Computed,
    /// No loan events; the balance is the purchase loan amount (or 0).
    None,
}

/// Loan state at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanPosition {
    pub balance: f64,
    pub source: BalanceSource,
    pub annual_rate: Option<f64>,
    pub loan_type: Option<LoanType>,
    pub fixed_expiry: Option<Date>,
}

/// Point-in-time KPI snapshot; accruals run from settlement to `as_of`.
///
/// All money figures are absolute — the ownership percentage is carried
/// through untouched for the caller to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub as_of: Date,

    // Acquisition
    pub purchase_price: f64,
    /// Stamp duty + legal fees + buyer's-agent fee.
    pub acquisition_costs: f64,
    pub total_acquisition_cost: f64,

    // Income accrued to as_of
    pub gross_rent: f64,
    pub occupied_days: i32,
    pub vacancy_days: i32,
    pub vacancy_loss: f64,

    // Recurring costs accrued to as_of
    pub recurring_costs_by_category: CategoryTotals,
    pub total_recurring_costs: f64,

    // One-off events summed to as_of
    pub one_off_income: f64,
    /// Sum of negative one-off amounts; zero or below.
    pub one_off_expenses: f64,

    // Loan
    pub loan_balance: f64,
    pub loan_balance_source: BalanceSource,
    pub total_interest_paid: f64,
    pub current_rate: Option<f64>,
    pub current_loan_type: Option<LoanType>,
    pub fixed_expiry: Option<Date>,

    // Cashflow
    /// Gross rent minus total recurring costs.
    pub noi: f64,
    /// NOI minus interest paid, plus one-off income and (negative) expenses.
    pub net_cashflow: f64,

    // Equity / value
    pub latest_valuation: Option<f64>,
    pub latest_valuation_date: Option<Date>,
    pub equity: Option<f64>,
    pub lvr: Option<f64>,

    pub ownership_pct: f64,
}

/// KPIs composed over a closed date interval, for fiscal-year-style
/// reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodKpis {
    pub from: Date,
    pub to: Date,

    pub gross_rent: f64,
    pub vacancy_days: i32,
    pub vacancy_loss: f64,

    pub recurring_costs_by_category: CategoryTotals,
    pub total_recurring_costs: f64,

    pub one_off_income: f64,
    pub one_off_expenses: f64,

    /// Difference of two cumulative interest walks, floored at 0.
    pub total_interest_paid: f64,

    pub noi: f64,
    pub net_cashflow: f64,

    pub ownership_pct: f64,
}

/// One projected year in a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar year of this point.
    pub year: i16,
    pub years_from_now: i32,

    pub projected_value: f64,
    pub loan_balance: f64,
    pub equity: f64,
    pub lvr: Option<f64>,

    /// Annual gross rent, held flat at the trailing-12-month run rate.
    pub annual_gross_rent: f64,
    /// Annual recurring costs, held flat at the trailing-12-month run rate.
    pub annual_recurring_costs: f64,
    /// Interest for that year, from the projected balance and rate.
    pub annual_interest: f64,
    pub annual_net_cashflow: f64,

    /// Net cashflow integrated from the as-of instant to this point.
    pub cumulative_cashflow: f64,
    /// Equity gain versus the cash-in basis (current equity net of
    /// acquisition costs).
    pub cumulative_equity_gain: f64,

    /// (equity gain + cumulative cashflow) / total acquisition cost. Grows
    /// with the horizon — use `annualised_roi` for cross-horizon
    /// comparison.
    pub roi: f64,
    /// CAGR of total return: `(1 + roi)^(1/years) - 1`, with the base
    /// clamped at 0 so a loss past -100% stays real-valued.
    pub annualised_roi: f64,
    /// CAGR of the projected value from the as-of instant.
    pub value_cagr: f64,

    pub ownership_pct: f64,
}
