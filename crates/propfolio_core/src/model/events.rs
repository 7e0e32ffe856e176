//! Property event model.
//!
//! Six event kinds describe everything the engine knows about a property.
//! Events are immutable value types handed over as read-only snapshots for
//! the duration of one computation; the engine sorts internal copies where
//! order matters and never mutates or reorders the caller's arrays.
//!
//! All currency and rate fields arrive already coerced to `f64` by the
//! event loader, and all dates are timezone-naive calendar instants.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::DAYS_PER_YEAR;

/// Loan repayment structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanType {
    InterestOnly,
    PrincipalAndInterest,
}

/// Whether the quoted rate is fixed or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    Fixed,
    Variable,
}

/// Tenancy timeline transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenancyEventKind {
    Start,
    RentChange,
    End,
}

/// How a recurring cost is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    /// Currency amount per cadence period.
    Fixed,
    /// Ratio applied to rent accrued over the same interval.
    PercentOfRent,
}

/// Repayment / fee frequency, mapped to an average period length for
/// interval math.
///
/// Months and quarters use calendar-average lengths (365.25 / 12 and
/// 365.25 / 4) rather than exact month days — an intentional simplification
/// shared by every calculator in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Annually,
}

impl Cadence {
    /// Average days per period.
    pub fn days_per_period(&self) -> f64 {
        match self {
            Cadence::Weekly => 7.0,
            Cadence::Fortnightly => 14.0,
            Cadence::Monthly => DAYS_PER_YEAR / 12.0,
            Cadence::Quarterly => DAYS_PER_YEAR / 4.0,
            Cadence::Annually => DAYS_PER_YEAR,
        }
    }

    /// Periods per average year.
    pub fn periods_per_year(&self) -> f64 {
        DAYS_PER_YEAR / self.days_per_period()
    }
}

/// The acquisition event. At most one per property; its settlement date is
/// the implicit start of the property's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub settlement_date: Date,
    pub purchase_price: f64,
    pub deposit: Option<f64>,
    pub stamp_duty: Option<f64>,
    pub legal_fees: Option<f64>,
    pub buyers_agent_fee: Option<f64>,
    /// Loan drawn at settlement; the starting balance for the loan walk.
    pub loan_amount: Option<f64>,
}

impl PurchaseEvent {
    /// Stamp duty + legal fees + buyer's-agent fee, missing components as 0.
    pub fn acquisition_costs(&self) -> f64 {
        self.stamp_duty.unwrap_or(0.0)
            + self.legal_fees.unwrap_or(0.0)
            + self.buyers_agent_fee.unwrap_or(0.0)
    }

    /// Purchase price plus acquisition costs.
    pub fn total_acquisition_cost(&self) -> f64 {
        self.purchase_price + self.acquisition_costs()
    }
}

/// One loan rate/structure change, effective until the next event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanEvent {
    pub effective_date: Date,
    pub loan_type: LoanType,
    pub rate_type: RateType,
    /// Annual rate as a ratio, e.g. 0.0574 for 5.74%.
    pub annual_rate: f64,
    pub repayment_amount: f64,
    pub repayment_cadence: Cadence,
    pub fixed_expiry: Option<Date>,
    pub offset_balance: Option<f64>,
    /// Manually recorded balance. On the chronologically latest event this
    /// is ground truth and overrides the computed walk entirely.
    pub manual_balance: Option<f64>,
    pub lender: Option<String>,
}

/// One tenancy timeline transition.
///
/// `Start` and `RentChange` carry a weekly rent; `End` does not. Gaps
/// between an `End` and the next `Start` (or before the first `Start`) are
/// vacancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TenancyEvent {
    pub kind: TenancyEventKind,
    pub effective_date: Date,
    pub weekly_rent: Option<f64>,
    pub lease_term_months: Option<i32>,
}

/// A recurring cost, active over `[effective_date, end_date)` (open-ended
/// when `end_date` is absent). Multiple costs may share a category; they
/// are summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringCostEvent {
    pub effective_date: Date,
    pub end_date: Option<Date>,
    /// Free-form tag, e.g. "management_fee", "insurance", "strata".
    pub category: String,
    pub fee_type: FeeType,
    /// Currency per cadence period for fixed fees; a ratio for
    /// percent-of-rent fees.
    pub amount: f64,
    pub cadence: Cadence,
}

/// A single dated transaction. Positive amounts are income, negative are
/// expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOffEvent {
    pub date: Date,
    pub amount: f64,
    pub category: String,
}

/// A point-in-time market valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationEvent {
    pub date: Date,
    pub value: f64,
    pub source: Option<String>,
}

/// The full event set for one property — the engine's sole input shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyEvents {
    pub purchase: Option<PurchaseEvent>,
    pub loans: Vec<LoanEvent>,
    pub tenancies: Vec<TenancyEvent>,
    pub recurring_costs: Vec<RecurringCostEvent>,
    pub one_offs: Vec<OneOffEvent>,
    pub valuations: Vec<ValuationEvent>,
}

impl PropertyEvents {
    /// Most recent valuation at or before `as_of`.
    pub fn latest_valuation_at(&self, as_of: Date) -> Option<&ValuationEvent> {
        self.valuations
            .iter()
            .filter(|v| v.date <= as_of)
            .max_by_key(|v| v.date)
    }

    /// Reference value at `as_of`: the latest valuation, falling back to
    /// the purchase price.
    pub fn reference_value_at(&self, as_of: Date) -> Option<f64> {
        self.latest_valuation_at(as_of)
            .map(|v| v.value)
            .or_else(|| self.purchase.as_ref().map(|p| p.purchase_price))
    }
}
