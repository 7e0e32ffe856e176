//! KPI composition.
//!
//! The composers combine the rent, cost and loan calculators plus one-off
//! events and the latest valuation into aggregate snapshots. They add no
//! walk logic of their own.

use jiff::civil::Date;

use crate::costs::{accrue_recurring_costs, total_recurring_costs};
use crate::date_math::AccrualWindow;
use crate::loan::{interest_paid, loan_position};
use crate::model::{KpiSnapshot, PeriodKpis, PropertyEvents};
use crate::rent::accrue_rent;

/// Compose the full KPI snapshot as of a query instant.
///
/// Accruals run from the settlement date (or from `as_of` itself when no
/// purchase is recorded, yielding zeros). All money figures are absolute;
/// the ownership percentage is carried through untouched for the caller to
/// apply.
pub fn compute_kpis(events: &PropertyEvents, ownership_pct: f64, as_of: Date) -> KpiSnapshot {
    let start = events.purchase.as_ref().map_or(as_of, |p| p.settlement_date);
    let window = AccrualWindow::new(start, as_of);

    let rent = accrue_rent(&events.tenancies, window);
    let recurring = accrue_recurring_costs(&events.recurring_costs, &events.tenancies, window);
    let total_recurring = total_recurring_costs(&recurring);

    let mut one_off_income = 0.0;
    let mut one_off_expenses = 0.0;
    for one_off in events.one_offs.iter().filter(|o| o.date <= as_of) {
        if one_off.amount > 0.0 {
            one_off_income += one_off.amount;
        } else {
            one_off_expenses += one_off.amount;
        }
    }

    let purchase = events.purchase.as_ref();
    let loan = loan_position(purchase, &events.loans, as_of);
    let total_interest_paid = interest_paid(purchase, &events.loans, as_of);

    let noi = rent.gross_rent - total_recurring;
    let net_cashflow = noi - total_interest_paid + one_off_income + one_off_expenses;

    let latest_valuation = events.latest_valuation_at(as_of);
    let valuation_value = latest_valuation.map(|v| v.value);
    let equity = valuation_value.map(|v| v - loan.balance);
    let lvr = valuation_value.and_then(|v| (v > 0.0).then(|| loan.balance / v));

    let (purchase_price, acquisition_costs, total_acquisition_cost) = match purchase {
        Some(p) => (
            p.purchase_price,
            p.acquisition_costs(),
            p.total_acquisition_cost(),
        ),
        None => (0.0, 0.0, 0.0),
    };

    KpiSnapshot {
        as_of,
        purchase_price,
        acquisition_costs,
        total_acquisition_cost,
        gross_rent: rent.gross_rent,
        occupied_days: rent.occupied_days,
        vacancy_days: rent.vacancy_days,
        vacancy_loss: rent.vacancy_loss,
        recurring_costs_by_category: recurring,
        total_recurring_costs: total_recurring,
        one_off_income,
        one_off_expenses,
        loan_balance: loan.balance,
        loan_balance_source: loan.source,
        total_interest_paid,
        current_rate: loan.annual_rate,
        current_loan_type: loan.loan_type,
        fixed_expiry: loan.fixed_expiry,
        noi,
        net_cashflow,
        latest_valuation: valuation_value,
        latest_valuation_date: latest_valuation.map(|v| v.date),
        equity,
        lvr,
        ownership_pct,
    }
}

/// Compose KPIs restricted to the closed interval `[from, to]`.
///
/// Rent and recurring costs are windowed natively by their calculators.
/// Interest in the window is the difference of two cumulative walks,
/// floored at 0 — sound only because [`interest_paid`] is non-decreasing
/// in its query instant; that coupling must be preserved if the estimator
/// is ever reimplemented. An interval with `to <= from` yields all zeros.
pub fn compute_period_kpis(
    events: &PropertyEvents,
    ownership_pct: f64,
    from: Date,
    to: Date,
) -> PeriodKpis {
    let window = AccrualWindow::new(from, to);

    let rent = accrue_rent(&events.tenancies, window);
    let recurring = accrue_recurring_costs(&events.recurring_costs, &events.tenancies, window);
    let total_recurring = total_recurring_costs(&recurring);

    let mut one_off_income = 0.0;
    let mut one_off_expenses = 0.0;
    for one_off in events
        .one_offs
        .iter()
        .filter(|o| o.date >= from && o.date <= to)
    {
        if one_off.amount > 0.0 {
            one_off_income += one_off.amount;
        } else {
            one_off_expenses += one_off.amount;
        }
    }

    let purchase = events.purchase.as_ref();
    let total_interest_paid = (interest_paid(purchase, &events.loans, to)
        - interest_paid(purchase, &events.loans, from))
    .max(0.0);

    let noi = rent.gross_rent - total_recurring;
    let net_cashflow = noi - total_interest_paid + one_off_income + one_off_expenses;

    PeriodKpis {
        from,
        to,
        gross_rent: rent.gross_rent,
        vacancy_days: rent.vacancy_days,
        vacancy_loss: rent.vacancy_loss,
        recurring_costs_by_category: recurring,
        total_recurring_costs: total_recurring,
        one_off_income,
        one_off_expenses,
        total_interest_paid,
        noi,
        net_cashflow,
        ownership_pct,
    }
}
