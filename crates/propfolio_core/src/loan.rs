//! Loan balance and interest estimation.
//!
//! Both walks use simple interest per repayment period, not a day-count
//! amortization schedule, so figures will diverge from a lender statement
//! over long horizons. A manually recorded balance on the chronologically
//! latest loan event is treated as ground truth and short-circuits the walk
//! entirely.

use jiff::civil::Date;

use crate::date_math::days_between;
use crate::model::{BalanceSource, LoanEvent, LoanPosition, LoanType, PurchaseEvent};

/// Loan state at `as_of`.
///
/// Priority order: with no loan events at or before the instant, the
/// balance falls back to the purchase loan amount (source `None`); a manual
/// balance on the latest event wins over any computation (source `Manual`);
/// otherwise the amortization walk runs from the purchase loan amount
/// (source `Computed`). Interest-only periods leave the balance unchanged;
/// amortizing periods reduce it by the estimated principal component of
/// each repayment, never below 0.
pub fn loan_position(
    purchase: Option<&PurchaseEvent>,
    loans: &[LoanEvent],
    as_of: Date,
) -> LoanPosition {
    let active = active_loans(loans, as_of);

    let Some(latest) = active.last() else {
        return LoanPosition {
            balance: initial_loan_amount(purchase),
            source: BalanceSource::None,
            annual_rate: None,
            loan_type: None,
            fixed_expiry: None,
        };
    };

    if let Some(manual) = latest.manual_balance {
        return LoanPosition {
            balance: manual,
            source: BalanceSource::Manual,
            annual_rate: Some(latest.annual_rate),
            loan_type: Some(latest.loan_type),
            fixed_expiry: latest.fixed_expiry,
        };
    }

    let mut balance = initial_loan_amount(purchase);
    for (i, loan) in active.iter().enumerate() {
        let Some(days) = period_days(&active, i, as_of) else {
            continue;
        };
        if loan.loan_type == LoanType::PrincipalAndInterest {
            let periods_elapsed = days as f64 / loan.repayment_cadence.days_per_period();
            let rate_per_period = loan.annual_rate / loan.repayment_cadence.periods_per_year();
            let principal_per_period = (loan.repayment_amount - balance * rate_per_period).max(0.0);
            balance = (balance - principal_per_period * periods_elapsed).max(0.0);
        }
    }

    LoanPosition {
        balance,
        source: BalanceSource::Computed,
        annual_rate: Some(latest.annual_rate),
        loan_type: Some(latest.loan_type),
        fixed_expiry: latest.fixed_expiry,
    }
}

/// Cumulative interest accrued from the first loan event up to `as_of`.
///
/// Same walk as [`loan_position`], accumulating
/// `balance × rate_per_period × periods_elapsed` per loan period and
/// reducing the balance identically. Monotonically non-decreasing in
/// `as_of`; the period composer differences two of these walks and relies
/// on that.
pub fn interest_paid(purchase: Option<&PurchaseEvent>, loans: &[LoanEvent], as_of: Date) -> f64 {
    let active = active_loans(loans, as_of);
    if active.is_empty() {
        return 0.0;
    }

    let mut total_interest = 0.0;
    let mut balance = initial_loan_amount(purchase);

    for (i, loan) in active.iter().enumerate() {
        let Some(days) = period_days(&active, i, as_of) else {
            continue;
        };
        let periods_elapsed = days as f64 / loan.repayment_cadence.days_per_period();
        let rate_per_period = loan.annual_rate / loan.repayment_cadence.periods_per_year();

        match loan.loan_type {
            LoanType::InterestOnly => {
                total_interest += balance * rate_per_period * periods_elapsed;
            }
            LoanType::PrincipalAndInterest => {
                let interest_per_period = balance * rate_per_period;
                let principal_per_period = (loan.repayment_amount - interest_per_period).max(0.0);
                total_interest += interest_per_period * periods_elapsed;
                balance = (balance - principal_per_period * periods_elapsed).max(0.0);
            }
        }
    }

    total_interest
}

/// Loan events at or before `as_of`, sorted chronologically. The engine
/// sorts its own copy; caller ordering is never assumed.
fn active_loans(loans: &[LoanEvent], as_of: Date) -> Vec<&LoanEvent> {
    let mut active: Vec<&LoanEvent> = loans.iter().filter(|l| l.effective_date <= as_of).collect();
    active.sort_by_key(|l| l.effective_date);
    active
}

fn initial_loan_amount(purchase: Option<&PurchaseEvent>) -> f64 {
    purchase.and_then(|p| p.loan_amount).unwrap_or(0.0)
}

/// Days covered by the `i`th loan period, which ends at the next event or
/// at `as_of`. `None` for zero-length periods (same-day events).
fn period_days(active: &[&LoanEvent], i: usize, as_of: Date) -> Option<i32> {
    let start = active[i].effective_date;
    let end = active.get(i + 1).map_or(as_of, |next| next.effective_date);
    if end <= start {
        None
    } else {
        Some(days_between(start, end))
    }
}
