//! Recurring-cost accrual.

use crate::date_math::{AccrualWindow, days_between};
use crate::model::{CategoryTotals, FeeType, RecurringCostEvent, TenancyEvent};
use crate::rent::accrue_rent;

/// Accrue every recurring cost whose active window intersects `window`,
/// summed by category.
///
/// Each cost is clipped to the intersection of its active window
/// `[effective_date, end_date or window end)` and the query window. Fixed
/// fees are prorated daily from their cadence; percent-of-rent fees apply
/// their ratio to the rent accrued over the same intersection, so a fee
/// that starts mid-tenancy only sees the rent it overlaps. Costs that never
/// intersect the window produce no entry at all.
pub fn accrue_recurring_costs(
    costs: &[RecurringCostEvent],
    tenancies: &[TenancyEvent],
    window: AccrualWindow,
) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    if window.is_empty() {
        return totals;
    }

    for cost in costs {
        if cost.effective_date > window.end {
            continue;
        }
        let start = window.clamp(cost.effective_date);
        let end = match cost.end_date {
            Some(d) => window.clamp(d),
            None => window.end,
        };
        if start >= end {
            continue;
        }

        let days = days_between(start, end) as f64;
        let amount = match cost.fee_type {
            FeeType::Fixed => cost.amount / cost.cadence.days_per_period() * days,
            FeeType::PercentOfRent => {
                accrue_rent(tenancies, AccrualWindow::new(start, end)).gross_rent * cost.amount
            }
        };

        *totals.entry(cost.category.clone()).or_insert(0.0) += amount;
    }

    totals
}

/// Sum of all category totals.
pub fn total_recurring_costs(totals: &CategoryTotals) -> f64 {
    totals.values().sum()
}
