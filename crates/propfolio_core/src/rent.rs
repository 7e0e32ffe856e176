//! Rent accrual over a tenancy timeline.

use crate::date_math::{AccrualWindow, DAYS_PER_WEEK, days_between};
use crate::model::{RentAccrual, TenancyEvent, TenancyEventKind};

/// Integrate the tenancy step function over `window`.
///
/// Tenancy events define a piecewise-constant weekly-rent function: `Start`
/// and `RentChange` set the in-force rent, `End` clears it. Days with no
/// rent in force — before the first `Start`, after an `End` — count as
/// vacancy. Event dates are clamped into the window before differencing, so
/// an event before the window contributes no days but still determines the
/// rent carried into it.
///
/// `vacancy_loss` is what the vacancy days would have earned at the last
/// known weekly rent (0 if no rent was ever recorded). An empty window or
/// an empty tenancy sequence accrues nothing.
pub fn accrue_rent(tenancies: &[TenancyEvent], window: AccrualWindow) -> RentAccrual {
    if window.is_empty() || tenancies.is_empty() {
        return RentAccrual::default();
    }

    let mut events: Vec<&TenancyEvent> = tenancies
        .iter()
        .filter(|e| e.effective_date <= window.end)
        .collect();
    events.sort_by_key(|e| e.effective_date);

    let mut accrual = RentAccrual::default();
    let mut current_weekly: Option<f64> = None;
    let mut cursor = window.start;

    for event in &events {
        let segment_end = window.clamp(event.effective_date);
        let days = days_between(cursor, segment_end).max(0);
        match current_weekly {
            Some(rent) => {
                accrual.gross_rent += rent * days as f64 / DAYS_PER_WEEK;
                accrual.occupied_days += days;
            }
            None => accrual.vacancy_days += days,
        }
        cursor = segment_end;

        match event.kind {
            TenancyEventKind::End => current_weekly = None,
            TenancyEventKind::Start | TenancyEventKind::RentChange => {
                if let Some(rent) = event.weekly_rent {
                    current_weekly = Some(rent);
                }
            }
        }
    }

    // Tail segment from the last event to the window end.
    let days = days_between(cursor, window.end).max(0);
    match current_weekly {
        Some(rent) => {
            accrual.gross_rent += rent * days as f64 / DAYS_PER_WEEK;
            accrual.occupied_days += days;
        }
        None => accrual.vacancy_days += days,
    }

    let last_known_rent = events
        .iter()
        .rev()
        .find(|e| e.kind != TenancyEventKind::End && e.weekly_rent.is_some())
        .and_then(|e| e.weekly_rent)
        .unwrap_or(0.0);
    accrual.vacancy_loss = last_known_rent * accrual.vacancy_days as f64 / DAYS_PER_WEEK;

    accrual
}
