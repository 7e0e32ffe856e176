//! Multi-segment compound-growth forecasting.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::costs::{accrue_recurring_costs, total_recurring_costs};
use crate::date_math::{AccrualWindow, DAYS_PER_YEAR, add_years, days_between};
use crate::error::ForecastError;
use crate::loan::loan_position;
use crate::model::{ForecastPoint, PropertyEvents};
use crate::rent::accrue_rent;

/// One appreciation segment: grow at `rate` per year for `years` years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppreciationSegment {
    pub years: f64,
    pub rate: f64,
}

/// Appreciation schedule applied from the anchor date forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppreciationSchedule {
    /// A single flat annual rate — the degenerate fallback when no
    /// multi-segment schedule is supplied.
    Flat(f64),
    /// Segments applied in sequence with compound growth. A horizon past
    /// the schedule's total length continues at the last segment's rate.
    Segmented(Vec<AppreciationSegment>),
}

impl AppreciationSchedule {
    /// Reject schedule shapes the projection walk cannot reason about.
    pub fn validate(&self) -> Result<(), ForecastError> {
        match self {
            AppreciationSchedule::Flat(rate) => {
                if !rate.is_finite() {
                    return Err(ForecastError::NonFiniteSegmentRate {
                        index: 0,
                        rate: *rate,
                    });
                }
            }
            AppreciationSchedule::Segmented(segments) => {
                if segments.is_empty() {
                    return Err(ForecastError::EmptySchedule);
                }
                for (index, segment) in segments.iter().enumerate() {
                    if !segment.years.is_finite() || segment.years <= 0.0 {
                        return Err(ForecastError::NonPositiveSegmentYears {
                            index,
                            years: segment.years,
                        });
                    }
                    if !segment.rate.is_finite() {
                        return Err(ForecastError::NonFiniteSegmentRate {
                            index,
                            rate: segment.rate,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Compound `anchor_value` forward by `years` (fractional allowed).
    fn project(&self, anchor_value: f64, years: f64) -> f64 {
        match self {
            AppreciationSchedule::Flat(rate) => anchor_value * (1.0 + rate).powf(years),
            AppreciationSchedule::Segmented(segments) => {
                let mut value = anchor_value;
                let mut remaining = years;
                for segment in segments {
                    if remaining <= 0.0 {
                        break;
                    }
                    let span = remaining.min(segment.years);
                    value *= (1.0 + segment.rate).powf(span);
                    remaining -= span;
                }
                if remaining > 0.0 {
                    // validate() guarantees at least one segment
                    let last_rate = segments.last().map_or(0.0, |s| s.rate);
                    value *= (1.0 + last_rate).powf(remaining);
                }
                value
            }
        }
    }

    /// Rate in force at the start of the schedule; reported as the value
    /// CAGR at year offset 0.
    fn initial_rate(&self) -> f64 {
        match self {
            AppreciationSchedule::Flat(rate) => *rate,
            AppreciationSchedule::Segmented(segments) => {
                segments.first().map_or(0.0, |s| s.rate)
            }
        }
    }
}

/// Project property performance forward at each requested year offset.
///
/// The projection anchors at the most recent valuation at or before
/// `as_of` (purchase price if none), dated at its own observation date —
/// the appreciation schedule applies from that anchor date, so a stale
/// valuation keeps compounding up to `as_of` before the requested offsets
/// begin. Gross rent and recurring costs are annualised from the trailing
/// 365 days (clipped to settlement for young properties) and held flat for
/// every forecast year; the loan is stepped forward by re-running
/// [`loan_position`] at each future instant.
///
/// Cumulative equity gain is measured against the cash-in basis
/// (current equity net of acquisition costs); cumulative ROI divides the
/// total return by the total acquisition cost, and `annualised_roi`
/// re-expresses it as a CAGR so horizons stay comparable.
pub fn forecast(
    events: &PropertyEvents,
    ownership_pct: f64,
    as_of: Date,
    year_offsets: &[i32],
    schedule: &AppreciationSchedule,
) -> Result<Vec<ForecastPoint>, ForecastError> {
    schedule.validate()?;
    if let Some(&offset) = year_offsets.iter().find(|&&y| y < 0) {
        return Err(ForecastError::NegativeYearOffset(offset));
    }

    let purchase = events.purchase.as_ref();

    // Anchor: latest valuation at or before as_of, else the purchase.
    let (anchor_value, anchor_date) = match events.latest_valuation_at(as_of) {
        Some(v) => (v.value, v.date),
        None => match purchase {
            Some(p) => (p.purchase_price, p.settlement_date),
            None => (0.0, as_of),
        },
    };

    // Trailing-12-month run rate, clipped to settlement.
    let mut run_rate_start = add_years(as_of, -1);
    if let Some(p) = purchase
        && p.settlement_date > run_rate_start
    {
        run_rate_start = p.settlement_date;
    }
    let run_rate_days = days_between(run_rate_start, as_of);
    let annualisation = if run_rate_days > 0 {
        DAYS_PER_YEAR / run_rate_days as f64
    } else {
        1.0
    };

    let run_rate_window = AccrualWindow::new(run_rate_start, as_of);
    let annual_gross_rent =
        accrue_rent(&events.tenancies, run_rate_window).gross_rent * annualisation;
    let annual_recurring_costs = total_recurring_costs(&accrue_recurring_costs(
        &events.recurring_costs,
        &events.tenancies,
        run_rate_window,
    )) * annualisation;

    let current_equity = anchor_value - loan_position(purchase, &events.loans, as_of).balance;

    let acquisition_costs = purchase.map_or(0.0, |p| p.acquisition_costs());
    let total_acquisition_cost = purchase.map_or(0.0, |p| p.total_acquisition_cost()).max(1.0);

    // The cash-in basis for equity gain: acquisition costs are sunk until
    // the property appreciates past them.
    let equity_gain_basis = current_equity - acquisition_costs;

    let anchor_offset_days = days_between(anchor_date, as_of);

    let mut offsets = year_offsets.to_vec();
    offsets.sort_unstable();

    let mut cumulative_cashflow = 0.0;
    let mut previous_offset = 0;
    let mut points = Vec::with_capacity(offsets.len());

    for y in offsets {
        let years_from_anchor =
            (y as f64 * DAYS_PER_YEAR + anchor_offset_days as f64) / DAYS_PER_YEAR;
        let projected_value = schedule.project(anchor_value, years_from_anchor);

        let future = loan_position(purchase, &events.loans, add_years(as_of, y));
        let equity = projected_value - future.balance;
        let lvr = (projected_value > 0.0).then(|| future.balance / projected_value);

        let annual_interest = future.annual_rate.map_or(0.0, |rate| future.balance * rate);
        let annual_net_cashflow = annual_gross_rent - annual_recurring_costs - annual_interest;

        cumulative_cashflow += annual_net_cashflow * (y - previous_offset) as f64;
        previous_offset = y;

        let cumulative_equity_gain = equity - equity_gain_basis;
        let roi = (cumulative_equity_gain + cumulative_cashflow) / total_acquisition_cost;
        let value_cagr = if y > 0 {
            (projected_value / anchor_value.max(1.0)).powf(1.0 / y as f64) - 1.0
        } else {
            schedule.initial_rate()
        };

        points.push(ForecastPoint {
            year: as_of.year() + y as i16,
            years_from_now: y,
            projected_value,
            loan_balance: future.balance,
            equity,
            lvr,
            annual_gross_rent,
            annual_recurring_costs,
            annual_interest,
            annual_net_cashflow,
            cumulative_cashflow,
            cumulative_equity_gain,
            roi,
            annualised_roi: annualise_roi(roi, y),
            value_cagr,
            ownership_pct,
        });
    }

    Ok(points)
}

/// CAGR of total return. The base is clamped at 0 so a cumulative loss
/// past -100% does not take a fractional power of a negative number; at
/// year 0 the cumulative figure is returned as-is.
pub(crate) fn annualise_roi(roi: f64, years: i32) -> f64 {
    if years > 0 {
        (1.0 + roi).max(0.0).powf(1.0 / years as f64) - 1.0
    } else {
        roi
    }
}
