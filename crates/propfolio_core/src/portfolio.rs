//! Multi-property fan-out and aggregation.
//!
//! Properties are fully independent — no shared state, no ordering
//! requirement — so the per-property computations fan out with rayon when
//! the `parallel` feature is enabled and fall back to a plain iterator
//! otherwise.

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::ForecastError;
use crate::forecast::{AppreciationSchedule, annualise_roi, forecast};
use crate::kpi::compute_period_kpis;
use crate::model::{ForecastPoint, PeriodKpis, PropertyEvents, PropertyId, PropertyYearKey};

/// One property's full input to the multi-property layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub ownership_pct: f64,
    pub events: PropertyEvents,
}

/// A single property's forecast within a portfolio run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyForecast {
    pub id: PropertyId,
    pub points: Vec<ForecastPoint>,
}

/// Per-property forecasts plus the portfolio-level aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioForecast {
    pub properties: Vec<PropertyForecast>,
    pub aggregate: Vec<ForecastPoint>,
}

/// Forecast every property and aggregate matching year offsets.
pub fn forecast_portfolio(
    properties: &[Property],
    as_of: Date,
    year_offsets: &[i32],
    schedule: &AppreciationSchedule,
) -> Result<PortfolioForecast, ForecastError> {
    #[cfg(feature = "parallel")]
    let per_property: Result<Vec<PropertyForecast>, ForecastError> = properties
        .par_iter()
        .map(|property| {
            forecast(
                &property.events,
                property.ownership_pct,
                as_of,
                year_offsets,
                schedule,
            )
            .map(|points| PropertyForecast {
                id: property.id,
                points,
            })
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_property: Result<Vec<PropertyForecast>, ForecastError> = properties
        .iter()
        .map(|property| {
            forecast(
                &property.events,
                property.ownership_pct,
                as_of,
                year_offsets,
                schedule,
            )
            .map(|points| PropertyForecast {
                id: property.id,
                points,
            })
        })
        .collect();

    let per_property = per_property?;

    let mut offsets = year_offsets.to_vec();
    offsets.sort_unstable();
    offsets.dedup();

    let mut aggregate = Vec::with_capacity(offsets.len());
    for y in offsets {
        let points: Vec<&ForecastPoint> = per_property
            .iter()
            .filter_map(|p| p.points.iter().find(|pt| pt.years_from_now == y))
            .collect();
        if points.is_empty() {
            continue;
        }
        aggregate.push(aggregate_offset(&points, y));
    }

    Ok(PortfolioForecast {
        properties: per_property,
        aggregate,
    })
}

/// Sum one year offset across properties.
///
/// The aggregate ROI denominator is back-derived per property from
/// `(equity_gain + cashflow) / roi` rather than re-loading purchase events.
/// A property whose roi is exactly 0 contributes nothing to the
/// denominator, which can overstate the aggregate roi — a known edge of
/// the back-derivation, guarded by the `max(1, cost)` floor.
fn aggregate_offset(points: &[&ForecastPoint], y: i32) -> ForecastPoint {
    let sum = |f: fn(&ForecastPoint) -> f64| points.iter().map(|p| f(p)).sum::<f64>();

    let projected_value = sum(|p| p.projected_value);
    let loan_balance = sum(|p| p.loan_balance);
    let cumulative_cashflow = sum(|p| p.cumulative_cashflow);
    let cumulative_equity_gain = sum(|p| p.cumulative_equity_gain);

    let total_acquisition_cost: f64 = points
        .iter()
        .filter(|p| p.roi != 0.0)
        .map(|p| ((p.cumulative_equity_gain + p.cumulative_cashflow) / p.roi).max(1.0))
        .sum();
    let roi = if total_acquisition_cost > 0.0 {
        (cumulative_equity_gain + cumulative_cashflow) / total_acquisition_cost
    } else {
        0.0
    };

    ForecastPoint {
        year: points[0].year,
        years_from_now: y,
        projected_value,
        loan_balance,
        equity: sum(|p| p.equity),
        lvr: (projected_value > 0.0).then(|| loan_balance / projected_value),
        annual_gross_rent: sum(|p| p.annual_gross_rent),
        annual_recurring_costs: sum(|p| p.annual_recurring_costs),
        annual_interest: sum(|p| p.annual_interest),
        annual_net_cashflow: sum(|p| p.annual_net_cashflow),
        cumulative_cashflow,
        cumulative_equity_gain,
        roi,
        annualised_roi: annualise_roi(roi, y),
        // Plain mean; the portfolio has no single anchor value to weight by.
        value_cagr: sum(|p| p.value_cagr) / points.len() as f64,
        // Whole-portfolio figures; per-property shares were not applied.
        ownership_pct: 100.0,
    }
}

/// Calendar-year reporting window: January 1 to December 31.
pub fn calendar_year_window(year: i16) -> (Date, Date) {
    (
        jiff::civil::date(year, 1, 1),
        jiff::civil::date(year, 12, 31),
    )
}

/// Period KPIs for each property for each requested calendar year, keyed
/// by the composite property/year key.
pub fn period_kpis_by_year(
    properties: &[Property],
    years: &[i16],
) -> FxHashMap<PropertyYearKey, PeriodKpis> {
    let mut results = FxHashMap::default();
    for property in properties {
        for &year in years {
            let (from, to) = calendar_year_window(year);
            let key = PropertyYearKey {
                property_id: property.id,
                year,
            };
            results.insert(
                key,
                compute_period_kpis(&property.events, property.ownership_pct, from, to),
            );
        }
    }
    results
}
