//! Temporal accrual and forecasting engine for property investment tracking.
//!
//! This crate reconstructs a property's financial history and projects its
//! future from a sparse, irregularly-dated event log: acquisition, loan
//! changes, tenancy changes, recurring costs, one-off transactions and
//! valuations. Piecewise-constant event streams are integrated into accrued
//! totals over arbitrary date ranges, loan amortization is approximated
//! without a full repayment schedule, and a multi-segment compound-growth
//! forecast produces ROI and CAGR figures that stay comparable across
//! different horizons.
//!
//! Everything here is pure and synchronous: the caller supplies the full
//! event set for one property plus a query instant or window, and the same
//! inputs always produce the same outputs. Computing across N properties is
//! N independent invocations — the `parallel` feature (default on) fans the
//! portfolio functions out with rayon.
//!
//! The engine is a best-effort estimator over incomplete real-world data:
//! missing optional fields degrade to zeros or absent values, and the only
//! explicit failures are forecast inputs it cannot reason about at all
//! (see [`error::ForecastError`]).
//!
//! ```
//! use jiff::civil::date;
//! use propfolio_core::kpi::compute_kpis;
//! use propfolio_core::model::{PropertyEvents, PurchaseEvent};
//!
//! let events = PropertyEvents {
//!     purchase: Some(PurchaseEvent {
//!         settlement_date: date(2024, 11, 1),
//!         purchase_price: 555_000.0,
//!         deposit: Some(122_100.0),
//!         stamp_duty: Some(21_000.0),
//!         legal_fees: Some(1_800.0),
//!         buyers_agent_fee: None,
//!         loan_amount: Some(432_900.0),
//!     }),
//!     ..Default::default()
//! };
//!
//! let kpis = compute_kpis(&events, 100.0, date(2025, 12, 31));
//! assert_eq!(kpis.loan_balance, 432_900.0);
//! assert_eq!(kpis.acquisition_costs, 22_800.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod costs;
pub mod date_math;
pub mod error;
pub mod forecast;
pub mod kpi;
pub mod loan;
pub mod portfolio;
pub mod rent;
pub mod repository;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::ForecastError;
pub use forecast::{AppreciationSchedule, AppreciationSegment, forecast};
pub use kpi::{compute_kpis, compute_period_kpis};
pub use portfolio::{Property, forecast_portfolio, period_kpis_by_year};
