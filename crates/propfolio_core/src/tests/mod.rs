//! Integration tests for the accrual and forecasting engine
//!
//! Tests are organized by topic:
//! - `rent` - tenancy step-function accrual
//! - `costs` - recurring-cost accrual and category totals
//! - `loan` - balance estimation and the interest walk
//! - `kpi` - point-in-time and period composition
//! - `forecast` - projection, ROI and CAGR behavior
//! - `portfolio` - multi-property fan-out and aggregation
//! - `scenarios` - end-to-end property lifecycles and the serde boundary

mod kpi;
