use std::fmt;

/// Validation failures for forecast inputs.
///
/// These are the only errors the engine raises. Inputs the projection walk
/// cannot reason about at all are rejected before the walk runs; every
/// other data problem (missing fields, empty windows, zero denominators)
/// degrades to zeros or `None` instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A segmented schedule with no segments has no rate to continue with.
    EmptySchedule,
    /// Segment durations must be a positive, finite number of years.
    NonPositiveSegmentYears { index: usize, years: f64 },
    /// Segment rates must be finite.
    NonFiniteSegmentRate { index: usize, rate: f64 },
    /// Forecast offsets run forward from the as-of instant.
    NegativeYearOffset(i32),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::EmptySchedule => {
                write!(f, "appreciation schedule has no segments")
            }
            ForecastError::NonPositiveSegmentYears { index, years } => {
                write!(
                    f,
                    "appreciation segment {index} has non-positive duration ({years} years)"
                )
            }
            ForecastError::NonFiniteSegmentRate { index, rate } => {
                write!(f, "appreciation segment {index} has non-finite rate ({rate})")
            }
            ForecastError::NegativeYearOffset(offset) => {
                write!(f, "forecast year offset {offset} is negative")
            }
        }
    }
}

impl std::error::Error for ForecastError {}

pub type Result<T> = std::result::Result<T, ForecastError>;
