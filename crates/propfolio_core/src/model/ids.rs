//! Identifier types for the multi-property layer.
//!
//! The property is the join key across event collections; nothing in the
//! engine owns anything else.

use serde::{Deserialize, Serialize};

/// Opaque property identifier, assigned by the event loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u32);

/// Composite key for per-property, per-calendar-year results.
///
/// A value type with defined equality, rather than a concatenated string
/// key, so lookups cannot collide on formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyYearKey {
    pub property_id: PropertyId,
    pub year: i16,
}
