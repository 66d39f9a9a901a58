//! Pairwise type merging for the structured-record path
//!
//! Structured records carry already-typed scalar values, so there is no
//! multi-value promotion and no Boolean state on this path. Any scalar-kind
//! mismatch against an existing field collapses straight to `String`; the
//! finer Integer/Real granularity of the text-attribute lattice is
//! deliberately absent here.

use super::lattice::PropertyType;
use crate::models::ScalarValue;

/// The lattice position a structured scalar value occupies on its own.
///
/// The declared kind is taken at face value: integers observe `Integer`
/// even outside the 32-bit range.
pub fn observed_type(value: &ScalarValue) -> PropertyType {
    match value {
        ScalarValue::Integer(_) => PropertyType::Integer,
        ScalarValue::Real(_) => PropertyType::Real,
        ScalarValue::Text(_) => PropertyType::String,
    }
}

/// Merge an observed scalar type into an existing field type.
///
/// Equal types and string-typed fields are left unchanged; everything else
/// widens to `String`.
pub fn merge_scalar_types(existing: PropertyType, observed: PropertyType) -> PropertyType {
    if existing == observed || existing == PropertyType::String {
        existing
    } else {
        PropertyType::String
    }
}
