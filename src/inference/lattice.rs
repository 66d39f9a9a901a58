//! Property type lattice and the widening transition
//!
//! Field types move through an ordered lattice and only ever become more
//! general: `Untyped` < {`Boolean`, `Integer`, `Integer64`, `Real`} <
//! `String`, with a list counterpart for every scalar state and all list
//! states below `StringList`. [`widen`] is the single transition function;
//! it is monotonic and idempotent over any token sequence.

use serde::{Deserialize, Serialize};

use super::classify::{ValueKind, classify, fits_in_i32, parse_integer};

/// Position in the field type lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    /// No non-empty value observed yet
    Untyped,
    /// Only "true"/"false" tokens observed
    Boolean,
    /// Integers within the 32-bit signed range
    Integer,
    /// Integers outside the 32-bit signed range
    Integer64,
    /// Floating-point values
    Real,
    /// Arbitrary text
    String,
    /// Multi-valued boolean
    BooleanList,
    /// Multi-valued 32-bit integer
    IntegerList,
    /// Multi-valued 64-bit integer
    Integer64List,
    /// Multi-valued floating-point
    RealList,
    /// Multi-valued text
    StringList,
}

impl PropertyType {
    /// Whether this is one of the list states
    pub fn is_list(self) -> bool {
        matches!(
            self,
            PropertyType::BooleanList
                | PropertyType::IntegerList
                | PropertyType::Integer64List
                | PropertyType::RealList
                | PropertyType::StringList
        )
    }

    /// The list counterpart of a scalar state.
    ///
    /// Identity on `Untyped` and on states that are already lists.
    pub fn to_list(self) -> PropertyType {
        match self {
            PropertyType::Boolean => PropertyType::BooleanList,
            PropertyType::Integer => PropertyType::IntegerList,
            PropertyType::Integer64 => PropertyType::Integer64List,
            PropertyType::Real => PropertyType::RealList,
            PropertyType::String => PropertyType::StringList,
            other => other,
        }
    }

    /// Rank in the "at-least-as-general-as" order.
    ///
    /// Every transition [`widen`] performs is non-decreasing under this
    /// rank; the tests lean on that to check monotonicity.
    pub fn generality(self) -> u8 {
        match self {
            PropertyType::Untyped => 0,
            PropertyType::Boolean | PropertyType::Integer => 1,
            PropertyType::Integer64 => 2,
            PropertyType::Real => 3,
            PropertyType::String => 4,
            PropertyType::BooleanList | PropertyType::IntegerList => 5,
            PropertyType::Integer64List => 6,
            PropertyType::RealList => 7,
            PropertyType::StringList => 8,
        }
    }
}

/// Widen a field's type for one raw sub-value.
///
/// `occurrence_index` is the sub-value's position within its property
/// occurrence; any index past the first promotes the current scalar state to
/// its list counterpart before the token is looked at (`Untyped` is not
/// promoted, and promotion to `StringList` clears the width). Empty tokens
/// are then ignored entirely. `width` is grown to the token length only when
/// the resulting state is `String` and `track_widths` is set.
pub fn widen(
    ty: &mut PropertyType,
    width: &mut usize,
    occurrence_index: usize,
    token: &str,
    track_widths: bool,
) {
    if occurrence_index > 0 {
        let promoted = ty.to_list();
        if promoted != *ty {
            if *ty == PropertyType::String {
                *width = 0;
            }
            *ty = promoted;
        }
    }

    // A zero-length token deduces nothing.
    if token.is_empty() {
        return;
    }

    let kind = classify(token);
    let mut is_real = false;

    if kind == ValueKind::String
        && *ty != PropertyType::String
        && *ty != PropertyType::StringList
    {
        let is_boolean_token = token == "true" || token == "false";
        if (*ty == PropertyType::Untyped || *ty == PropertyType::Boolean) && is_boolean_token {
            *ty = PropertyType::Boolean;
        } else if *ty == PropertyType::BooleanList {
            if !is_boolean_token {
                *ty = PropertyType::StringList;
            }
        } else if matches!(
            *ty,
            PropertyType::IntegerList | PropertyType::Integer64List | PropertyType::RealList
        ) {
            *ty = PropertyType::StringList;
        } else {
            *ty = PropertyType::String;
        }
    } else if kind != ValueKind::String {
        is_real = kind == ValueKind::Real;
    }

    if *ty == PropertyType::String {
        if track_widths && *width < token.len() {
            *width = token.len();
        }
    } else if matches!(
        *ty,
        PropertyType::Untyped | PropertyType::Integer | PropertyType::Integer64
    ) {
        if is_real {
            *ty = PropertyType::Real;
        } else if *ty != PropertyType::Integer64 {
            *ty = if fits_in_i32(parse_integer(token)) {
                PropertyType::Integer
            } else {
                PropertyType::Integer64
            };
        }
    } else if matches!(*ty, PropertyType::IntegerList | PropertyType::Integer64List) && is_real {
        *ty = PropertyType::RealList;
    } else if *ty == PropertyType::IntegerList
        && kind == ValueKind::Integer
        && !fits_in_i32(parse_integer(token))
    {
        *ty = PropertyType::Integer64List;
    }
}
