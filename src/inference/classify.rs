//! Token classification for raw text values

use serde::{Deserialize, Serialize};

/// Scalar kind observed in a single raw text token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Optionally-signed integer literal
    Integer,
    /// Floating-point literal (decimal point and/or exponent)
    Real,
    /// Anything else
    String,
}

/// Classify one non-empty raw text token.
///
/// `Integer` iff the token fully parses as an optionally-signed integer
/// literal, `Real` iff it fully parses as a floating-point literal, else
/// `String`. Empty tokens must be skipped by the caller; they carry no type
/// information.
pub fn classify(token: &str) -> ValueKind {
    let bytes = token.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }

    let mut has_dot = false;
    if i < bytes.len() && bytes[i] == b'.' {
        has_dot = true;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }

    if mantissa_digits == 0 {
        return ValueKind::String;
    }

    let mut has_exponent = false;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        has_exponent = true;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let mut exponent_digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            exponent_digits += 1;
        }
        if exponent_digits == 0 {
            return ValueKind::String;
        }
    }

    if i != bytes.len() {
        return ValueKind::String;
    }

    if has_dot || has_exponent {
        ValueKind::Real
    } else {
        ValueKind::Integer
    }
}

/// Parse an integer token, saturating at the i64 bounds on overflow.
///
/// Only meaningful for tokens that [`classify`] as `Integer`; an overly long
/// digit string still counts as an integer and saturates, which keeps it out
/// of the 32-bit range on the widening path.
pub fn parse_integer(token: &str) -> i64 {
    match token.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            if token.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

/// Whether an integer value fits the 32-bit signed range
pub(crate) fn fits_in_i32(value: i64) -> bool {
    i32::try_from(value).is_ok()
}
