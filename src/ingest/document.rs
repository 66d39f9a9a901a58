//! Structured-record adapter for JSON documents
//!
//! Hosts that read dictionary-shaped records out of a parsed document hand
//! them to the materializer as [`StructuredRecord`]s. This adapter covers
//! the common case of records already decoded into `serde_json` values.

use serde_json::Value;

use crate::inference::IngestError;
use crate::models::{ScalarValue, StructuredRecord};

/// Build a structured record from a JSON object.
///
/// Scalar members map onto their declared kinds (booleans become their
/// lowercase text form, matching how boolean attributes surface on the
/// structured path). Null, array and object members carry no scalar value
/// and are skipped. A non-object document is a malformed record.
pub fn structured_record_from_json(
    value: &Value,
    geometry_ref: Option<i64>,
) -> Result<StructuredRecord, IngestError> {
    let object = value.as_object().ok_or_else(|| {
        IngestError::MalformedRecord(format!("expected object, found {}", value_type_name(value)))
    })?;

    let mut record = StructuredRecord::new();
    record.geometry_ref = geometry_ref;

    for (name, member) in object {
        match member {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    record.push(name, ScalarValue::Integer(i));
                } else if let Some(f) = n.as_f64() {
                    record.push(name, ScalarValue::Real(f));
                }
            }
            Value::String(s) => record.push(name, ScalarValue::Text(s.clone())),
            Value::Bool(b) => record.push(name, ScalarValue::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                tracing::debug!(attribute = %name, "skipping non-scalar attribute");
            }
        }
    }

    Ok(record)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
