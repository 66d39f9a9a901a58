//! Record and feature value types

use serde::{Deserialize, Serialize};

use super::geometry::Geometry;

/// Identifier assigned by the external store when a feature is committed
pub type FeatureId = u64;

/// An already-typed scalar attribute value from a structured record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ScalarValue {
    /// Render the value as text, for fields that widened to a string type.
    ///
    /// Reals use the shortest representation that round-trips.
    pub fn to_text(&self) -> String {
        match self {
            ScalarValue::Integer(v) => v.to_string(),
            ScalarValue::Real(v) => v.to_string(),
            ScalarValue::Text(s) => s.clone(),
        }
    }
}

/// One structured record: ordered attribute pairs plus an optional opaque
/// geometry content index resolved by the external geometry resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecord {
    /// Attribute pairs in document order
    pub attributes: Vec<(String, ScalarValue)>,
    /// Content index of the record's geometry, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_ref: Option<i64>,
}

impl StructuredRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute pair
    pub fn push(&mut self, name: impl Into<String>, value: ScalarValue) {
        self.attributes.push((name.into(), value));
    }

    /// Set the geometry content index
    pub fn with_geometry_ref(mut self, content_index: i64) -> Self {
        self.geometry_ref = Some(content_index);
        self
    }
}

/// One occurrence of a named text property with its raw sub-values.
///
/// Ephemeral: consumed by the inference step and not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProperty {
    /// Property name
    pub name: String,
    /// Raw sub-values in document order; empty strings are legal and carry
    /// no type information
    pub values: Vec<String>,
}

impl RawProperty {
    /// Create a property occurrence from its name and sub-values
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A transient feature built during emission and handed to the store.
///
/// The core drops the feature after commit; it keeps no ownership of
/// persisted data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    values: Vec<(usize, ScalarValue)>,
    geometry: Option<Geometry>,
}

impl Feature {
    /// Create an empty feature
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a value for a field index.
    ///
    /// Writing the same index again replaces the earlier value; a feature
    /// holds at most one value per field.
    pub fn set_value(&mut self, field_index: usize, value: ScalarValue) {
        if let Some((_, existing)) = self
            .values
            .iter_mut()
            .find(|(index, _)| *index == field_index)
        {
            *existing = value;
        } else {
            self.values.push((field_index, value));
        }
    }

    /// Attach a geometry
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    /// Field values in write order
    pub fn values(&self) -> &[(usize, ScalarValue)] {
        &self.values
    }

    /// Value written for a field index, if any
    pub fn value(&self, field_index: usize) -> Option<&ScalarValue> {
        self.values
            .iter()
            .find(|(index, _)| *index == field_index)
            .map(|(_, value)| value)
    }

    /// The attached geometry, if any
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }
}
