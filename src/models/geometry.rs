//! Geometry values as seen by the inference core
//!
//! Geometry construction from raw coordinates is an upstream concern; the
//! core only looks at a resolved geometry's type and spatial-reference name.

use serde::{Deserialize, Serialize};

/// Geometry type of a resolved geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// A geometry handed back by the external resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    /// Geometry type
    pub geometry_type: GeometryType,
    /// Spatial-reference name the geometry was declared in, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srs_name: Option<String>,
}

impl Geometry {
    /// Create a geometry without a spatial-reference name
    pub fn new(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            srs_name: None,
        }
    }

    /// Attach a spatial-reference name
    pub fn with_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.srs_name = Some(srs_name.into());
        self
    }
}
