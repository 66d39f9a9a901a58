//! Value types shared across the ingestion pipeline

mod geometry;
mod record;

pub use geometry::{Geometry, GeometryType};
pub use record::{Feature, FeatureId, RawProperty, ScalarValue, StructuredRecord};
