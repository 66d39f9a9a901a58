//! Geo Schema Core - Incremental schema inference for semi-structured
//! geospatial record ingestion
//!
//! Maintains one evolving tabular schema (named, ordered, typed fields)
//! across everything an ingestion session has seen, widening field types
//! only when a value forces it, and tracks geometry-type and
//! spatial-reference consistency alongside.
//!
//! Two source shapes are supported:
//!
//! - **Structured records** - dictionary-shaped records whose attributes
//!   carry already-typed scalars, with an optional opaque geometry
//!   back-reference resolved through an external collaborator.
//! - **Text attributes** - property occurrences carrying one or more raw
//!   string sub-values with no declared type.
//!
//! Parsing the container document, building geometries from coordinates,
//! transforming coordinate reference systems and persisting features are
//! all upstream/downstream concerns; this crate only infers and tracks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use geo_schema_core::{MemoryFeatureStore, RecordMaterializer, ScalarValue, StructuredRecord};
//!
//! let mut materializer = RecordMaterializer::new();
//! let mut store = MemoryFeatureStore::new();
//! let geometries = std::collections::HashMap::new();
//!
//! let mut record = StructuredRecord::new();
//! record.push("name", ScalarValue::Text("Berlin".into()));
//! record.push("population", ScalarValue::Integer(3_878_100));
//! materializer.ingest_structured(&record, &geometries, &mut store)?;
//! ```

pub mod consistency;
pub mod inference;
pub mod ingest;
pub mod models;

// Re-export commonly used types
pub use consistency::{GeometryTypeHint, GeometryTypeTracker, SrsNameTracker};
pub use inference::{
    FieldDefinition, FieldSchemaRegistry, GeometryFieldDefinition, InferenceConfig,
    InferenceConfigBuilder, IngestError, PropertyType, ValueKind, classify, merge_scalar_types,
    observed_type, parse_integer, widen,
};
pub use ingest::{
    FeatureStore, GeometryResolver, IngestStats, MemoryFeatureStore, RecordMaterializer,
    structured_record_from_json,
};
pub use models::{
    Feature, FeatureId, Geometry, GeometryType, RawProperty, ScalarValue, StructuredRecord,
};
