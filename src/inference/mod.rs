//! Incremental schema inference
//!
//! Maintains a single evolving tabular schema across everything seen in one
//! ingestion session, widening field types only when a value forces it.
//! Two inference policies coexist:
//!
//! - **Text attributes** - raw string sub-values are classified and pushed
//!   through the full type lattice ([`widen`]), including list promotion
//!   for multi-valued occurrences.
//! - **Structured scalars** - already-typed values use the coarser pairwise
//!   merge ([`merge_scalar_types`]), where any kind mismatch collapses
//!   straight to `String`.
//!
//! The two policies deliberately stay separate; each matches the shape of
//! its source, and neither falls back to the other.

mod classify;
mod config;
mod error;
mod lattice;
mod merge;
mod registry;

pub use classify::{ValueKind, classify, parse_integer};
pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use error::IngestError;
pub use lattice::{PropertyType, widen};
pub use merge::{merge_scalar_types, observed_type};
pub use registry::{FieldDefinition, FieldSchemaRegistry, GeometryFieldDefinition};
