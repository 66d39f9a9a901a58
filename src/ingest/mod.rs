//! Record ingestion orchestration and external collaborator seams

mod document;
mod materializer;
mod store;

pub use document::structured_record_from_json;
pub use materializer::{IngestStats, RecordMaterializer};
pub use store::{FeatureStore, GeometryResolver, MemoryFeatureStore};
