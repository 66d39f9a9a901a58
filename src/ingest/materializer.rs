//! Record materialization
//!
//! [`RecordMaterializer`] orchestrates one ingestion session: classification,
//! schema updates, feature emission and consistency tracking. Type inference
//! is global across every record the session has seen, not per-record. Two
//! ingestion modes share the session state:
//!
//! - **Text attributes** ([`analyze_markup_property`]) evolve the schema
//!   from raw string sub-values; feature construction on that path is the
//!   caller's concern.
//! - **Structured records** ([`ingest_structured`]) converge the schema over
//!   the whole record first, then emit a feature to the external store.
//!
//! The session owns the registry and trackers exclusively; hosts that
//! parallelize ingestion within one layer must serialize all calls into one
//! materializer.
//!
//! [`analyze_markup_property`]: RecordMaterializer::analyze_markup_property
//! [`ingest_structured`]: RecordMaterializer::ingest_structured

use serde::{Deserialize, Serialize};

use super::document::structured_record_from_json;
use super::store::{FeatureStore, GeometryResolver};
use crate::consistency::{GeometryTypeHint, GeometryTypeTracker};
use crate::inference::{
    FieldSchemaRegistry, InferenceConfig, IngestError, PropertyType, merge_scalar_types,
    observed_type,
};
use crate::models::{Feature, FeatureId, RawProperty, ScalarValue, StructuredRecord};

/// Name of the lazily created default geometry property
const DEFAULT_GEOMETRY_FIELD: &str = "geometry";

/// Counters for one ingestion session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestStats {
    /// Structured records processed
    pub records_processed: usize,
    /// Records skipped as malformed
    pub records_skipped: usize,
    /// Features committed to the store
    pub features_committed: usize,
    /// Fields in the inferred schema
    pub fields_discovered: usize,
}

/// Session-scoped ingestion orchestrator
#[derive(Debug, Default)]
pub struct RecordMaterializer {
    config: InferenceConfig,
    registry: FieldSchemaRegistry,
    geometry_types: GeometryTypeTracker,
    records_processed: usize,
    records_skipped: usize,
    features_committed: usize,
}

impl RecordMaterializer {
    /// Create a materializer with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a materializer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The evolving schema
    pub fn registry(&self) -> &FieldSchemaRegistry {
        &self.registry
    }

    /// The geometry type the store should declare for the collection
    pub fn geometry_type_hint(&self) -> GeometryTypeHint {
        self.geometry_types.hint()
    }

    /// Session counters
    pub fn stats(&self) -> IngestStats {
        IngestStats {
            records_processed: self.records_processed,
            records_skipped: self.records_skipped,
            features_committed: self.features_committed,
            fields_discovered: self.registry.len(),
        }
    }

    /// Evolve the schema from one text property occurrence.
    ///
    /// The field is created as `Untyped` on first sight, then every raw
    /// sub-value runs through the widening transition at its occurrence
    /// index.
    pub fn analyze_markup_property(&mut self, property: &RawProperty) -> Result<(), IngestError> {
        let index = match self.registry.lookup(&property.name) {
            Some(index) => index,
            None => self
                .registry
                .create_field(&property.name, PropertyType::Untyped)?,
        };
        self.registry
            .analyze_property(index, property, self.config.track_widths)
    }

    /// Evolve the schema from a stream of text property occurrences
    pub fn analyze_markup_source(
        &mut self,
        source: impl IntoIterator<Item = RawProperty>,
    ) -> Result<(), IngestError> {
        for property in source {
            self.analyze_markup_property(&property)?;
        }
        Ok(())
    }

    /// Merge a spatial-reference name observed for the default geometry
    /// property of this session
    pub fn merge_srs_name(&mut self, srs_name: &str) -> Result<(), IngestError> {
        let index = match self.registry.lookup_geometry(DEFAULT_GEOMETRY_FIELD) {
            Some(index) => index,
            None => self.registry.create_geometry_field(DEFAULT_GEOMETRY_FIELD)?,
        };
        self.registry.merge_srs_name(index, srs_name)
    }

    /// Ingest one structured record: converge the schema over every
    /// attribute pair first, then emit a feature to the store.
    ///
    /// Schema convergence completes for the whole record before any value
    /// is written, so a conflict seen late in the record still shapes every
    /// value of this record. A missing geometry content index is non-fatal;
    /// the feature is committed without geometry. Store failures propagate
    /// and are not rolled back: schema changes from the first pass stand.
    pub fn ingest_structured<R: GeometryResolver, S: FeatureStore>(
        &mut self,
        record: &StructuredRecord,
        resolver: &R,
        store: &mut S,
    ) -> Result<FeatureId, IngestError> {
        self.records_processed += 1;

        // Pass 1: schema convergence.
        for (name, value) in &record.attributes {
            let observed = observed_type(value);
            match self.registry.lookup(name) {
                None => {
                    let index = self.registry.create_field(name, observed)?;
                    if self.config.track_widths {
                        if let ScalarValue::Text(text) = value {
                            self.registry.grow_width(index, text.len())?;
                        }
                    }
                    if let Some(definition) = self.registry.field(index) {
                        store.create_field(definition)?;
                    }
                }
                Some(index) => {
                    let existing = self
                        .registry
                        .field(index)
                        .map(|definition| definition.ty)
                        .unwrap_or(PropertyType::Untyped);
                    let merged = merge_scalar_types(existing, observed);
                    if merged != existing {
                        self.registry.widen_field_type(index, merged)?;
                        store.alter_field_type(index, merged)?;
                    }
                    if self.config.track_widths {
                        if let ScalarValue::Text(text) = value {
                            self.registry.grow_width(index, text.len())?;
                        }
                    }
                }
            }
        }

        // Pass 2: feature emission against the converged schema.
        let mut feature = Feature::new();
        for (name, value) in &record.attributes {
            let Some(index) = self.registry.lookup(name) else {
                continue;
            };
            let field_type = self
                .registry
                .field(index)
                .map(|definition| definition.ty)
                .unwrap_or(PropertyType::Untyped);
            let coerced = if field_type == PropertyType::String
                && !matches!(value, ScalarValue::Text(_))
            {
                let text = value.to_text();
                if self.config.track_widths {
                    self.registry.grow_width(index, text.len())?;
                }
                ScalarValue::Text(text)
            } else {
                value.clone()
            };
            feature.set_value(index, coerced);
        }

        if let Some(content_index) = record.geometry_ref {
            match resolver.resolve_by_content_index(content_index) {
                Some(geometry) => {
                    self.geometry_types.observe(geometry.geometry_type);
                    if let Some(srs_name) = geometry.srs_name.clone() {
                        self.merge_srs_name(&srs_name)?;
                    }
                    feature.set_geometry(geometry);
                }
                None => {
                    tracing::debug!(
                        "no geometry for content index {}; emitting feature without geometry",
                        content_index
                    );
                }
            }
        }

        let feature_id = store.commit_feature(feature)?;
        self.features_committed += 1;
        Ok(feature_id)
    }

    /// Ingest a batch of structured records, honoring the sample limit
    pub fn ingest_structured_batch<R: GeometryResolver, S: FeatureStore>(
        &mut self,
        records: impl IntoIterator<Item = StructuredRecord>,
        resolver: &R,
        store: &mut S,
    ) -> Result<(), IngestError> {
        for record in records {
            if self.sample_limit_reached() {
                break;
            }
            self.ingest_structured(&record, resolver, store)?;
        }
        Ok(())
    }

    /// Ingest a batch of JSON documents with their geometry content
    /// indexes.
    ///
    /// Malformed documents are skipped with a warning and counted; store
    /// rejections propagate.
    pub fn ingest_json_batch<R: GeometryResolver, S: FeatureStore>(
        &mut self,
        records: impl IntoIterator<Item = (serde_json::Value, Option<i64>)>,
        resolver: &R,
        store: &mut S,
    ) -> Result<(), IngestError> {
        for (value, geometry_ref) in records {
            if self.sample_limit_reached() {
                break;
            }
            match structured_record_from_json(&value, geometry_ref) {
                Ok(record) => {
                    self.ingest_structured(&record, resolver, store)?;
                }
                Err(IngestError::MalformedRecord(reason)) => {
                    tracing::warn!("skipping malformed record: {}", reason);
                    self.records_skipped += 1;
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn sample_limit_reached(&self) -> bool {
        self.config.sample_size > 0 && self.records_processed >= self.config.sample_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::MemoryFeatureStore;
    use crate::models::{Geometry, GeometryType};
    use std::collections::HashMap;

    fn no_geometries() -> HashMap<i64, Geometry> {
        HashMap::new()
    }

    #[test]
    fn test_markup_field_created_untyped_then_widened() {
        let mut materializer = RecordMaterializer::new();
        materializer
            .analyze_markup_property(&RawProperty::new("depth", vec!["12".into()]))
            .unwrap();
        materializer
            .analyze_markup_property(&RawProperty::new("depth", vec!["3.5".into()]))
            .unwrap();

        let field = &materializer.registry().fields()[0];
        assert_eq!(field.name, "depth");
        assert_eq!(field.ty, PropertyType::Real);
    }

    #[test]
    fn test_structured_record_creates_fields_in_order() {
        let mut materializer = RecordMaterializer::new();
        let mut store = MemoryFeatureStore::new();

        let mut record = StructuredRecord::new();
        record.push("b", ScalarValue::Integer(1));
        record.push("a", ScalarValue::Text("x".into()));
        materializer
            .ingest_structured(&record, &no_geometries(), &mut store)
            .unwrap();

        let names: Vec<_> = store.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn test_conflict_late_in_record_shapes_earlier_value() {
        // The same field appears twice in one record with conflicting
        // kinds; the first pass must converge before any value is written,
        // and the later write wins the field.
        let mut materializer = RecordMaterializer::new();
        let mut store = MemoryFeatureStore::new();

        let mut record = StructuredRecord::new();
        record.push("x", ScalarValue::Integer(5));
        record.push("x", ScalarValue::Real(2.5));
        materializer
            .ingest_structured(&record, &no_geometries(), &mut store)
            .unwrap();

        let feature = &store.features()[0];
        assert_eq!(feature.values().len(), 1);
        assert_eq!(feature.value(0), Some(&ScalarValue::Text("2.5".into())));
    }

    #[test]
    fn test_unresolvable_geometry_is_non_fatal() {
        let mut materializer = RecordMaterializer::new();
        let mut store = MemoryFeatureStore::new();

        let record = StructuredRecord::new().with_geometry_ref(99);
        materializer
            .ingest_structured(&record, &no_geometries(), &mut store)
            .unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.features()[0].geometry().is_none());
        assert_eq!(materializer.geometry_type_hint(), GeometryTypeHint::Undeclared);
    }

    #[test]
    fn test_geometry_srs_names_feed_default_geometry_field() {
        let mut materializer = RecordMaterializer::new();
        let mut store = MemoryFeatureStore::new();
        let mut geometries = HashMap::new();
        geometries.insert(
            1,
            Geometry::new(GeometryType::Point).with_srs_name("EPSG:4326"),
        );
        geometries.insert(
            2,
            Geometry::new(GeometryType::Point).with_srs_name("EPSG:3857"),
        );

        for content_index in [1, 2] {
            let record = StructuredRecord::new().with_geometry_ref(content_index);
            materializer
                .ingest_structured(&record, &geometries, &mut store)
                .unwrap();
        }

        let geometry_field = &materializer.registry().geometry_fields()[0];
        assert!(!geometry_field.srs.is_consistent());
    }

    #[test]
    fn test_batch_sample_limit() {
        let config = InferenceConfig::builder().sample_size(2).build();
        let mut materializer = RecordMaterializer::with_config(config);
        let mut store = MemoryFeatureStore::new();

        let records = (0..5).map(|i| {
            let mut record = StructuredRecord::new();
            record.push("n", ScalarValue::Integer(i));
            record
        });
        materializer
            .ingest_structured_batch(records, &no_geometries(), &mut store)
            .unwrap();

        assert_eq!(materializer.stats().records_processed, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_json_batch_skips_malformed() {
        let mut materializer = RecordMaterializer::new();
        let mut store = MemoryFeatureStore::new();

        let records = vec![
            (serde_json::json!({"a": 1}), None),
            (serde_json::json!("not a record"), None),
            (serde_json::json!({"a": 2}), None),
        ];
        materializer
            .ingest_json_batch(records, &no_geometries(), &mut store)
            .unwrap();

        let stats = materializer.stats();
        assert_eq!(stats.records_processed, 2);
        assert_eq!(stats.records_skipped, 1);
        assert_eq!(stats.features_committed, 2);
    }
}
