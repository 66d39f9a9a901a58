//! External collaborator seams for feature emission
//!
//! The core hands schema changes and completed features to a
//! [`FeatureStore`] and resolves geometry back-references through a
//! [`GeometryResolver`]. [`MemoryFeatureStore`] is a reference in-memory
//! implementation used by the tests and available to hosts that do not need
//! persistence.

use std::collections::HashMap;

use crate::inference::{FieldDefinition, IngestError, PropertyType};
use crate::models::{Feature, FeatureId, Geometry};

/// Resolves an opaque geometry content index to a geometry
pub trait GeometryResolver {
    /// The geometry marked with this content index, if any
    fn resolve_by_content_index(&self, content_index: i64) -> Option<Geometry>;
}

/// A resolver over a prepared content-index map
impl GeometryResolver for HashMap<i64, Geometry> {
    fn resolve_by_content_index(&self, content_index: i64) -> Option<Geometry> {
        self.get(&content_index).cloned()
    }
}

/// Tabular store receiving the inferred schema and the emitted features.
///
/// Field indexes follow the registry's first-seen order; `alter_field_type`
/// is only ever called with a type at least as general as the current one.
pub trait FeatureStore {
    /// Declare a new field at the end of the schema
    fn create_field(&mut self, definition: &FieldDefinition) -> Result<(), IngestError>;

    /// Widen an existing field's declared type
    fn alter_field_type(
        &mut self,
        field_index: usize,
        new_type: PropertyType,
    ) -> Result<(), IngestError>;

    /// Persist a completed feature, returning its assigned id
    fn commit_feature(&mut self, feature: Feature) -> Result<FeatureId, IngestError>;
}

/// In-memory reference implementation of [`FeatureStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryFeatureStore {
    fields: Vec<FieldDefinition>,
    features: Vec<Feature>,
}

impl MemoryFeatureStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared fields in creation order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Committed features in commit order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of committed features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no features have been committed
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureStore for MemoryFeatureStore {
    fn create_field(&mut self, definition: &FieldDefinition) -> Result<(), IngestError> {
        self.fields.push(definition.clone());
        Ok(())
    }

    fn alter_field_type(
        &mut self,
        field_index: usize,
        new_type: PropertyType,
    ) -> Result<(), IngestError> {
        let field = self
            .fields
            .get_mut(field_index)
            .ok_or_else(|| IngestError::StoreRejection {
                operation: "alter_field_type",
                message: format!("no field at index {field_index}"),
            })?;
        field.ty = new_type;
        Ok(())
    }

    fn commit_feature(&mut self, feature: Feature) -> Result<FeatureId, IngestError> {
        self.features.push(feature);
        Ok(self.features.len() as FeatureId - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScalarValue;

    #[test]
    fn test_memory_store_assigns_sequential_ids() {
        let mut store = MemoryFeatureStore::new();
        store
            .create_field(&FieldDefinition::new("x", PropertyType::Integer))
            .unwrap();

        let mut feature = Feature::new();
        feature.set_value(0, ScalarValue::Integer(1));
        assert_eq!(store.commit_feature(feature).unwrap(), 0);
        assert_eq!(store.commit_feature(Feature::new()).unwrap(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_memory_store_rejects_unknown_field_index() {
        let mut store = MemoryFeatureStore::new();
        assert!(matches!(
            store.alter_field_type(0, PropertyType::String),
            Err(IngestError::StoreRejection { .. })
        ));
    }

    #[test]
    fn test_map_resolver() {
        let mut geometries = HashMap::new();
        geometries.insert(4, Geometry::new(crate::models::GeometryType::Point));
        assert!(geometries.resolve_by_content_index(4).is_some());
        assert!(geometries.resolve_by_content_index(5).is_none());
    }
}
