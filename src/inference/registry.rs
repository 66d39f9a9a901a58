//! Ordered field schema registry
//!
//! Owns every field definition of one ingestion session. Fields are created
//! once, widened in place, and kept in first-seen order; that order is an
//! observable contract with the external store.

use serde::{Deserialize, Serialize};

use super::error::IngestError;
use super::lattice::{self, PropertyType};
use crate::consistency::SrsNameTracker;
use crate::models::RawProperty;

/// Definition of one attribute field in the inferred schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field name, unique within the registry
    pub name: String,
    /// Current lattice position
    pub ty: PropertyType,
    /// Maximum observed string length; meaningful only for string types
    pub width: usize,
    /// Numeric precision; carried for the store, not inferred here
    pub precision: usize,
    /// Whether the field may be null
    pub nullable: bool,
}

impl FieldDefinition {
    /// Create a field definition at a lattice position
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            width: 0,
            precision: 0,
            nullable: true,
        }
    }
}

/// Definition of one geometry property of the session.
///
/// Carries the spatial-reference consistency state for geometries merged
/// under this property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryFieldDefinition {
    /// Geometry property name
    pub name: String,
    /// Whether the geometry may be absent
    pub nullable: bool,
    /// Spatial-reference name consistency across merged fragments
    pub srs: SrsNameTracker,
}

impl GeometryFieldDefinition {
    /// Create a geometry field definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            srs: SrsNameTracker::new(),
        }
    }
}

/// Ordered collection of field definitions for one ingestion session
#[derive(Debug, Clone, Default)]
pub struct FieldSchemaRegistry {
    fields: Vec<FieldDefinition>,
    geometry_fields: Vec<GeometryFieldDefinition>,
}

impl FieldSchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the field with this exact name, if present
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Append a new field; fails if the name is already taken.
    ///
    /// Returns the new field's index.
    pub fn create_field(
        &mut self,
        name: &str,
        ty: PropertyType,
    ) -> Result<usize, IngestError> {
        if self.lookup(name).is_some() {
            return Err(IngestError::DuplicateField {
                name: name.to_string(),
            });
        }
        tracing::debug!(field = name, ?ty, "creating field");
        self.fields.push(FieldDefinition::new(name, ty));
        Ok(self.fields.len() - 1)
    }

    /// Widen a field's type in place.
    ///
    /// Only strictly-more-general moves are applied; narrowing attempts and
    /// sideways moves between equally general types (Integer vs Boolean)
    /// are ignored.
    pub fn widen_field_type(
        &mut self,
        index: usize,
        new_ty: PropertyType,
    ) -> Result<(), IngestError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(IngestError::FieldIndexOutOfRange { index, len })?;
        if new_ty != field.ty && new_ty.generality() > field.ty.generality() {
            tracing::debug!(field = %field.name, from = ?field.ty, to = ?new_ty, "widening field type");
            field.ty = new_ty;
        }
        Ok(())
    }

    /// Grow a field's width to at least `new_width`
    pub fn grow_width(&mut self, index: usize, new_width: usize) -> Result<(), IngestError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(IngestError::FieldIndexOutOfRange { index, len })?;
        if field.width < new_width {
            field.width = new_width;
        }
        Ok(())
    }

    /// Run the widening transition over one property occurrence's sub-values
    pub fn analyze_property(
        &mut self,
        index: usize,
        property: &RawProperty,
        track_widths: bool,
    ) -> Result<(), IngestError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(IngestError::FieldIndexOutOfRange { index, len })?;
        for (occurrence_index, value) in property.values.iter().enumerate() {
            lattice::widen(
                &mut field.ty,
                &mut field.width,
                occurrence_index,
                value,
                track_widths,
            );
        }
        Ok(())
    }

    /// The field at an index
    pub fn field(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields.get(index)
    }

    /// All fields in first-seen order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Number of attribute fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry holds no attribute fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Index of the geometry field with this exact name, if present
    pub fn lookup_geometry(&self, name: &str) -> Option<usize> {
        self.geometry_fields
            .iter()
            .position(|field| field.name == name)
    }

    /// Append a new geometry field; fails if the name is already taken
    pub fn create_geometry_field(&mut self, name: &str) -> Result<usize, IngestError> {
        if self.lookup_geometry(name).is_some() {
            return Err(IngestError::DuplicateField {
                name: name.to_string(),
            });
        }
        self.geometry_fields.push(GeometryFieldDefinition::new(name));
        Ok(self.geometry_fields.len() - 1)
    }

    /// Merge a spatial-reference name into a geometry field's tracker
    pub fn merge_srs_name(&mut self, index: usize, srs_name: &str) -> Result<(), IngestError> {
        let len = self.geometry_fields.len();
        let field = self
            .geometry_fields
            .get_mut(index)
            .ok_or(IngestError::FieldIndexOutOfRange { index, len })?;
        field.srs.merge(srs_name);
        Ok(())
    }

    /// All geometry fields in first-seen order
    pub fn geometry_fields(&self) -> &[GeometryFieldDefinition] {
        &self.geometry_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_first_seen_order() {
        let mut registry = FieldSchemaRegistry::new();
        registry.create_field("b", PropertyType::Integer).unwrap();
        registry.create_field("a", PropertyType::String).unwrap();
        registry.create_field("c", PropertyType::Real).unwrap();

        let names: Vec<_> = registry.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(registry.lookup("a"), Some(1));
        assert_eq!(registry.lookup("A"), None); // Exact match only.
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut registry = FieldSchemaRegistry::new();
        registry.create_field("x", PropertyType::Integer).unwrap();
        assert!(matches!(
            registry.create_field("x", PropertyType::Real),
            Err(IngestError::DuplicateField { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_widen_ignores_narrowing() {
        let mut registry = FieldSchemaRegistry::new();
        let idx = registry.create_field("x", PropertyType::String).unwrap();
        registry.widen_field_type(idx, PropertyType::Integer).unwrap();
        assert_eq!(registry.field(idx).unwrap().ty, PropertyType::String);
    }

    #[test]
    fn test_widen_ignores_sideways_moves() {
        // Integer and Boolean are equally general; neither widens the other.
        let mut registry = FieldSchemaRegistry::new();
        let idx = registry.create_field("x", PropertyType::Integer).unwrap();
        registry.widen_field_type(idx, PropertyType::Boolean).unwrap();
        assert_eq!(registry.field(idx).unwrap().ty, PropertyType::Integer);

        registry.widen_field_type(idx, PropertyType::Real).unwrap();
        assert_eq!(registry.field(idx).unwrap().ty, PropertyType::Real);
    }

    #[test]
    fn test_grow_width_is_monotonic() {
        let mut registry = FieldSchemaRegistry::new();
        let idx = registry.create_field("x", PropertyType::String).unwrap();
        registry.grow_width(idx, 8).unwrap();
        registry.grow_width(idx, 3).unwrap();
        assert_eq!(registry.field(idx).unwrap().width, 8);
    }

    #[test]
    fn test_analyze_property_widens_in_place() {
        let mut registry = FieldSchemaRegistry::new();
        let idx = registry.create_field("x", PropertyType::Untyped).unwrap();
        registry
            .analyze_property(idx, &RawProperty::new("x", vec!["1".into(), "2".into()]), true)
            .unwrap();
        assert_eq!(registry.field(idx).unwrap().ty, PropertyType::IntegerList);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut registry = FieldSchemaRegistry::new();
        assert!(matches!(
            registry.widen_field_type(3, PropertyType::String),
            Err(IngestError::FieldIndexOutOfRange { index: 3, len: 0 })
        ));
    }

    #[test]
    fn test_geometry_field_srs_merge() {
        let mut registry = FieldSchemaRegistry::new();
        let idx = registry.create_geometry_field("geometry").unwrap();
        registry.merge_srs_name(idx, "EPSG:4326").unwrap();
        registry.merge_srs_name(idx, "EPSG:4326").unwrap();
        let geom = &registry.geometry_fields()[idx];
        assert!(geom.srs.is_consistent());
        assert_eq!(geom.srs.consistent_name(), Some("EPSG:4326"));
    }
}
