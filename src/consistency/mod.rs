//! Session-scoped consistency trackers
//!
//! Small one-way finite-state values: once a tracker reaches its terminal
//! "mixed"/"inconsistent" state it never leaves it, regardless of further
//! input. Both are total functions and have no error paths.

use serde::{Deserialize, Serialize};

use crate::models::GeometryType;

/// What geometry type the external store should declare for the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryTypeHint {
    /// No geometry observed yet
    Undeclared,
    /// All geometries so far share this type
    Declared(GeometryType),
    /// Mixed geometry types; permanent
    Unknown,
}

/// Tracks whether all ingested features share one geometry type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryTypeTracker {
    state: GeometryState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum GeometryState {
    #[default]
    Unset,
    Single(GeometryType),
    Mixed,
}

impl GeometryTypeTracker {
    /// Create a tracker with no observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one feature's geometry type
    pub fn observe(&mut self, geometry_type: GeometryType) {
        self.state = match self.state {
            GeometryState::Unset => GeometryState::Single(geometry_type),
            GeometryState::Single(current) if current == geometry_type => self.state,
            GeometryState::Single(current) => {
                tracing::debug!(?current, observed = ?geometry_type, "geometry types are mixed");
                GeometryState::Mixed
            }
            GeometryState::Mixed => GeometryState::Mixed,
        };
    }

    /// Whether mixed geometry types have been observed
    pub fn is_mixed(&self) -> bool {
        self.state == GeometryState::Mixed
    }

    /// The current declaration hint for the collection
    pub fn hint(&self) -> GeometryTypeHint {
        match self.state {
            GeometryState::Unset => GeometryTypeHint::Undeclared,
            GeometryState::Single(ty) => GeometryTypeHint::Declared(ty),
            GeometryState::Mixed => GeometryTypeHint::Unknown,
        }
    }
}

/// Tracks whether geometry fragments agree on one spatial-reference name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrsNameTracker {
    state: SrsState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum SrsState {
    #[default]
    Empty,
    Single(String),
    Inconsistent,
}

impl SrsNameTracker {
    /// Create a tracker with no observations
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one fragment's spatial-reference name.
    ///
    /// The first conflicting name clears the stored name forever.
    pub fn merge(&mut self, srs_name: &str) {
        match &self.state {
            SrsState::Empty => self.state = SrsState::Single(srs_name.to_string()),
            SrsState::Single(current) => {
                if current != srs_name {
                    tracing::debug!(%current, merged = srs_name, "SRS names are inconsistent");
                    self.state = SrsState::Inconsistent;
                }
            }
            SrsState::Inconsistent => {}
        }
    }

    /// Whether no conflicting names have been merged
    pub fn is_consistent(&self) -> bool {
        !matches!(self.state, SrsState::Inconsistent)
    }

    /// The agreed name; `None` when nothing was merged or after a conflict
    pub fn consistent_name(&self) -> Option<&str> {
        match &self.state {
            SrsState::Single(name) => Some(name),
            _ => None,
        }
    }
}
