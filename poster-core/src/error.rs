//! Error types for the fallible edges of the editor core.
//!
//! Store operations themselves are total and never produce these; they only
//! appear when decoding documents or applying property edits.

use thiserror::Error;

/// Result type for poster operations.
pub type PosterResult<T> = Result<T, PosterError>;

/// Errors that can occur outside the store's total operation set.
#[derive(Debug, Error)]
pub enum PosterError {
    /// Component not found in the document.
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// Two components in a decoded document share an id.
    #[error("Duplicate component id: {0}")]
    DuplicateId(String),

    /// A property name not exposed by the component's editor.
    #[error("Unknown property '{property}' for {component_type}")]
    UnknownProperty {
        /// Type tag of the edited component.
        component_type: String,
        /// Requested property name.
        property: String,
    },

    /// A property value of the wrong shape.
    #[error("Invalid value for '{property}': {reason}")]
    InvalidValue {
        /// Property being edited.
        property: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A configuration value outside its usable range.
    #[error("Invalid config '{field}': {reason}")]
    InvalidConfig {
        /// Offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Geometry edit attempted on a locked component.
    #[error("Component is locked: {0}")]
    Locked(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
