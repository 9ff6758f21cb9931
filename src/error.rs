//! Error types for named-vec

use thiserror::Error;

/// Result type alias using named-vec's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or accessing a named vector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An assigned array's shape differs from the shape registered for the name.
    ///
    /// Shapes must match exactly, not merely in element count: `[2, 6]` and
    /// `[3, 4]` both flatten to 12 elements but are still a mismatch.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Shape registered in the layout
        expected: Vec<usize>,
        /// Shape of the value being assigned
        got: Vec<usize>,
    },

    /// Named access to a name the layout does not register
    #[error("Unknown component name '{name}'")]
    UnknownName {
        /// The unregistered name
        name: String,
    },

    /// The same component name was supplied twice at construction
    #[error("Duplicate component name '{name}'")]
    DuplicateName {
        /// The repeated name
        name: String,
    },

    /// Construction from zero components
    #[error("Cannot build a named vector from zero components")]
    EmptyLayout,
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unknown name error
    pub fn unknown_name(name: impl Into<String>) -> Self {
        Self::UnknownName { name: name.into() }
    }
}
