//! Error types for the pivot controls

use std::fmt;
use thiserror::Error;

/// Which matrix failed to invert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixRole {
    /// World transform of the gizmo's parent node
    ParentWorld,
    /// Gizmo local matrix captured at drag start
    DragStartLocal,
    /// World transform of the frame holding attached content
    ContentFrame,
}

impl fmt::Display for MatrixRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixRole::ParentWorld => write!(f, "parent world"),
            MatrixRole::DragStartLocal => write!(f, "drag-start local"),
            MatrixRole::ContentFrame => write!(f, "content frame"),
        }
    }
}

/// Pivot controls errors
#[derive(Debug, Error)]
pub enum GizmoError {
    /// A transform the composition depends on is not invertible
    #[error("Cannot invert the {0} matrix: transform is singular")]
    SingularMatrix(MatrixRole),

    /// Invalid configuration
    #[error("Invalid gizmo configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("Failed to parse gizmo configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for pivot controls operations
pub type Result<T> = std::result::Result<T, GizmoError>;
