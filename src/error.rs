use crate::engine::SurfaceId;
use crate::model::ImageId;
use thiserror::Error;

/// Result type for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Failure reported by one of the injected engines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Rendering engine call failure
    #[error("rendering engine error on surface {surface}: {reason}")]
    Rendering { surface: SurfaceId, reason: String },

    /// Tool-state engine call failure
    #[error("tool engine error on surface {surface}: {reason}")]
    ToolState { surface: SurfaceId, reason: String },
}

impl EngineError {
    pub fn rendering(surface: SurfaceId, reason: impl Into<String>) -> Self {
        EngineError::Rendering {
            surface,
            reason: reason.into(),
        }
    }

    pub fn tool_state(surface: SurfaceId, reason: impl Into<String>) -> Self {
        EngineError::ToolState {
            surface,
            reason: reason.into(),
        }
    }
}

/// A single image identifier failed to load.
///
/// These are absorbed into the outstanding-load accounting rather than
/// surfaced per image; see `StudyViewer::image_loaded`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load image {image_id}: {reason}")]
pub struct LoadError {
    pub image_id: ImageId,
    pub reason: String,
}

impl LoadError {
    pub fn new(image_id: ImageId, reason: impl Into<String>) -> Self {
        Self {
            image_id,
            reason: reason.into(),
        }
    }
}

/// Error types for viewer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("series index {index} out of range ({len} series loaded)")]
    SeriesIndexOutOfRange { index: usize, len: usize },
}
