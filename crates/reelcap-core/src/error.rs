//! Reelcap Error Definitions
//!
//! Defines error types used throughout the render pipeline.

use thiserror::Error;

use crate::ffmpeg::FFmpegError;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Input Errors (fatal, no partial output)
    // =========================================================================
    #[error("Project file not found: {0}")]
    ProjectNotFound(String),

    #[error("Project file corrupted: {0}")]
    ProjectCorrupted(String),

    #[error("Input video not found: {0}")]
    InputNotFound(String),

    #[error("Font file not found: {0}")]
    FontNotFound(String),

    #[error("No clips in timeline")]
    EmptyTimeline,

    // =========================================================================
    // Execution Errors
    // =========================================================================
    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error(transparent)]
    Ffmpeg(#[from] FFmpegError),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
