//! FFmpeg Integration Module
//!
//! The external media engine boundary: locating an ffmpeg executable and
//! running render invocations. This module never builds filter graphs; it
//! only executes what [`crate::render`] produced and reports the result
//! through the subprocess exit status and captured stderr.

mod runner;

pub use runner::FfmpegRunner;

/// FFmpeg-related error types
#[derive(Debug, thiserror::Error)]
pub enum FFmpegError {
    #[error("ffmpeg executable not found; install ffmpeg or pass an explicit path")]
    NotFound,

    #[error("ffmpeg exited with {status}: {stderr}")]
    ExecutionFailed { status: i32, stderr: String },

    #[error("Process error: {0}")]
    ProcessError(#[from] std::io::Error),
}

pub type FFmpegResult<T> = Result<T, FFmpegError>;
