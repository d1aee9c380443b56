//! Reelcap Core Engine
//!
//! Timeline-and-caption compiler: turns user-edited clip selections and
//! word-timed transcripts into the artifacts a final render needs, namely
//! disjoint playable intervals, output-time caption events, an ffmpeg
//! filter-graph program with its argument vector, and a SubRip subtitle file.
//!
//! The pipeline is a strict one-way data flow:
//!
//! ```text
//! timeline (intervals) -> captions (events) -> { render (filter graph), subtitles (SRT) }
//! ```
//!
//! All stages are pure transforms over an in-memory project snapshot; the
//! only side effects live in [`render::execute_render`] and the [`ffmpeg`]
//! subprocess boundary.

pub mod captions;
pub mod ffmpeg;
pub mod project;
pub mod render;
pub mod subtitles;
pub mod timeline;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
