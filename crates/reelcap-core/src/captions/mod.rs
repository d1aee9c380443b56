//! Caption Events
//!
//! Maps each output-timeline interval to the transcript words it covers,
//! assigning per-word colors and building contiguous output-time caption
//! events. Events are the single source of truth for both the drawtext
//! filter graph and the SubRip subtitle track.

mod builder;
mod models;

pub use builder::{build_caption_events, find_overlapping_segments, words_in_range};
pub use models::{resolve_color, CaptionEvent, CaptionWord};
