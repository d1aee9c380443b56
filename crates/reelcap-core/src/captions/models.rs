//! Caption Data Models

use std::collections::HashMap;

use crate::{TimeRange, TimeSec};

// =============================================================================
// Caption Words
// =============================================================================

/// One transcript word attributed to a caption event, with its resolved
/// display color. Times are in the source domain; output-domain visibility
/// comes from [`CaptionEvent::output_window`].
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionWord {
    pub text: String,
    pub source_start: TimeSec,
    pub source_end: TimeSec,
    pub color: String,
}

/// Resolves the display color for a word.
///
/// Overrides are keyed by the exact composite `"{segment_index}_{word_index}"`
/// key; anything else falls back to the default.
pub fn resolve_color(
    segment_index: usize,
    word_index: usize,
    word_colors: &HashMap<String, String>,
    default_color: &str,
) -> String {
    let key = format!("{}_{}", segment_index, word_index);
    word_colors
        .get(&key)
        .cloned()
        .unwrap_or_else(|| default_color.to_string())
}

// =============================================================================
// Caption Events
// =============================================================================

/// One output-timeline slice's worth of attributed transcript words.
///
/// Invariants (established by [`super::build_caption_events`]):
/// - `output.duration() == source.duration()`
/// - consecutive events are exactly contiguous in output time
/// - every word in `words` overlaps `source` half-open
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionEvent {
    /// Index of the chronologically first matched transcript segment, if any.
    pub segment_index: Option<usize>,
    /// Slice of the source stream this event plays.
    pub source: TimeRange,
    /// Position of that slice on the concatenated output timeline.
    pub output: TimeRange,
    pub words: Vec<CaptionWord>,
    /// Display text of the first matched segment; empty for silent events.
    pub text: String,
}

impl CaptionEvent {
    /// A word's visibility window on the output/concatenated timeline.
    ///
    /// This is the single remap between time domains in the pipeline:
    /// `output_start + (word_source_start - event_source_start)`. Both the
    /// filter-graph generator and the subtitle compressor go through here so
    /// caption timing can never diverge between the two outputs.
    pub fn output_window(&self, word: &CaptionWord) -> TimeRange {
        let offset = self.output.start_sec - self.source.start_sec;
        TimeRange::new(word.source_start + offset, word.source_end + offset)
    }
}
