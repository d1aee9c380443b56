//! Subtitle Track Compression and SRT Export
//!
//! Coalesces per-word output-time timings into human-readable SubRip blocks:
//! words close in time are merged, blocks are kept under a maximum duration,
//! and blocks that would flash by are extended to a minimum duration.

use crate::captions::CaptionEvent;
use crate::TimeSec;

// =============================================================================
// Types
// =============================================================================

/// One word positioned on the output timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleWord {
    pub text: String,
    pub start: TimeSec,
    pub end: TimeSec,
}

/// One rendered subtitle block.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleBlock {
    pub text: String,
    pub start: TimeSec,
    pub end: TimeSec,
}

/// Tuning knobs for [`compress_timestamps`].
#[derive(Clone, Debug)]
pub struct CompressOptions {
    /// Blocks shorter than this get their end extended.
    pub min_duration: TimeSec,
    /// A block never grows past this duration.
    pub max_duration: TimeSec,
    /// Words closer than this to the running block are merged into it.
    pub gap_threshold: TimeSec,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            min_duration: 1.0,
            max_duration: 4.0,
            gap_threshold: 0.5,
        }
    }
}

// =============================================================================
// Compression
// =============================================================================

/// Flattens caption events into output-time words, in event order.
pub fn flatten_words(events: &[CaptionEvent]) -> Vec<SubtitleWord> {
    events
        .iter()
        .flat_map(|event| {
            event.words.iter().map(|word| {
                let window = event.output_window(word);
                SubtitleWord {
                    text: word.text.clone(),
                    start: window.start_sec,
                    end: window.end_sec,
                }
            })
        })
        .collect()
}

/// Greedily coalesces words into subtitle blocks.
///
/// Single left-to-right pass over the words sorted by start: the running
/// block absorbs the next word while the gap to it stays under
/// `gap_threshold` and the merged duration stays within `max_duration`.
/// A closed block shorter than `min_duration` has its end extended, capped
/// at `next_block.start - gap_threshold` so the lead-in gap that split the
/// blocks survives and re-compressing the output reproduces it unchanged.
pub fn compress_timestamps(words: &[SubtitleWord], opts: &CompressOptions) -> Vec<SubtitleBlock> {
    let mut sorted: Vec<&SubtitleWord> = words.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let Some(first) = sorted.first() else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut current = SubtitleBlock {
        text: first.text.clone(),
        start: first.start,
        end: first.end,
    };

    for word in &sorted[1..] {
        let gap = word.start - current.end;
        let merged_duration = word.end - current.start;

        if gap < opts.gap_threshold && merged_duration <= opts.max_duration {
            current.text.push(' ');
            current.text.push_str(&word.text);
            current.end = current.end.max(word.end);
        } else {
            blocks.push(current);
            current = SubtitleBlock {
                text: word.text.clone(),
                start: word.start,
                end: word.end,
            };
        }
    }
    blocks.push(current);

    for i in 0..blocks.len() {
        let mut target = blocks[i].start + opts.min_duration;
        if let Some(next) = blocks.get(i + 1) {
            target = target.min(next.start - opts.gap_threshold);
        }
        if target > blocks[i].end {
            blocks[i].end = target;
        }
    }

    blocks
}

// =============================================================================
// SRT Rendering
// =============================================================================

/// Renders blocks as SubRip text: 1-based numbers, comma-decimal timestamp
/// pairs, blank-line separated.
pub fn render_srt(blocks: &[SubtitleBlock]) -> String {
    let mut output = String::new();

    for (index, block) in blocks.iter().enumerate() {
        output.push_str(&format!("{}\n", index + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(block.start),
            format_srt_timestamp(block.end)
        ));
        output.push_str(&block.text);
        output.push_str("\n\n");
    }

    output.trim_end().to_string()
}

/// Formats seconds as an SRT timestamp (`HH:MM:SS,mmm`).
fn format_srt_timestamp(seconds: TimeSec) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}
