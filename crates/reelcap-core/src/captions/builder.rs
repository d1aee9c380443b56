//! Caption Event Builder
//!
//! Walks the composed timeline in order and attributes transcript words to
//! each playable interval. A running output-time cursor keeps the produced
//! events exactly contiguous regardless of source discontinuities.

use std::collections::HashMap;

use tracing::debug;

use crate::project::{TranscriptSegment, Word};
use crate::timeline::TimelineClip;
use crate::TimeRange;

use super::models::{resolve_color, CaptionEvent, CaptionWord};

/// Transcript segments overlapping `play` half-open, in ascending source
/// order, tagged with their segment index.
pub fn find_overlapping_segments(
    segments: &[TranscriptSegment],
    play: TimeRange,
) -> Vec<(usize, &TranscriptSegment)> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.range().overlaps(&play))
        .collect()
}

/// Words of `segment` overlapping `[start, end)` half-open, tagged with their
/// in-segment index for color lookup.
pub fn words_in_range(segment: &TranscriptSegment, range: TimeRange) -> Vec<(usize, &Word)> {
    segment
        .words
        .iter()
        .enumerate()
        .filter(|(_, word)| word.end > range.start_sec && word.start < range.end_sec)
        .collect()
}

/// Builds one caption event per playable interval, in timeline order.
///
/// Intervals with no transcript overlap still produce an (empty) event so
/// the output timeline stays gapless. Intervals are never merged, not even
/// when numerically adjacent in source time: they may come from different
/// clips, and clip identity is a hard separator.
pub fn build_caption_events(
    segments: &[TranscriptSegment],
    word_colors: &HashMap<String, String>,
    default_color: &str,
    timeline_clips: &[TimelineClip],
) -> Vec<CaptionEvent> {
    let mut events = Vec::new();
    let mut output_cursor = 0.0;

    for clip in timeline_clips {
        for &interval in &clip.intervals {
            let duration = interval.duration();
            let output = TimeRange::new(output_cursor, output_cursor + duration);
            output_cursor = output.end_sec;

            let matched = find_overlapping_segments(segments, interval);
            if matched.is_empty() {
                debug!(
                    clip_id = %clip.clip_id,
                    start = interval.start_sec,
                    end = interval.end_sec,
                    "no transcript overlap, emitting silent event"
                );
                events.push(CaptionEvent {
                    segment_index: None,
                    source: interval,
                    output,
                    words: Vec::new(),
                    text: String::new(),
                });
                continue;
            }

            let mut words: Vec<CaptionWord> = Vec::new();
            for &(segment_index, segment) in &matched {
                for (word_index, word) in words_in_range(segment, interval) {
                    words.push(CaptionWord {
                        text: word.text.clone(),
                        source_start: word.start,
                        source_end: word.end,
                        color: resolve_color(segment_index, word_index, word_colors, default_color),
                    });
                }
            }
            words.sort_by(|a, b| a.source_start.total_cmp(&b.source_start));

            let (first_index, first_segment) = matched[0];
            events.push(CaptionEvent {
                segment_index: Some(first_index),
                source: interval,
                output,
                words,
                text: first_segment.text.clone(),
            });
        }
    }

    events
}
