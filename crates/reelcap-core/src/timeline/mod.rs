//! Timeline Composition
//!
//! Resolves each clip's trim range and deleted regions into ordered,
//! disjoint playable source-time intervals, then filters and orders the
//! clips into a single timeline.
//!
//! Interval resolution is a plain set difference: the playable time of a
//! clip is its trim range minus the union of its deleted regions. Absence
//! of playable time is a valid result, never an error, and a malformed trim
//! range (`end <= start`) resolves to no playable time at all.

use tracing::debug;

use crate::project::Project;
use crate::{TimeRange, TimeSec};

// =============================================================================
// Interval Resolver
// =============================================================================

/// Subtracts `deleted` regions from the `trim` range, returning the surviving
/// playable intervals sorted ascending by start.
///
/// Invariants on the result: pairwise disjoint, ascending, and exactly
/// `trim \ union(deleted)` as a set of time points. Deletions are processed
/// independently (set difference is commutative), so their order does not
/// matter. Empty or malformed deletions are no-ops.
pub fn resolve_playable_intervals(trim: TimeRange, deleted: &[TimeRange]) -> Vec<TimeRange> {
    if trim.is_empty() {
        return Vec::new();
    }

    let mut intervals = vec![trim];

    for region in deleted {
        if region.is_empty() {
            continue;
        }

        let mut survivors = Vec::with_capacity(intervals.len() + 1);
        for interval in &intervals {
            if region.end_sec <= interval.start_sec || region.start_sec >= interval.end_sec {
                // Disjoint: untouched
                survivors.push(*interval);
            } else if region.start_sec <= interval.start_sec && region.end_sec >= interval.end_sec {
                // Deletion covers the interval: dropped
            } else {
                // Partial overlap: keep what lies outside the deletion
                if region.start_sec > interval.start_sec {
                    survivors.push(TimeRange::new(interval.start_sec, region.start_sec));
                }
                if region.end_sec < interval.end_sec {
                    survivors.push(TimeRange::new(region.end_sec, interval.end_sec));
                }
            }
        }
        intervals = survivors;
    }

    intervals.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));
    intervals
}

// =============================================================================
// Timeline Composer
// =============================================================================

/// One clip's contribution to the output timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineClip {
    pub clip_id: String,
    pub timeline_position: i64,
    /// Ordered, disjoint playable intervals in source time. Never empty.
    pub intervals: Vec<TimeRange>,
}

/// Filters and orders the project's clips into a single timeline.
///
/// Only enabled, in-timeline clips that retain at least one non-empty
/// playable interval participate. Survivors are stable-sorted by
/// `timeline_position`.
pub fn compute_timeline_clips(project: &Project) -> Vec<TimelineClip> {
    let mut timeline_clips: Vec<TimelineClip> = project
        .clips
        .iter()
        .filter(|clip| clip.enabled && clip.in_timeline)
        .filter_map(|clip| {
            let intervals = resolve_playable_intervals(clip.trim_range(), &clip.deleted_ranges());
            if intervals.is_empty() {
                debug!(clip_id = %clip.id, "clip has no playable time, skipping");
                return None;
            }
            Some(TimelineClip {
                clip_id: clip.id.clone(),
                timeline_position: clip.timeline_position,
                intervals,
            })
        })
        .collect();

    timeline_clips.sort_by_key(|c| c.timeline_position);
    timeline_clips
}

/// Total duration of all playable intervals across the timeline.
pub fn total_duration(timeline_clips: &[TimelineClip]) -> TimeSec {
    timeline_clips
        .iter()
        .flat_map(|c| c.intervals.iter())
        .map(TimeRange::duration)
        .sum()
}
