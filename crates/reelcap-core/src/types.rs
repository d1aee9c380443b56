//! Reelcap Core Type Definitions
//!
//! Fundamental value types shared by every pipeline stage.

use serde::{Deserialize, Serialize};

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Half-open time range `[start_sec, end_sec)`.
///
/// Used both for source-time intervals (trim ranges, deleted regions,
/// playable intervals) and output-time spans (caption events, subtitle
/// blocks). A range with `end_sec <= start_sec` is empty; the pipeline
/// treats malformed input ranges as empty rather than erroring, so
/// constructing one here is not a failure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_sec: TimeSec,
    pub end_sec: TimeSec,
}

impl TimeRange {
    pub fn new(start_sec: TimeSec, end_sec: TimeSec) -> Self {
        Self { start_sec, end_sec }
    }

    /// Duration in seconds. Zero for empty/malformed ranges.
    pub fn duration(&self) -> TimeSec {
        (self.end_sec - self.start_sec).max(0.0)
    }

    /// True when the range contains no time (`end <= start`).
    pub fn is_empty(&self) -> bool {
        self.end_sec <= self.start_sec
    }

    /// Half-open overlap test: `[a,b)` and `[c,d)` overlap iff `a < d && b > c`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_sec < other.end_sec && self.end_sec > other.start_sec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_zero_for_malformed_range() {
        let range = TimeRange::new(5.0, 3.0);
        assert!(range.is_empty());
        assert_eq!(range.duration(), 0.0);
    }

    #[test]
    fn overlap_is_half_open() {
        let a = TimeRange::new(0.0, 2.0);
        let b = TimeRange::new(2.0, 4.0);
        // Touching ranges do not overlap
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = TimeRange::new(1.9, 2.1);
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn zero_length_range_overlaps_nothing() {
        let point = TimeRange::new(1.0, 1.0);
        let span = TimeRange::new(0.0, 2.0);
        assert!(!point.overlaps(&span));
    }
}
