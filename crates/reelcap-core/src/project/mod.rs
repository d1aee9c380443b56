//! Project Snapshot Models
//!
//! Read-only input data for one render invocation: user-edited clips with
//! trim/deletion edits, the word-timed transcript, per-word color overrides,
//! and the caption style block.
//!
//! Field names match the on-disk snake_case project format. Every field a
//! project file may legitimately omit carries a serde default so older
//! snapshots keep loading; schema drift is absorbed here at the boundary
//! (see [`Clip::trim_range`]) instead of leaking into the pipeline.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, TimeRange, TimeSec};

// =============================================================================
// Clip Data
// =============================================================================

/// A user-marked source-time range excluded from output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeletedRegion {
    pub start: TimeSec,
    pub end: TimeSec,
}

/// Legacy location of the trim range (older project files store the clip's
/// selection here instead of in `trim_start`/`trim_end`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedSegment {
    #[serde(default)]
    pub start: TimeSec,
    #[serde(default)]
    pub end: TimeSec,
}

/// One clip as edited by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub in_timeline: bool,
    #[serde(default)]
    pub timeline_position: i64,
    pub trim_start: Option<TimeSec>,
    pub trim_end: Option<TimeSec>,
    #[serde(default)]
    pub deleted_regions: Vec<DeletedRegion>,
    pub selected_segment: Option<SelectedSegment>,
}

fn default_true() -> bool {
    true
}

impl Clip {
    /// The clip's trim range in source time.
    ///
    /// Versioned boundary parser: current snapshots store the trim in
    /// `trim_start`/`trim_end`; older ones only carry it inside
    /// `selected_segment`. Missing everywhere resolves to an empty range,
    /// which downstream treats as "no playable time" rather than an error.
    pub fn trim_range(&self) -> TimeRange {
        let fallback = self.selected_segment.clone().unwrap_or_default();
        let start = self.trim_start.unwrap_or(fallback.start);
        let end = self.trim_end.unwrap_or(fallback.end);
        TimeRange::new(start, end)
    }

    /// Deleted regions as time ranges.
    pub fn deleted_ranges(&self) -> Vec<TimeRange> {
        self.deleted_regions
            .iter()
            .map(|r| TimeRange::new(r.start, r.end))
            .collect()
    }
}

// =============================================================================
// Transcript Data
// =============================================================================

/// One transcribed word with source timing. Immutable, produced upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start: TimeSec,
    #[serde(default)]
    pub end: TimeSec,
}

/// One transcript segment; segments are ordered ascending by time and the
/// segment index is its position in [`Transcript::segments`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default)]
    pub start: TimeSec,
    #[serde(default)]
    pub end: TimeSec,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl TranscriptSegment {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

// =============================================================================
// Caption Style
// =============================================================================

/// Caption style block as stored in the project file.
///
/// Values are kept as loose strings here; [`crate::render::ResolvedStyle`]
/// maps them to typed settings with fallbacks for unknown names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionStyle {
    #[serde(default)]
    pub font_size: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub background: String,
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: String::new(),
            position: String::new(),
            background: String::new(),
            default_color: default_color(),
        }
    }
}

// =============================================================================
// Project
// =============================================================================

/// In-memory snapshot of one project, consumed read-only per render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub transcript: Transcript,
    /// Word color overrides keyed `"{segment_index}_{word_index}"`.
    #[serde(default)]
    pub word_colors: HashMap<String, String>,
    #[serde(default)]
    pub caption_style: CaptionStyle,
}

/// Loads a project snapshot from a JSON file.
pub fn load_project(path: &Path) -> CoreResult<Project> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::ProjectNotFound(path.display().to_string())
        } else {
            CoreError::Io(e)
        }
    })?;

    serde_json::from_str(&contents)
        .map_err(|e| CoreError::ProjectCorrupted(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trim_range_prefers_explicit_fields() {
        let clip = Clip {
            id: "c1".to_string(),
            enabled: true,
            in_timeline: true,
            timeline_position: 0,
            trim_start: Some(1.0),
            trim_end: Some(9.0),
            deleted_regions: vec![],
            selected_segment: Some(SelectedSegment {
                start: 0.0,
                end: 100.0,
            }),
        };
        assert_eq!(clip.trim_range(), TimeRange::new(1.0, 9.0));
    }

    #[test]
    fn trim_range_falls_back_to_selected_segment() {
        let json = r#"{
            "id": "c1",
            "selected_segment": { "start": 2.5, "end": 7.5 }
        }"#;
        let clip: Clip = serde_json::from_str(json).unwrap();
        assert_eq!(clip.trim_range(), TimeRange::new(2.5, 7.5));
        assert!(clip.enabled);
        assert!(clip.in_timeline);
    }

    #[test]
    fn trim_range_defaults_to_empty_when_missing() {
        let clip: Clip = serde_json::from_str(r#"{ "id": "c1" }"#).unwrap();
        assert!(clip.trim_range().is_empty());
    }

    #[test]
    fn project_deserializes_with_defaults() {
        let project: Project = serde_json::from_str("{}").unwrap();
        assert!(project.clips.is_empty());
        assert!(project.transcript.segments.is_empty());
        assert_eq!(project.caption_style.default_color, "#ffffff");
    }

    #[test]
    fn project_parses_full_snapshot() {
        let json = r##"{
            "clips": [{
                "id": "clip_a",
                "timeline_position": 2,
                "trim_start": 0.0,
                "trim_end": 10.0,
                "deleted_regions": [{ "start": 3.0, "end": 5.0 }]
            }],
            "transcript": {
                "segments": [{
                    "start": 0.0,
                    "end": 4.0,
                    "text": "hello world",
                    "words": [
                        { "text": "hello", "start": 0.0, "end": 1.0 },
                        { "text": "world", "start": 1.5, "end": 2.0 }
                    ]
                }]
            },
            "word_colors": { "0_1": "#ff0000" },
            "caption_style": { "font_size": "large", "default_color": "#00ff00" }
        }"##;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.clips.len(), 1);
        assert_eq!(project.clips[0].deleted_regions.len(), 1);
        assert_eq!(project.transcript.segments[0].words.len(), 2);
        assert_eq!(project.word_colors.get("0_1").unwrap(), "#ff0000");
        assert_eq!(project.caption_style.font_size, "large");
    }

    #[test]
    fn load_project_reports_missing_file() {
        let err = load_project(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(matches!(err, CoreError::ProjectNotFound(_)));
    }

    #[test]
    fn load_project_reports_corrupted_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = load_project(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::ProjectCorrupted(_)));
    }

    #[test]
    fn load_project_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "clips": [] }"#).unwrap();
        let project = load_project(file.path()).unwrap();
        assert!(project.clips.is_empty());
    }
}
