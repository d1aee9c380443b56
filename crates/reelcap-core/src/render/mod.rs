//! Render Pipeline
//!
//! End-to-end compilation of a project snapshot into render artifacts:
//!
//! 1. Compose the timeline ([`crate::timeline`])
//! 2. Build contiguous caption events ([`crate::captions`])
//! 3. Compile the ffmpeg filter graph and argument vector
//! 4. Compress caption words into an SRT sidecar ([`crate::subtitles`])
//!
//! Planning is pure and side-effect free; [`execute_render`] is the only
//! function here that touches the filesystem or spawns a process, so a plan
//! can be inspected (dry run) without rendering anything.

mod command;
mod filter_graph;
mod style;

pub use command::{build_invocation, FfmpegInvocation, FilterInput};
pub use filter_graph::{build_filter_graph, escape_filter_text};
pub use style::{
    BackgroundStyle, CaptionPosition, FontSize, ResolvedStyle, FRAME_HEIGHT, FRAME_WIDTH,
};

use std::path::PathBuf;

use tracing::{info, warn};

use crate::captions::{build_caption_events, CaptionEvent};
use crate::ffmpeg::FfmpegRunner;
use crate::project::Project;
use crate::subtitles::{compress_timestamps, flatten_words, render_srt, CompressOptions};
use crate::timeline::{compute_timeline_clips, total_duration, TimelineClip};
use crate::{CoreError, CoreResult, TimeSec};

/// Inputs and destinations for one render.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// ffmpeg executable, a bare name for `PATH` lookup or an explicit path.
    pub ffmpeg: String,
    /// Source video containing all clips' source time.
    pub input: PathBuf,
    /// Destination video file.
    pub output: PathBuf,
    /// Destination SRT sidecar.
    pub srt_path: PathBuf,
    /// Font file for drawtext.
    pub font: PathBuf,
    /// When set, the filter graph is written here and referenced via
    /// `-filter_complex_script` instead of being passed inline.
    pub filter_script: Option<PathBuf>,
    pub compress: CompressOptions,
}

/// Everything a render will do, computed up front.
#[derive(Clone, Debug)]
pub struct RenderPlan {
    pub timeline: Vec<TimelineClip>,
    pub events: Vec<CaptionEvent>,
    pub filter_graph: String,
    pub srt: String,
    pub total_duration: TimeSec,
    pub invocation: FfmpegInvocation,
}

/// Compiles a project snapshot into a [`RenderPlan`].
///
/// Fails with [`CoreError::EmptyTimeline`] when no clip survives filtering;
/// a timeline whose clips survive but carry no transcript still plans fine
/// and renders without captions.
pub fn build_render_plan(project: &Project, opts: &RenderOptions) -> CoreResult<RenderPlan> {
    let timeline = compute_timeline_clips(project);
    if timeline.is_empty() {
        return Err(CoreError::EmptyTimeline);
    }

    let events = build_caption_events(
        &project.transcript.segments,
        &project.word_colors,
        &project.caption_style.default_color,
        &timeline,
    );

    let style = ResolvedStyle::from_project(&project.caption_style);
    let filter_graph = build_filter_graph(&events, &style, &opts.font);

    let words = flatten_words(&events);
    let blocks = compress_timestamps(&words, &opts.compress);
    let srt = render_srt(&blocks);

    let filter = match &opts.filter_script {
        Some(path) => FilterInput::Script(path.clone()),
        None => FilterInput::Inline(filter_graph.clone()),
    };
    let invocation = build_invocation(&opts.ffmpeg, &opts.input, &filter, &opts.output);

    let duration = total_duration(&timeline);
    info!(
        clips = timeline.len(),
        events = events.len(),
        subtitle_blocks = blocks.len(),
        duration_sec = format!("{:.3}", duration),
        "render plan built"
    );
    if events.iter().all(|e| e.words.is_empty()) {
        warn!("no transcript words overlap the timeline; rendering without captions");
    }

    Ok(RenderPlan {
        timeline,
        events,
        filter_graph,
        srt,
        total_duration: duration,
        invocation,
    })
}

/// Executes a plan: validates inputs, writes the SRT sidecar (and filter
/// script when requested), then runs ffmpeg to completion.
pub async fn execute_render(plan: &RenderPlan, opts: &RenderOptions) -> CoreResult<()> {
    if !opts.input.exists() {
        return Err(CoreError::InputNotFound(opts.input.display().to_string()));
    }
    if !opts.font.exists() {
        return Err(CoreError::FontNotFound(opts.font.display().to_string()));
    }

    std::fs::write(&opts.srt_path, &plan.srt)?;
    info!(path = %opts.srt_path.display(), "wrote subtitles");

    if let Some(script) = &opts.filter_script {
        std::fs::write(script, &plan.filter_graph)?;
        info!(path = %script.display(), "wrote filter graph script");
    }

    let runner = FfmpegRunner::new(&opts.ffmpeg);
    runner.run(&plan.invocation.args).await?;
    info!(path = %opts.output.display(), "render complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{CaptionStyle, Clip, TranscriptSegment, Word};

    fn options() -> RenderOptions {
        RenderOptions {
            ffmpeg: "ffmpeg".to_string(),
            input: PathBuf::from("/in/raw.mp4"),
            output: PathBuf::from("/out/final_video.mp4"),
            srt_path: PathBuf::from("/out/captions.srt"),
            font: PathBuf::from("/fonts/caption.ttf"),
            filter_script: None,
            compress: CompressOptions::default(),
        }
    }

    fn clip(id: &str, position: i64, start: f64, end: f64) -> Clip {
        Clip {
            id: id.to_string(),
            enabled: true,
            in_timeline: true,
            timeline_position: position,
            trim_start: Some(start),
            trim_end: Some(end),
            deleted_regions: vec![],
            selected_segment: None,
        }
    }

    fn project() -> Project {
        Project {
            clips: vec![clip("a", 0, 0.0, 4.0), clip("b", 1, 10.0, 12.0)],
            transcript: crate::project::Transcript {
                segments: vec![TranscriptSegment {
                    start: 0.0,
                    end: 4.0,
                    text: "hello world".to_string(),
                    words: vec![
                        Word {
                            text: "hello".to_string(),
                            start: 0.5,
                            end: 1.0,
                        },
                        Word {
                            text: "world".to_string(),
                            start: 1.2,
                            end: 1.8,
                        },
                    ],
                }],
            },
            word_colors: Default::default(),
            caption_style: CaptionStyle::default(),
        }
    }

    #[test]
    fn plan_wires_all_stages_together() {
        let plan = build_render_plan(&project(), &options()).unwrap();

        assert_eq!(plan.timeline.len(), 2);
        assert_eq!(plan.events.len(), 2);
        assert!((plan.total_duration - 6.0).abs() < 1e-9);
        assert!(plan.filter_graph.contains("concat=n=2:v=1:a=1[outv][outa]"));
        assert!(plan.srt.contains("hello world"));
        assert!(plan.invocation.args.contains(&"-filter_complex".to_string()));
        assert!(plan
            .invocation
            .args
            .contains(&"/out/final_video.mp4".to_string()));
    }

    #[test]
    fn empty_timeline_fails_planning() {
        let mut project = project();
        project.clips.clear();
        let err = build_render_plan(&project, &options()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTimeline));
    }

    #[test]
    fn disabled_clips_alone_fail_planning() {
        let mut project = project();
        for clip in &mut project.clips {
            clip.enabled = false;
        }
        let err = build_render_plan(&project, &options()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTimeline));
    }

    #[test]
    fn silent_timeline_plans_without_captions() {
        let mut project = project();
        project.transcript.segments.clear();
        let plan = build_render_plan(&project, &options()).unwrap();

        assert_eq!(plan.events.len(), 2);
        assert!(plan.events.iter().all(|e| e.words.is_empty()));
        assert!(!plan.filter_graph.contains("drawtext"));
        assert_eq!(plan.srt, "");
    }

    #[test]
    fn filter_script_option_switches_the_invocation() {
        let mut opts = options();
        opts.filter_script = Some(PathBuf::from("/out/filter.txt"));
        let plan = build_render_plan(&project(), &opts).unwrap();

        assert!(plan
            .invocation
            .args
            .contains(&"-filter_complex_script".to_string()));
        assert!(plan.invocation.args.contains(&"/out/filter.txt".to_string()));
        // Graph is still kept on the plan for the script write and dry runs
        assert!(plan.filter_graph.contains("concat="));
    }

    #[tokio::test]
    async fn execute_reports_missing_input() {
        let plan = build_render_plan(&project(), &options()).unwrap();
        let err = execute_render(&plan, &options()).await.unwrap_err();
        assert!(matches!(err, CoreError::InputNotFound(_)));
    }

    #[tokio::test]
    async fn execute_reports_missing_font() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let mut opts = options();
        opts.input = input.path().to_path_buf();

        let plan = build_render_plan(&project(), &opts).unwrap();
        let err = execute_render(&plan, &opts).await.unwrap_err();
        assert!(matches!(err, CoreError::FontNotFound(_)));
    }
}
