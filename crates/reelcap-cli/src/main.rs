//! Reelcap CLI
//!
//! Renders a captioned video from a project snapshot: loads the project
//! JSON, compiles the render plan, and either prints it (`--dry-run`) or
//! writes `final_video.mp4` plus `captions.srt` into the output directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reelcap_core::project::load_project;
use reelcap_core::render::{build_render_plan, execute_render, RenderOptions};
use reelcap_core::subtitles::CompressOptions;

#[derive(Parser, Debug)]
#[command(name = "reelcap", version, about = "Render captioned videos from edited clip selections")]
struct Args {
    /// Project snapshot JSON (clips, transcript, word colors, caption style)
    #[arg(long)]
    project: PathBuf,

    /// Source video containing all clips
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving final_video.mp4 and captions.srt
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Font file for caption text
    #[arg(long)]
    font: PathBuf,

    /// ffmpeg executable (name for PATH lookup or explicit path)
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: String,

    /// Pass the filter graph inline instead of via a script file
    #[arg(long)]
    inline_filter: bool,

    /// Print the plan and ffmpeg command line without rendering
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let project = load_project(&args.project)
        .with_context(|| format!("loading project {}", args.project.display()))?;

    let opts = RenderOptions {
        ffmpeg: args.ffmpeg,
        input: args.input,
        output: args.output_dir.join("final_video.mp4"),
        srt_path: args.output_dir.join("captions.srt"),
        font: args.font,
        filter_script: (!args.inline_filter)
            .then(|| args.output_dir.join("filter_complex.txt")),
        compress: CompressOptions::default(),
    };

    let plan = build_render_plan(&project, &opts).context("planning render")?;
    info!(
        duration_sec = format!("{:.3}", plan.total_duration),
        events = plan.events.len(),
        "plan ready"
    );

    if args.dry_run {
        println!("{}", plan.invocation.command_line());
        println!();
        println!("{}", plan.filter_graph);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    execute_render(&plan, &opts).await.context("rendering")?;
    println!("wrote {}", opts.output.display());
    println!("wrote {}", opts.srt_path.display());

    Ok(())
}
