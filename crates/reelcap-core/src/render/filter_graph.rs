//! Filter-Graph Generation
//!
//! Compiles ordered caption events plus a resolved style into the ffmpeg
//! `filter_complex` program that trims each playable interval out of the
//! single source stream, resets its timestamps, overlays time-windowed
//! per-word text, and concatenates everything into one continuous stream.
//!
//! Program shape for N events:
//!
//! ```text
//! [0:v]trim=start=S:end=E,setpts=PTS-STARTPTS,drawtext=...,drawtext=...[v0];
//! [0:a]atrim=start=S:end=E,asetpts=PTS-STARTPTS[a0];
//! ...
//! [v0][a0]...[vN-1][aN-1]concat=n=N:v=1:a=1[outv][outa]
//! ```
//!
//! Transcript text is untrusted relative to the filter-graph syntax; every
//! value interpolated into the program goes through [`escape_filter_text`].

use std::path::Path;

use crate::captions::{CaptionEvent, CaptionWord};

use super::style::{BackgroundStyle, ResolvedStyle, FRAME_WIDTH};

/// Maximum estimated line width in pixels before word-wrap breaks the line.
const MAX_LINE_WIDTH: f64 = 800.0;
/// Vertical gap between stacked caption lines in pixels.
const LINE_SPACING: u32 = 10;

/// Escapes filtergraph metacharacters in a value interpolated into the
/// program. Filtergraphs treat `:` and `,` as separators and `\` as the
/// escape character; drawtext additionally expands `%{...}` sequences, and
/// values are wrapped in single quotes.
pub fn escape_filter_text(raw: &str) -> String {
    raw.replace('\\', r"\\")
        .replace(':', r"\:")
        .replace(',', r"\,")
        .replace('\'', r"\'")
        .replace('%', r"\%")
}

/// Converts a `#rrggbb` hex color to ffmpeg's bare form.
fn hex_to_ffmpeg(color: &str) -> &str {
    color.trim_start_matches('#')
}

/// Greedy word-wrap: accumulate words while the estimated line width stays
/// under the budget; overflow starts a new line. A word wider than the whole
/// budget gets a line of its own.
fn wrap_words<'a>(words: &'a [CaptionWord], style: &ResolvedStyle) -> Vec<Vec<&'a CaptionWord>> {
    let glyph = style.glyph_width();
    let mut lines: Vec<Vec<&CaptionWord>> = Vec::new();
    let mut current: Vec<&CaptionWord> = Vec::new();
    let mut line_width = 0.0;

    for word in words {
        let word_width = word.text.chars().count() as f64 * glyph + glyph;
        if line_width + word_width > MAX_LINE_WIDTH && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            line_width = 0.0;
        }
        current.push(word);
        line_width += word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Builds the video and audio chains for one caption event.
///
/// The video chain trims the interval, zeroes its timestamps, and stacks one
/// drawtext step per word; per-word steps are required because color and
/// visibility vary word by word within a display line. Word visibility
/// windows live on the output timeline and are rebased by the event's output
/// start here, because each chain's timestamps restart at zero before concat.
fn build_event_chains(
    index: usize,
    event: &CaptionEvent,
    style: &ResolvedStyle,
    escaped_font: &str,
) -> (String, String) {
    let mut parts = vec![format!(
        "[0:v]trim=start={:.3}:end={:.3},setpts=PTS-STARTPTS",
        event.source.start_sec, event.source.end_sec
    )];

    let font_px = style.font_size.px();
    let glyph = style.glyph_width();
    let y_base = style.position.y_expr(font_px);

    for (line_index, line) in wrap_words(&event.words, style).iter().enumerate() {
        let line_chars: usize = line.iter().map(|w| w.text.chars().count()).sum::<usize>()
            + line.len().saturating_sub(1);
        let line_width = line_chars as f64 * glyph;
        let line_lift = line_index as u32 * (font_px + LINE_SPACING);

        let mut x_offset = 0.0;
        for word in line {
            let window = event.output_window(word);
            let enable_start = window.start_sec - event.output.start_sec;
            let enable_end = window.end_sec - event.output.start_sec;

            let base_x = format!("({}-{:.0})/2", FRAME_WIDTH, line_width);
            let x_expr = if x_offset > 0.0 {
                format!("{}+{:.0}", base_x, x_offset)
            } else {
                base_x
            };
            let y_expr = if line_lift > 0 {
                format!("{}-{}", y_base, line_lift)
            } else {
                y_base.clone()
            };

            let mut drawtext = format!(
                "drawtext=text='{}':fontfile='{}':fontsize={}:fontcolor={}:x={}:y={}",
                escape_filter_text(&word.text),
                escaped_font,
                font_px,
                hex_to_ffmpeg(&word.color),
                x_expr,
                y_expr
            );
            match style.background {
                BackgroundStyle::DarkBox => {
                    drawtext.push_str(":box=1:boxcolor=black@0.7:boxborderw=8")
                }
                BackgroundStyle::Outline => drawtext.push_str(":borderw=2:bordercolor=black"),
                BackgroundStyle::None => {}
            }
            drawtext.push_str(&format!(
                ":enable='between(t\\,{:.3}\\,{:.3})'",
                enable_start, enable_end
            ));
            parts.push(drawtext);

            x_offset += word.text.chars().count() as f64 * glyph + glyph;
        }
    }

    let video_chain = format!("{}[v{}]", parts.join(","), index);
    let audio_chain = format!(
        "[0:a]atrim=start={:.3}:end={:.3},asetpts=PTS-STARTPTS[a{}]",
        event.source.start_sec, event.source.end_sec, index
    );

    (video_chain, audio_chain)
}

/// Compiles the full filter-graph program.
///
/// Zero events yields a pass-through program that still binds the `[outv]`
/// and `[outa]` labels, keeping the surrounding argument vector valid.
pub fn build_filter_graph(
    events: &[CaptionEvent],
    style: &ResolvedStyle,
    font_path: &Path,
) -> String {
    if events.is_empty() {
        return "[0:v]null[outv];[0:a]anull[outa]".to_string();
    }

    let escaped_font = escape_filter_text(&font_path.to_string_lossy());

    let mut statements = Vec::with_capacity(events.len() * 2 + 1);
    for (index, event) in events.iter().enumerate() {
        let (video, audio) = build_event_chains(index, event, style, &escaped_font);
        statements.push(video);
        statements.push(audio);
    }

    let concat_inputs: String = (0..events.len())
        .map(|i| format!("[v{}][a{}]", i, i))
        .collect();
    statements.push(format!(
        "{}concat=n={}:v=1:a=1[outv][outa]",
        concat_inputs,
        events.len()
    ));

    statements.join(";\n")
}
