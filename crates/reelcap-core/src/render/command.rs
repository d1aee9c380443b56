//! Render Command Assembly
//!
//! Turns a compiled filter graph into the concrete ffmpeg argument vector.
//! Arguments are kept as a vector (not a shell string) so the runner can
//! pass them straight to the process builder without quoting concerns.

use std::path::{Path, PathBuf};

/// How the filter graph reaches ffmpeg.
///
/// Long caption tracks can overflow platform argument-length limits, so the
/// graph can be written to a sidecar file and referenced with
/// `-filter_complex_script` instead of being passed inline.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterInput {
    Inline(String),
    Script(PathBuf),
}

/// A fully assembled ffmpeg invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct FfmpegInvocation {
    pub executable: String,
    pub args: Vec<String>,
}

impl FfmpegInvocation {
    /// Space-joined rendering of the invocation for logs and dry runs.
    pub fn command_line(&self) -> String {
        let mut line = self.executable.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') || arg.contains(';') {
                line.push('\'');
                line.push_str(arg);
                line.push('\'');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Builds the render invocation: overwrite output, single input, the filter
/// graph binding `[outv]`/`[outa]`, H.264 video at a quality-targeted rate,
/// AAC audio.
pub fn build_invocation(
    executable: &str,
    input: &Path,
    filter: &FilterInput,
    output: &Path,
) -> FfmpegInvocation {
    let mut args = vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
    ];

    match filter {
        FilterInput::Inline(graph) => {
            args.push("-filter_complex".to_string());
            args.push(graph.clone());
        }
        FilterInput::Script(path) => {
            args.push("-filter_complex_script".to_string());
            args.push(path.to_string_lossy().into_owned());
        }
    }

    args.extend(
        [
            "-map", "[outv]", "-map", "[outa]", "-c:v", "libx264", "-preset", "medium", "-crf",
            "23", "-c:a", "aac",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    args.push(output.to_string_lossy().into_owned());

    FfmpegInvocation {
        executable: executable.to_string(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_invocation_has_expected_shape() {
        let invocation = build_invocation(
            "ffmpeg",
            Path::new("/in/raw.mp4"),
            &FilterInput::Inline("[0:v]null[outv];[0:a]anull[outa]".to_string()),
            Path::new("/out/final_video.mp4"),
        );

        assert_eq!(invocation.executable, "ffmpeg");
        assert_eq!(
            invocation.args,
            vec![
                "-y",
                "-i",
                "/in/raw.mp4",
                "-filter_complex",
                "[0:v]null[outv];[0:a]anull[outa]",
                "-map",
                "[outv]",
                "-map",
                "[outa]",
                "-c:v",
                "libx264",
                "-preset",
                "medium",
                "-crf",
                "23",
                "-c:a",
                "aac",
                "/out/final_video.mp4",
            ]
        );
    }

    #[test]
    fn script_invocation_references_the_sidecar_file() {
        let invocation = build_invocation(
            "ffmpeg",
            Path::new("/in/raw.mp4"),
            &FilterInput::Script(PathBuf::from("/out/filter.txt")),
            Path::new("/out/final_video.mp4"),
        );

        let pos = invocation
            .args
            .iter()
            .position(|a| a == "-filter_complex_script")
            .unwrap();
        assert_eq!(invocation.args[pos + 1], "/out/filter.txt");
        assert!(!invocation.args.iter().any(|a| a == "-filter_complex"));
    }

    #[test]
    fn command_line_quotes_arguments_with_separators() {
        let invocation = FfmpegInvocation {
            executable: "ffmpeg".to_string(),
            args: vec!["-filter_complex".to_string(), "[0:v]null[outv];[0:a]anull[outa]".to_string()],
        };
        assert_eq!(
            invocation.command_line(),
            "ffmpeg -filter_complex '[0:v]null[outv];[0:a]anull[outa]'"
        );
    }
}
