//! FFmpeg Runner
//!
//! Executes ffmpeg invocations as subprocesses and maps their outcome onto
//! the error taxonomy: a missing executable is reported distinctly from a
//! failed render, and a non-zero exit carries the captured stderr.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::{debug, info};

use super::{FFmpegError, FFmpegResult};

/// Runs ffmpeg commands against a fixed executable path.
#[derive(Clone, Debug)]
pub struct FfmpegRunner {
    ffmpeg_path: PathBuf,
}

impl FfmpegRunner {
    /// Creates a runner for an explicit ffmpeg executable.
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    /// Creates a runner that resolves `ffmpeg` through `PATH`.
    pub fn system() -> Self {
        Self::new("ffmpeg")
    }

    pub fn path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Verifies the executable by running `ffmpeg -version`; returns the
    /// version line on success.
    pub async fn detect(&self) -> FFmpegResult<String> {
        let output = self
            .command()
            .arg("-version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            return Err(FFmpegError::ExecutionFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout.lines().next().unwrap_or("ffmpeg").to_string();
        debug!(%version, "detected ffmpeg");
        Ok(version)
    }

    /// Runs one render invocation to completion, capturing stderr.
    pub async fn run(&self, args: &[String]) -> FFmpegResult<()> {
        info!(ffmpeg = %self.ffmpeg_path.display(), "invoking ffmpeg");
        debug!(?args, "ffmpeg arguments");

        let output = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            return Err(FFmpegError::ExecutionFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.ffmpeg_path);
        // Keep console binaries from flashing a window when spawned from a
        // windowless parent on Windows (CREATE_NO_WINDOW).
        #[cfg(target_os = "windows")]
        cmd.creation_flags(0x08000000);
        cmd
    }
}

fn map_spawn_error(err: std::io::Error) -> FFmpegError {
    if err.kind() == std::io::ErrorKind::NotFound {
        FFmpegError::NotFound
    } else {
        FFmpegError::ProcessError(err)
    }
}
