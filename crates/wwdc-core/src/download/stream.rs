//! Delegation of segmented streams to an external downloader program.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::temp_path;
use crate::config::StreamConfig;
use crate::error::AssetError;

/// A downloader that can reassemble segmented (HLS) streams on its own.
pub trait StreamDownloader {
    /// Downloads `url` into `dir` using `stem` as the file name hint.
    /// Returns the path the output is expected at.
    fn download_stream(&self, url: &str, dir: &Path, stem: &str) -> Result<PathBuf, AssetError>;

    /// Where the output for `stem` lands; checked for existence before delegating.
    fn output_path(&self, dir: &Path, stem: &str) -> PathBuf {
        dir.join(format!("{stem}.mp4"))
    }
}

/// Runs a configured program (ffmpeg, yt-dlp, ...) with templated arguments.
///
/// `{output}` expands to `<stem>.mp4.part`; it is renamed to `<stem>.mp4`
/// only after the program exits successfully, and removed otherwise.
#[derive(Debug, Clone)]
pub struct ExternalStreamDownloader {
    program: String,
    args: Vec<String>,
}

impl ExternalStreamDownloader {
    pub fn new(cfg: &StreamConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
        }
    }

    fn expand_args(&self, url: &str, dir: &Path, stem: &str) -> Vec<String> {
        let dir_s = dir.to_string_lossy();
        let output = temp_path(&self.output_path(dir, stem));
        let output_s = output.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace("{url}", url)
                    .replace("{dir}", &dir_s)
                    .replace("{name}", stem)
                    .replace("{output}", &output_s)
            })
            .collect()
    }
}

impl StreamDownloader for ExternalStreamDownloader {
    fn download_stream(&self, url: &str, dir: &Path, stem: &str) -> Result<PathBuf, AssetError> {
        let final_path = self.output_path(dir, stem);
        let part = temp_path(&final_path);
        let args = self.expand_args(url, dir, stem);
        tracing::info!(program = %self.program, url, dir = %dir.display(), "delegating stream download");

        let result = self.run(url, dir, &args);
        if let Err(e) = result {
            discard_part(&part);
            return Err(e);
        }

        if part.exists() {
            std::fs::rename(&part, &final_path).map_err(|source| AssetError::WriteFailure {
                path: final_path.clone(),
                source,
            })?;
        } else if !final_path.exists() {
            return Err(AssetError::StreamFailed {
                url: url.to_string(),
                reason: format!("{} produced no file at {}", self.program, part.display()),
            });
        }
        Ok(final_path)
    }
}

impl ExternalStreamDownloader {
    fn run(&self, url: &str, dir: &Path, args: &[String]) -> Result<(), AssetError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| AssetError::StreamFailed {
                url: url.to_string(),
                reason: format!("could not run {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
            return Err(AssetError::StreamFailed {
                url: url.to_string(),
                reason: format!("{} exited with {}: {}", self.program, output.status, last_line.trim()),
            });
        }
        Ok(())
    }
}

fn discard_part(part: &Path) {
    match std::fs::remove_file(part) {
        Ok(()) => tracing::debug!(path = %part.display(), "removed partial stream output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %part.display(), "could not remove partial stream output: {}", e),
    }
}
