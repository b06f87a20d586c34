use async_trait::async_trait;
use log::{debug, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::app_config::AcquisitionConfig;
use crate::errors::AcquisitionError;
use crate::file_utils::FileManager;
use crate::formats::parse_vtt;
use crate::sources::SubtitleSource;
use crate::subtitle::Subtitle;
use crate::video_id::VideoId;

// @module: Caption extraction through an external downloader process

/// Runs a caption extraction tool (yt-dlp compatible command line) and
/// parses the web caption file it writes.
///
/// The video id reaches the command line only as a validated `VideoId`,
/// passed as a separate argument after `--`; no shell is involved.
#[derive(Debug, Clone)]
pub struct ExternalToolSource {
    /// Executable to run
    tool_path: String,
    /// Hard execution bound
    timeout: Duration,
    /// Caption language requested from the tool
    language: String,
}

impl ExternalToolSource {
    pub fn new(tool_path: impl Into<String>, timeout: Duration, language: impl Into<String>) -> Self {
        Self {
            tool_path: tool_path.into(),
            timeout,
            language: language.into(),
        }
    }

    /// Create an external tool source from configuration
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        let language = crate::language_utils::normalize_to_part1_or_part2t(&config.preferred_language)
            .unwrap_or_else(|_| config.preferred_language.clone());

        Self::new(
            config.tool_path.clone(),
            Duration::from_secs(config.tool_timeout_secs),
            language,
        )
    }

    /// File suffixes the tool may have written, in probing order
    pub fn candidate_suffixes(&self) -> Vec<String> {
        vec![
            format!("{}.vtt", self.language),
            format!("{}-orig.vtt", self.language),
        ]
    }

    /// Command line arguments for one extraction
    pub fn build_args(&self, video_id: &VideoId, output_stem: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--skip-download",
            "--no-playlist",
            "--write-subs",
            "--write-auto-subs",
            "--sub-format",
            "vtt",
            "--sub-langs",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.push(OsString::from(format!("{0},{0}-orig", self.language)));
        args.push(OsString::from("-o"));
        args.push(output_stem.as_os_str().to_owned());
        args.push(OsString::from("--"));
        args.push(OsString::from(video_id.watch_url()));
        args
    }

    fn find_output(&self, output_stem: &Path) -> Option<PathBuf> {
        let stem = output_stem.as_os_str().to_string_lossy();
        self.candidate_suffixes()
            .into_iter()
            .map(|suffix| PathBuf::from(format!("{}.{}", stem, suffix)))
            .find(|path| FileManager::file_exists(path))
    }

    /// Keep only the diagnostic lines of the tool's stderr
    fn summarize_stderr(stderr: &str) -> String {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("ERROR:") || line.starts_with("WARNING:"))
            .collect();

        if meaningful.is_empty() {
            stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("no output").trim().to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl SubtitleSource for ExternalToolSource {
    fn name(&self) -> &'static str {
        "external tool"
    }

    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<Subtitle>, AcquisitionError> {
        // Removed together with anything the tool left behind when this returns
        let workdir = tempfile::Builder::new()
            .prefix("shadowsub-")
            .tempdir()
            .map_err(|e| AcquisitionError::SourceUnavailable(format!("temp dir: {}", e)))?;
        let output_stem = workdir.path().join(video_id.as_str());

        let mut command = Command::new(&self.tool_path);
        command
            .args(self.build_args(video_id, &output_stem))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AcquisitionError::SourceUnavailable(format!(
                    "failed to run {}: {}",
                    self.tool_path, e
                )));
            }
            Err(_) => {
                warn!("{} timed out after {:?} for {}", self.tool_path, self.timeout, video_id);
                return Err(AcquisitionError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                "{} exited with {}: {}",
                self.tool_path,
                output.status,
                Self::summarize_stderr(&stderr)
            );
        }

        let Some(path) = self.find_output(&output_stem) else {
            return Err(AcquisitionError::SourceUnavailable(format!(
                "{} wrote no caption file for {}",
                self.tool_path, video_id
            )));
        };

        let content = tokio::fs::read_to_string(&path).await;
        FileManager::remove_quietly(&path);
        let content = content.map_err(|e| {
            AcquisitionError::SourceUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Ok(parse_vtt(&content))
    }
}
