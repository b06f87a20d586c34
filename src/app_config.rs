use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Subtitle acquisition settings
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Playback session settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Where the favorites list is persisted
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which remote source backs the orchestrator.
///
/// The two modes are alternate deployments of the same contract; only
/// one is active for a given configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    // @mode: Scrape the watch page for a caption manifest
    #[default]
    Scrape,
    // @mode: Run an external caption extraction tool
    ExternalTool,
}

impl AcquisitionMode {
    // @returns: Human readable mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Scrape => "page scrape",
            Self::ExternalTool => "external tool",
        }
    }
}

impl std::fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scrape => write!(f, "scrape"),
            Self::ExternalTool => write!(f, "external_tool"),
        }
    }
}

impl std::str::FromStr for AcquisitionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "scrape" => Ok(Self::Scrape),
            "external_tool" | "tool" => Ok(Self::ExternalTool),
            _ => Err(anyhow!("Invalid acquisition mode: {}", s)),
        }
    }
}

/// Subtitle acquisition configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AcquisitionConfig {
    /// Remote source used when no local file exists
    #[serde(default)]
    pub mode: AcquisitionMode,

    /// Directory holding pre-supplied subtitle files named `<videoId>.<ext>`
    #[serde(default = "default_subtitles_dir")]
    pub subtitles_dir: PathBuf,

    /// Extension of pre-supplied subtitle files
    #[serde(default = "default_subtitle_extension")]
    pub subtitle_extension: String,

    /// Caption language to prefer when several tracks exist
    #[serde(default = "default_preferred_language")]
    pub preferred_language: String,

    /// Base URL of the public watch page
    #[serde(default = "default_watch_url_base")]
    pub watch_url_base: String,

    /// User agent sent when fetching the watch page
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Caption extraction tool executable
    #[serde(default = "default_tool_path")]
    pub tool_path: String,

    /// Hard execution bound for the extraction tool, in seconds
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            mode: AcquisitionMode::default(),
            subtitles_dir: default_subtitles_dir(),
            subtitle_extension: default_subtitle_extension(),
            preferred_language: default_preferred_language(),
            watch_url_base: default_watch_url_base(),
            user_agent: default_user_agent(),
            http_timeout_secs: default_http_timeout_secs(),
            tool_path: default_tool_path(),
            tool_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

/// Playback session configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Position polling cadence in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Seconds moved by the skip back/forward controls
    #[serde(default = "default_skip_seconds")]
    pub skip_seconds: f64,

    /// Span used to complete a repeat region when only one marker is set
    #[serde(default = "default_repeat_span_secs")]
    pub default_repeat_span_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            skip_seconds: default_skip_seconds(),
            default_repeat_span_secs: default_repeat_span_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_subtitles_dir() -> PathBuf {
    PathBuf::from("subtitles")
}

fn default_subtitle_extension() -> String {
    "srt".to_string()
}

fn default_preferred_language() -> String {
    "en".to_string()
}

fn default_watch_url_base() -> String {
    "https://www.youtube.com/watch".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_tool_path() -> String {
    "yt-dlp".to_string()
}

fn default_tool_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_skip_seconds() -> f64 {
    10.0
}

fn default_repeat_span_secs() -> f64 {
    10.0
}

fn default_favorites_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shadowsub")
        .join("favorites.json")
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let acquisition = &self.acquisition;

        crate::language_utils::validate_language_code(&acquisition.preferred_language)?;

        if acquisition.http_timeout_secs == 0 {
            return Err(anyhow!("HTTP timeout must be greater than zero"));
        }

        if acquisition.tool_timeout_secs == 0 {
            return Err(anyhow!("Tool timeout must be greater than zero"));
        }

        if acquisition.mode == AcquisitionMode::ExternalTool && acquisition.tool_path.trim().is_empty() {
            return Err(anyhow!("A tool path is required for the external tool mode"));
        }

        if acquisition.subtitle_extension.trim().is_empty() {
            return Err(anyhow!("Subtitle extension must not be empty"));
        }

        if self.playback.poll_interval_ms == 0 {
            return Err(anyhow!("Poll interval must be greater than zero"));
        }

        if !(self.playback.skip_seconds > 0.0) {
            return Err(anyhow!("Skip seconds must be positive"));
        }

        if !(self.playback.default_repeat_span_secs > 0.0) {
            return Err(anyhow!("Default repeat span must be positive"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            acquisition: AcquisitionConfig::default(),
            playback: PlaybackConfig::default(),
            favorites_path: default_favorites_path(),
            log_level: LogLevel::default(),
        }
    }
}
