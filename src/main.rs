// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use shadowsub::app_config::{self, AcquisitionMode, Config};
use shadowsub::file_utils::FileManager;
use shadowsub::{ComparisonReport, FavoritesStore, SubtitleAcquirer, SubtitleCollection, VideoId};

/// CLI Wrapper for AcquisitionMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAcquisitionMode {
    Scrape,
    ExternalTool,
}

impl From<CliAcquisitionMode> for AcquisitionMode {
    fn from(cli_mode: CliAcquisitionMode) -> Self {
        match cli_mode {
            CliAcquisitionMode::Scrape => AcquisitionMode::Scrape,
            CliAcquisitionMode::ExternalTool => AcquisitionMode::ExternalTool,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Output format of the fetch command
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Srt,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Acquire the subtitles of a video
    Fetch {
        /// Video identifier or watch/short/embed URL
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "srt")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score a spoken transcript against a reference line
    Score {
        /// Reference caption text
        #[arg(short, long)]
        reference: String,

        /// Recognized transcript
        #[arg(short = 'R', long)]
        recognized: String,
    },

    /// Manage favorite videos
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// List videos with pre-supplied subtitle files
    Local,

    /// Generate shell completions for shadowsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// Show saved videos
    List,

    /// Save a video
    Add {
        #[arg(value_name = "VIDEO")]
        video: String,

        /// Display title, defaults to the video id
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Forget a saved video
    Remove {
        #[arg(value_name = "VIDEO")]
        video: String,
    },
}

/// shadowsub - Subtitles for shadowing practice
///
/// Fetches time-aligned captions of YouTube videos and scores spoken
/// attempts against them.
#[derive(Parser, Debug)]
#[command(name = "shadowsub")]
#[command(version)]
#[command(about = "Subtitle acquisition for English shadowing practice")]
#[command(long_about = "shadowsub acquires time-aligned captions for YouTube videos from local files, \
the public watch page or an external caption tool, and scores spoken attempts against them.

EXAMPLES:
    shadowsub fetch dQw4w9WgXcQ                       # Print subtitles as SRT
    shadowsub fetch https://youtu.be/dQw4w9WgXcQ -f json
    shadowsub --mode external-tool fetch dQw4w9WgXcQ  # Use the external caption tool
    shadowsub score -r \"the quick fox\" -R \"the slow fox\"
    shadowsub favorites add dQw4w9WgXcQ -t \"Interview\"
    shadowsub completions bash > shadowsub.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Remote subtitle source
    #[arg(short, long, value_enum, global = true)]
    mode: Option<CliAcquisitionMode>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "shadowsub", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Fetch { video, format, output } => run_fetch(&config, &video, format, output).await,
        Commands::Score { reference, recognized } => {
            print!("{}", ComparisonReport::new(&reference, &recognized));
            Ok(())
        }
        Commands::Favorites { action } => run_favorites(&config, action),
        Commands::Local => run_local(&config),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config)?;

    if let Some(mode) = &cli.mode {
        config.acquisition.mode = mode.clone().into();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

fn spinner(message: String) -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    progress.set_style(style);
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(120));
    progress
}

async fn run_fetch(config: &Config, video: &str, format: OutputFormat, output: Option<PathBuf>) -> Result<()> {
    let video_id = VideoId::from_input(video)?;
    let acquirer = SubtitleAcquirer::from_config(&config.acquisition);

    let progress = spinner(format!(
        "Fetching subtitles for {} ({})",
        video_id,
        config.acquisition.mode.display_name()
    ));
    let entries = acquirer.acquire_id(&video_id).await;
    progress.finish_and_clear();

    if entries.is_empty() {
        info!("No subtitles available for {}", video_id);
        return Ok(());
    }

    let collection = SubtitleCollection::new(video_id, entries);
    let rendered = match format {
        OutputFormat::Srt => collection.to_srt_string(),
        OutputFormat::Json => collection.to_json_string()?,
    };

    match output {
        Some(path) => {
            FileManager::write_to_file(&path, &rendered)?;
            info!("Wrote {} entries to {}", collection.entries.len(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn run_favorites(config: &Config, action: FavoritesAction) -> Result<()> {
    let store = FavoritesStore::new(config.favorites_path.clone());

    match action {
        FavoritesAction::List => {
            let favorites = store.list();
            if favorites.is_empty() {
                info!("No favorites yet");
            }
            for favorite in favorites {
                println!("{}  {}  (added {})", favorite.video_id, favorite.title, favorite.added_at);
            }
        }
        FavoritesAction::Add { video, title } => {
            let video_id = VideoId::from_input(&video)?;
            let title = title.unwrap_or_else(|| video_id.to_string());
            if store.add(&video_id, &title, None)? {
                info!("Added {} to favorites", video_id);
            } else {
                warn!("{} is already a favorite", video_id);
            }
        }
        FavoritesAction::Remove { video } => {
            let video_id = VideoId::from_input(&video)?;
            if store.remove(&video_id)? {
                info!("Removed {} from favorites", video_id);
            } else {
                warn!("{} is not a favorite", video_id);
            }
        }
    }

    Ok(())
}

fn run_local(config: &Config) -> Result<()> {
    let ids = FileManager::list_local_video_ids(
        &config.acquisition.subtitles_dir,
        &config.acquisition.subtitle_extension,
    )?;

    if ids.is_empty() {
        info!("No local subtitle files in {}", config.acquisition.subtitles_dir.display());
    }

    for id in ids {
        println!("{}", id);
    }

    Ok(())
}
