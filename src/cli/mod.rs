use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::language::TargetLanguage;

#[derive(Parser)]
#[command(
    name = "subtrans",
    about = "Fetch YouTube subtitles and translate them to your language",
    version,
    long_about = "Fetches the subtitles of a YouTube video in a fixed source language (Korean by default), translates them with automatic source-language detection, and prints, saves, or serves the result through a small web UI."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and translate the subtitles of one video
    Translate {
        /// YouTube video URL (watch?v=... or /v/... forms)
        #[arg(value_name = "URL")]
        url: String,

        /// Target language for the translation
        #[arg(short, long, value_enum, value_name = "LANG")]
        to: TargetLanguage,

        /// Subtitle source language code (overrides the configured default)
        #[arg(long, value_name = "CODE")]
        from: Option<String>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the web UI
    Serve {
        /// Bind address (overrides the configured default)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },

    /// List supported target languages
    Languages,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text, the translated subtitles only
    Text,
    /// JSON with run metadata
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
