use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Subtitle source settings
    pub subtitles: SubtitleConfig,

    /// Translation provider settings
    pub translation: TranslationConfig,

    /// Web server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    /// Language code of the subtitles to fetch.
    ///
    /// The original product fetched Korean captions only; the web UI never
    /// exposes this, but the config and CLI can override it.
    pub source_language: String,

    /// Timeout for watch-page and timedtext requests, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Timeout for translation requests, in seconds
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the web UI binds to
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subtitles: SubtitleConfig {
                source_language: "ko".to_string(),
                request_timeout_secs: 30,
            },
            translation: TranslationConfig {
                request_timeout_secs: 30,
            },
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("subtrans.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("subtrans").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.subtitles.source_language.trim().is_empty() {
            anyhow::bail!("Subtitle source language must not be empty");
        }

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("Server bind address is not a valid socket address: {}", self.server.bind);
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Subtitle Language: {}", self.subtitles.source_language);
        println!("  Subtitle Timeout: {}s", self.subtitles.request_timeout_secs);
        println!("  Translation Timeout: {}s", self.translation.request_timeout_secs);
        println!("  Server Bind: {}", self.server.bind);
    }
}
