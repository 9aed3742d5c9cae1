//! CLI configuration management.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file,
//! `.env` and environment variables, then command line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starlab_automaton::SessionConfig;

/// Screen a bundle starts on unless told otherwise.
pub const DEFAULT_START: &str = "Welcome";

/// Application-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lesson bundle directory.
    pub bundle: Option<PathBuf>,

    /// Initial screen.
    pub start: String,

    /// Canvas and animation settings handed to the engine.
    #[serde(flatten)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle: None,
            start: DEFAULT_START.to_string(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load from the config file and the environment.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override fields from `STARLAB_*` variables.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(bundle) = var("STARLAB_BUNDLE") {
            self.bundle = Some(PathBuf::from(bundle));
        }
        if let Some(start) = var("STARLAB_START") {
            self.start = start;
        }
        if let Some(width) = var("STARLAB_CANVAS_WIDTH") {
            self.session.canvas_width = parse_var("STARLAB_CANVAS_WIDTH", &width)?;
        }
        if let Some(height) = var("STARLAB_CANVAS_HEIGHT") {
            self.session.canvas_height = parse_var("STARLAB_CANVAS_HEIGHT", &height)?;
        }
        if let Some(delay) = var("STARLAB_TIMER_DELAY_MS") {
            self.session.timer_delay_ms = parse_var("STARLAB_TIMER_DELAY_MS", &delay)?;
        }
        if let Some(duration) = var("STARLAB_ANIMATION_MS") {
            self.session.animation_ms = parse_var("STARLAB_ANIMATION_MS", &duration)?;
        }
        Ok(())
    }

    /// Bundle directory, or an error telling the user how to set one.
    pub fn require_bundle(&self) -> Result<&Path> {
        self.bundle.as_deref().context(
            "No lesson bundle given. Pass --bundle DIR or set STARLAB_BUNDLE",
        )
    }

    /// Path to the config file. `STARLAB_CONFIG` overrides the platform
    /// location.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("STARLAB_CONFIG") {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "starlab", "starlab")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value {value:?} for {key}"))
}
