//! Application configuration
//!
//! Loaded from TOML. Every field has a default, so an empty or partial file
//! is valid and a missing file means "use defaults".

use crate::chat::responder::{DEFAULT_REPLY, DEFAULT_REPLY_DELAY};
use crate::i18n::Language;
use crate::speech::Voice;
use crate::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "PARLEY_CONFIG";

/// Top-level configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial interface language tag (`en` or `he`)
    pub language: String,

    /// Start with the demo chats and directories
    pub seed_mock_data: bool,

    pub speech: SpeechConfig,
    pub responder: ResponderConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::English.tag().to_string(),
            seed_mock_data: true,
            speech: SpeechConfig::default(),
            responder: ResponderConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    /// Simulated capture yielding configured phrases
    Scripted,
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesizerKind {
    /// External TTS program
    Command,
    /// Timed playback without audio
    Simulated,
    Unsupported,
}

/// Speech adapter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub recognizer: RecognizerKind,

    /// Transcripts returned by the scripted recognizer, in rotation
    pub phrases: Vec<String>,

    /// How long a scripted capture lasts before it ends on its own
    pub capture_window_ms: u64,

    pub synthesizer: SynthesizerKind,

    /// Playback rate for the simulated synthesizer
    pub words_per_minute: u32,

    /// Program used by the command synthesizer
    pub command: String,

    /// Voices offered to the voice picker
    pub voices: Vec<Voice>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            recognizer: RecognizerKind::Scripted,
            phrases: vec![
                "Can you help me with my project?".to_string(),
                "Please summarize the previous chat.".to_string(),
            ],
            capture_window_ms: 3000,
            synthesizer: SynthesizerKind::Command,
            words_per_minute: 180,
            command: default_tts_command().to_string(),
            voices: vec![Voice::new("English", "en-US"), Voice::new("Hebrew", "he-IL")],
        }
    }
}

impl SpeechConfig {
    pub fn capture_window(&self) -> Duration {
        Duration::from_millis(self.capture_window_ms)
    }
}

fn default_tts_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak-ng"
    }
}

/// Simulated assistant configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub enabled: bool,
    pub delay_ms: u64,
    pub reply: String,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: DEFAULT_REPLY_DELAY.as_millis() as u64,
            reply: DEFAULT_REPLY.to_string(),
        }
    }
}

impl ResponderConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Window and appearance configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeMode,

    /// Extra TTF/OTF font with Hebrew glyphs, added as a fallback
    pub font_path: Option<PathBuf>,

    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            font_path: None,
            window_width: 1100.0,
            window_height: 760.0,
        }
    }
}

impl AppConfig {
    /// Parse a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ParleyError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ParleyError::ConfigError(msg) => {
                ParleyError::ConfigError(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ParleyError::ConfigError(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the config file: `$PARLEY_CONFIG`, else `<config_dir>/parley/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("parley").join("config.toml"))
    }

    /// Load from the default location, or fall back to defaults if there is no file
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Interface language parsed from `language`
    pub fn language(&self) -> Result<Language> {
        self.language.parse()
    }

    /// Set the initial language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language.tag().to_string();
        self
    }

    /// Start with empty chat and directory lists
    pub fn without_mock_data(mut self) -> Self {
        self.seed_mock_data = false;
        self
    }

    /// Disable the simulated assistant replies
    pub fn without_responder(mut self) -> Self {
        self.responder.enabled = false;
        self
    }

    /// Use the simulated synthesizer instead of an external program
    pub fn with_simulated_speech(mut self) -> Self {
        self.speech.synthesizer = SynthesizerKind::Simulated;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.language()?;

        if self.speech.words_per_minute == 0 {
            return Err(ParleyError::ConfigError(
                "speech.words_per_minute must be greater than zero".to_string(),
            ));
        }

        if self.speech.synthesizer == SynthesizerKind::Command
            && self.speech.command.trim().is_empty()
        {
            return Err(ParleyError::ConfigError(
                "speech.command is required for the command synthesizer".to_string(),
            ));
        }

        if self.ui.window_width <= 0.0 || self.ui.window_height <= 0.0 {
            return Err(ParleyError::ConfigError(
                "ui window size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
