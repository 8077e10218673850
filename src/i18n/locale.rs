//! Language selection and text direction

use crate::{ParleyError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "he")]
    Hebrew,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hebrew];

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }

    /// Name of the language in that language, for the switcher
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hebrew => "עברית",
        }
    }

    pub fn direction(&self) -> Direction {
        resolve_direction(self.tag())
    }

    /// Whether egui's bundled fonts cover this language's script
    pub fn has_bundled_glyphs(&self) -> bool {
        match self {
            Language::English => true,
            Language::Hebrew => false,
        }
    }

    /// Parse a tag, falling back to English for anything unsupported
    pub fn from_tag_or_default(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = ParleyError;

    fn from_str(s: &str) -> Result<Self> {
        let primary = s.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            // "iw" is the deprecated code still reported by some platforms
            "he" | "iw" => Ok(Language::Hebrew),
            _ => Err(ParleyError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction for a language tag: Hebrew is right-to-left, everything else left-to-right
pub fn resolve_direction(tag: &str) -> Direction {
    match tag.parse::<Language>() {
        Ok(Language::Hebrew) => Direction::Rtl,
        _ => Direction::Ltr,
    }
}

/// Notification sent to subscribers when the active language changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleChange {
    pub language: Language,
    pub direction: Direction,
}

/// Active language plus its resolved direction
#[derive(Debug)]
pub struct LocaleState {
    language: Language,
    direction: Direction,
    subscribers: Vec<Sender<LocaleChange>>,
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl LocaleState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            direction: language.direction(),
            subscribers: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }

    /// Receive every future language change
    pub fn subscribe(&mut self) -> Receiver<LocaleChange> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Switch the active language. Returns whether anything changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.language == language {
            debug!(%language, "Language unchanged");
            return false;
        }

        self.language = language;
        self.direction = language.direction();
        info!(%language, direction = %self.direction, "Language switched");

        let change = LocaleChange {
            language,
            direction: self.direction,
        };
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(change).is_ok());
        true
    }

    /// Switch by tag, e.g. from a settings file
    pub fn set_language_tag(&mut self, tag: &str) -> Result<bool> {
        let language = tag.parse()?;
        Ok(self.set_language(language))
    }
}
