//! Configuration and adapter wiring

pub mod adapters;
pub mod config;

pub use adapters::SpeechAdapters;
pub use config::{
    AppConfig, RecognizerKind, ResponderConfig, SpeechConfig, SynthesizerKind, ThemeMode,
    UiConfig, CONFIG_ENV_VAR,
};
