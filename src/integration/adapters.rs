//! Builds speech adapters from configuration

use super::config::{AppConfig, RecognizerKind, SynthesizerKind};
use crate::i18n::Language;
use crate::speech::{
    CommandSynthesizer, Listener, ScriptedRecognizer, SimulatedSynthesizer, Speaker,
    SpeechRecognizer, SpeechSynthesizer, UnsupportedRecognizer, UnsupportedSynthesizer,
};
use tracing::info;

/// The listener/speaker pair used by the UI
pub struct SpeechAdapters {
    pub listener: Listener,
    pub speaker: Speaker,
}

impl SpeechAdapters {
    pub fn new(listener: Listener, speaker: Speaker) -> Self {
        Self { listener, speaker }
    }

    /// Adapters that report speech as unavailable
    pub fn unsupported(language: Language) -> Self {
        Self::new(
            Listener::new(Box::new(UnsupportedRecognizer), language),
            Speaker::new(Box::new(UnsupportedSynthesizer), language),
        )
    }

    /// Build the adapters selected in `config`
    pub fn from_config(config: &AppConfig, language: Language) -> Self {
        let speech = &config.speech;

        let recognizer: Box<dyn SpeechRecognizer> = match speech.recognizer {
            RecognizerKind::Scripted => Box::new(ScriptedRecognizer::new(
                speech.phrases.clone(),
                speech.capture_window(),
            )),
            RecognizerKind::Unsupported => Box::new(UnsupportedRecognizer),
        };

        let synthesizer: Box<dyn SpeechSynthesizer> = match speech.synthesizer {
            SynthesizerKind::Command => Box::new(CommandSynthesizer::new(
                speech.command.clone(),
                speech.voices.clone(),
            )),
            SynthesizerKind::Simulated => Box::new(SimulatedSynthesizer::new(
                speech.voices.clone(),
                speech.words_per_minute,
            )),
            SynthesizerKind::Unsupported => Box::new(UnsupportedSynthesizer),
        };

        info!(
            recognizer = ?speech.recognizer,
            synthesizer = ?speech.synthesizer,
            %language,
            "Speech adapters ready"
        );

        Self::new(
            Listener::new(recognizer, language),
            Speaker::new(synthesizer, language),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_adapters() {
        let mut config = AppConfig::default();
        config.speech.recognizer = RecognizerKind::Unsupported;
        config.speech.synthesizer = SynthesizerKind::Unsupported;

        let adapters = SpeechAdapters::from_config(&config, Language::English);
        assert!(!adapters.listener.is_supported());
        assert!(adapters.speaker.voices().is_empty());
    }

    #[test]
    fn test_simulated_adapters_pick_language_voice() {
        let config = AppConfig::default().with_simulated_speech();
        let adapters = SpeechAdapters::from_config(&config, Language::Hebrew);

        assert!(adapters.listener.is_supported());
        assert_eq!(adapters.listener.language(), Language::Hebrew);
        assert_eq!(adapters.speaker.selected_voice().unwrap().lang, "he-IL");
    }
}
