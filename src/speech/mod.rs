//! Speech capability adapters
//!
//! - `Listener` wraps a `SpeechRecognizer` (speech-to-text)
//! - `Speaker` wraps a `SpeechSynthesizer` (text-to-speech)

pub mod stt;
pub mod tts;

pub use stt::{
    Listener, RecognitionEvent, ScriptedRecognizer, SpeechRecognizer, UnsupportedRecognizer,
};
pub use tts::{
    select_voice, CommandSynthesizer, SimulatedSynthesizer, Speaker, SpeechSynthesizer,
    SynthesisEvent, UnsupportedSynthesizer, Utterance, Voice,
};
