//! Text-to-speech playback
//!
//! The `Speaker` is the UI-facing facade over a `SpeechSynthesizer` backend.
//! Only one utterance is ever active: speaking again cancels the previous
//! one, and events belonging to cancelled utterances are ignored.

use crate::i18n::Language;
use crate::{ParleyError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A voice offered by the synthesizer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 language tag, e.g. `he-IL`
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Pick the first voice matching `language`, else the first voice available
pub fn select_voice(voices: &[Voice], language: Language) -> Option<Voice> {
    let tag = language.tag();
    voices
        .iter()
        .find(|v| v.lang.to_ascii_lowercase().starts_with(tag))
        .or_else(|| voices.first())
        .cloned()
}

/// One request to speak
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    pub id: Uuid,
    pub text: String,
    pub language: Language,
    pub voice: Option<Voice>,
}

/// Event emitted by a synthesizer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthesisEvent {
    /// Audio output has begun
    Started { utterance: Uuid },
    /// Audio output completed
    Finished { utterance: Uuid },
    /// Output failed or was interrupted
    Error { utterance: Uuid, error: String },
}

impl SynthesisEvent {
    pub fn utterance(&self) -> Uuid {
        match self {
            SynthesisEvent::Started { utterance }
            | SynthesisEvent::Finished { utterance }
            | SynthesisEvent::Error { utterance, .. } => *utterance,
        }
    }
}

/// Speech synthesis capability
pub trait SpeechSynthesizer: Send {
    fn voices(&self) -> Vec<Voice>;

    /// Begin speaking; progress is reported on `events`
    fn speak(&mut self, utterance: Utterance, events: Sender<SynthesisEvent>) -> Result<()>;

    /// Cancel whatever is being spoken
    fn cancel(&mut self);
}

/// Text-to-speech facade used by the UI
pub struct Speaker {
    synthesizer: Box<dyn SpeechSynthesizer>,
    language: Language,
    voices: Vec<Voice>,
    selected_voice: Option<Voice>,
    event_tx: Sender<SynthesisEvent>,
    event_rx: Receiver<SynthesisEvent>,
    current: Option<Uuid>,
    speaking: bool,
}

impl Speaker {
    pub fn new(synthesizer: Box<dyn SpeechSynthesizer>, language: Language) -> Self {
        let (event_tx, event_rx) = unbounded();
        let voices = synthesizer.voices();
        let selected_voice = select_voice(&voices, language);
        Self {
            synthesizer,
            language,
            voices,
            selected_voice,
            event_tx,
            event_rx,
            current: None,
            speaking: false,
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.selected_voice.as_ref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and pick a matching voice
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.selected_voice = select_voice(&self.voices, language);
    }

    /// Re-read the synthesizer's voices, e.g. after they finished loading
    pub fn refresh_voices(&mut self) {
        self.voices = self.synthesizer.voices();
        self.selected_voice = select_voice(&self.voices, self.language);
    }

    pub fn change_voice(&mut self, voice: Voice) {
        self.selected_voice = Some(voice);
    }

    /// Speak `text`, cancelling any utterance in flight. Empty text only cancels.
    pub fn speak(&mut self, text: &str) {
        self.cancel_current();

        if text.trim().is_empty() {
            return;
        }

        let utterance = Utterance {
            id: Uuid::new_v4(),
            text: text.to_string(),
            language: self.language,
            voice: self.selected_voice.clone(),
        };
        let id = utterance.id;

        match self.synthesizer.speak(utterance, self.event_tx.clone()) {
            Ok(()) => {
                debug!(utterance = %id, "Utterance started");
                self.current = Some(id);
                self.speaking = true;
            }
            Err(e) => {
                warn!("Speech synthesis unavailable: {}", e);
            }
        }
    }

    pub fn stop(&mut self) {
        self.cancel_current();
    }

    /// Stop when speaking, otherwise speak `text`
    pub fn toggle(&mut self, text: &str) {
        if self.speaking {
            self.stop();
        } else {
            self.speak(text);
        }
    }

    /// Apply pending synthesizer events. Call once per frame.
    pub fn poll(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if Some(event.utterance()) != self.current {
                continue;
            }

            match event {
                SynthesisEvent::Started { .. } => {
                    self.speaking = true;
                }
                SynthesisEvent::Finished { .. } => {
                    self.speaking = false;
                    self.current = None;
                }
                SynthesisEvent::Error { error, .. } => {
                    warn!("Speech synthesis error: {}", error);
                    self.speaking = false;
                    self.current = None;
                }
            }
        }
    }

    fn cancel_current(&mut self) {
        if self.current.take().is_some() || self.speaking {
            self.synthesizer.cancel();
        }
        self.speaking = false;
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

/// Synthesizer for platforms without speech output
#[derive(Debug, Default)]
pub struct UnsupportedSynthesizer;

impl SpeechSynthesizer for UnsupportedSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, _utterance: Utterance, _events: Sender<SynthesisEvent>) -> Result<()> {
        Err(ParleyError::SpeechUnsupported(
            "speech synthesis not supported on this system".to_string(),
        ))
    }

    fn cancel(&mut self) {}
}

/// Simulated synthesizer that "plays" for a duration proportional to the text
pub struct SimulatedSynthesizer {
    voices: Vec<Voice>,
    words_per_minute: u32,
    cancel_tx: Option<Sender<()>>,
}

impl SimulatedSynthesizer {
    pub fn new(voices: Vec<Voice>, words_per_minute: u32) -> Self {
        Self {
            voices,
            words_per_minute: words_per_minute.max(1),
            cancel_tx: None,
        }
    }

    /// Playback time for `text` at the configured rate
    pub fn duration_for(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count() as u64;
        Duration::from_millis(words * 60_000 / u64::from(self.words_per_minute))
    }
}

impl SpeechSynthesizer for SimulatedSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance, events: Sender<SynthesisEvent>) -> Result<()> {
        self.cancel();

        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let duration = self.duration_for(&utterance.text);
        let id = utterance.id;

        thread::Builder::new()
            .name("simulated-synthesizer".to_string())
            .spawn(move || {
                let _ = events.send(SynthesisEvent::Started { utterance: id });
                match cancel_rx.recv_timeout(duration) {
                    Err(RecvTimeoutError::Timeout) => {
                        let _ = events.send(SynthesisEvent::Finished { utterance: id });
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        let _ = events.send(SynthesisEvent::Error {
                            utterance: id,
                            error: "interrupted".to_string(),
                        });
                    }
                }
            })
            .map_err(|e| ParleyError::SynthesisError(format!("Failed to spawn playback: {}", e)))?;

        self.cancel_tx = Some(cancel_tx);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.try_send(());
        }
    }
}

/// Platform synthesizer that shells out to a TTS command (`espeak-ng`, `say`)
pub struct CommandSynthesizer {
    program: String,
    voices: Vec<Voice>,
    /// Running child, tagged with the utterance it speaks
    child: Arc<Mutex<Option<(Uuid, Child)>>>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, voices: Vec<Voice>) -> Self {
        Self {
            program: program.into(),
            voices,
            child: Arc::new(Mutex::new(None)),
        }
    }

    fn command_for(&self, utterance: &Utterance) -> Command {
        let mut command = Command::new(&self.program);
        let is_say = self.program.ends_with("say");
        if let Some(voice) = &utterance.voice {
            if is_say {
                command.arg("-v").arg(&voice.name);
            } else {
                command.arg("-v").arg(&voice.lang);
            }
        } else if !is_say {
            command.arg("-v").arg(utterance.language.tag());
        }
        command
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

/// Watch the child spawned for `id` until it exits or leaves the slot
fn watch_child(
    slot: &Mutex<Option<(Uuid, Child)>>,
    id: Uuid,
) -> Option<std::io::Result<ExitStatus>> {
    loop {
        let mut guard = slot.lock();
        match guard.as_mut() {
            Some((owner, child)) if *owner == id => match child.try_wait() {
                Ok(Some(status)) => {
                    guard.take();
                    return Some(Ok(status));
                }
                Ok(None) => {
                    drop(guard);
                    thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    guard.take();
                    return Some(Err(e));
                }
            },
            // Cancelled, or the slot now belongs to a newer utterance
            _ => return None,
        }
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance, events: Sender<SynthesisEvent>) -> Result<()> {
        self.cancel();

        let child = self.command_for(&utterance).spawn().map_err(|e| {
            ParleyError::SpeechUnsupported(format!("Failed to run {}: {}", self.program, e))
        })?;
        info!(program = %self.program, utterance = %utterance.id, "Speaking");
        let id = utterance.id;
        *self.child.lock() = Some((id, child));

        let slot = Arc::clone(&self.child);
        thread::Builder::new()
            .name("command-synthesizer".to_string())
            .spawn(move || {
                let _ = events.send(SynthesisEvent::Started { utterance: id });
                let event = match watch_child(&slot, id) {
                    None => SynthesisEvent::Error {
                        utterance: id,
                        error: "interrupted".to_string(),
                    },
                    Some(Ok(status)) if status.success() => {
                        SynthesisEvent::Finished { utterance: id }
                    }
                    Some(Ok(status)) => SynthesisEvent::Error {
                        utterance: id,
                        error: format!("TTS command exited with {}", status),
                    },
                    Some(Err(e)) => {
                        error!("Failed to wait for TTS command: {}", e);
                        SynthesisEvent::Error {
                            utterance: id,
                            error: e.to_string(),
                        }
                    }
                };
                let _ = events.send(event);
            })
            .map_err(|e| ParleyError::SynthesisError(format!("Failed to spawn watcher: {}", e)))?;

        Ok(())
    }

    fn cancel(&mut self) {
        let taken = self.child.lock().take();
        if let Some((id, mut child)) = taken {
            debug!(utterance = %id, "Killing TTS command");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn voices() -> Vec<Voice> {
        vec![Voice::new("Alex", "en-US"), Voice::new("Carmit", "he-IL")]
    }

    /// Synthesizer that records calls and never emits on its own
    #[derive(Clone, Default)]
    struct RecordingSynthesizer {
        spoken: Arc<Mutex<Vec<Utterance>>>,
        cancels: Arc<Mutex<usize>>,
        voices: Arc<Mutex<Vec<Voice>>>,
    }

    impl RecordingSynthesizer {
        fn with_voices(voices: Vec<Voice>) -> Self {
            Self {
                voices: Arc::new(Mutex::new(voices)),
                ..Default::default()
            }
        }
    }

    impl SpeechSynthesizer for RecordingSynthesizer {
        fn voices(&self) -> Vec<Voice> {
            self.voices.lock().clone()
        }

        fn speak(&mut self, utterance: Utterance, _events: Sender<SynthesisEvent>) -> Result<()> {
            self.spoken.lock().push(utterance);
            Ok(())
        }

        fn cancel(&mut self) {
            *self.cancels.lock() += 1;
        }
    }

    #[test]
    fn test_select_voice_matches_language() {
        let voices = voices();
        assert_eq!(select_voice(&voices, Language::Hebrew).unwrap().name, "Carmit");
        assert_eq!(select_voice(&voices, Language::English).unwrap().name, "Alex");
    }

    #[test]
    fn test_select_voice_falls_back_to_first() {
        let voices = vec![Voice::new("Thomas", "fr-FR"), Voice::new("Anna", "de-DE")];
        assert_eq!(select_voice(&voices, Language::Hebrew).unwrap().name, "Thomas");
        assert!(select_voice(&[], Language::English).is_none());
    }

    #[test]
    fn test_speak_uses_language_and_voice() {
        let synth = RecordingSynthesizer::with_voices(voices());
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::Hebrew);

        speaker.speak("שלום");
        assert!(speaker.is_speaking());

        let spoken = synth.spoken.lock();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].language, Language::Hebrew);
        assert_eq!(spoken[0].voice.as_ref().unwrap().name, "Carmit");
    }

    #[test]
    fn test_speak_cancels_previous_utterance() {
        let synth = RecordingSynthesizer::default();
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::English);

        speaker.speak("one");
        speaker.speak("two");

        assert_eq!(*synth.cancels.lock(), 1);
        assert_eq!(synth.spoken.lock().len(), 2);
        assert!(speaker.is_speaking());
    }

    #[test]
    fn test_empty_text_is_noop() {
        let synth = RecordingSynthesizer::default();
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::English);

        speaker.speak("   ");
        assert!(!speaker.is_speaking());
        assert!(synth.spoken.lock().is_empty());
    }

    #[test]
    fn test_stop_clears_flag_immediately() {
        let synth = RecordingSynthesizer::default();
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::English);

        speaker.speak("hello");
        speaker.stop();

        assert!(!speaker.is_speaking());
        assert_eq!(*synth.cancels.lock(), 1);
    }

    #[test]
    fn test_set_language_reselects_voice() {
        let synth = RecordingSynthesizer::with_voices(voices());
        let mut speaker = Speaker::new(Box::new(synth), Language::English);
        assert_eq!(speaker.selected_voice().unwrap().name, "Alex");

        speaker.set_language(Language::Hebrew);
        assert_eq!(speaker.selected_voice().unwrap().name, "Carmit");
    }

    #[test]
    fn test_change_voice_applies_to_next_utterance() {
        let synth = RecordingSynthesizer::with_voices(voices());
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::English);

        speaker.change_voice(Voice::new("Carmit", "he-IL"));
        assert_eq!(speaker.selected_voice().unwrap().name, "Carmit");
        // Language is unchanged; only the voice differs
        assert_eq!(speaker.language(), Language::English);

        speaker.speak("hello");
        let spoken = synth.spoken.lock();
        assert_eq!(spoken[0].voice.as_ref().unwrap().name, "Carmit");
        assert_eq!(spoken[0].language, Language::English);
    }

    #[test]
    fn test_refresh_voices_picks_up_late_voices() {
        let synth = RecordingSynthesizer::default();
        let mut speaker = Speaker::new(Box::new(synth.clone()), Language::Hebrew);
        assert!(speaker.voices().is_empty());
        assert!(speaker.selected_voice().is_none());

        *synth.voices.lock() = voices();
        speaker.refresh_voices();

        assert_eq!(speaker.voices().len(), 2);
        assert_eq!(speaker.selected_voice().unwrap().name, "Carmit");
    }

    #[test]
    fn test_unsupported_synthesizer_never_speaks() {
        let mut speaker = Speaker::new(Box::new(UnsupportedSynthesizer), Language::English);
        speaker.speak("hello");
        assert!(!speaker.is_speaking());
        assert!(speaker.selected_voice().is_none());
    }

    #[test]
    fn test_simulated_synthesizer_finishes() {
        let synth = SimulatedSynthesizer::new(voices(), 60_000);
        let mut speaker = Speaker::new(Box::new(synth), Language::English);

        speaker.speak("a few short words");
        assert!(speaker.is_speaking());

        let deadline = Instant::now() + Duration::from_secs(2);
        while speaker.is_speaking() && Instant::now() < deadline {
            speaker.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!speaker.is_speaking());
    }

    #[test]
    fn test_simulated_interruption_does_not_clear_new_utterance() {
        let synth = SimulatedSynthesizer::new(voices(), 1);
        let mut speaker = Speaker::new(Box::new(synth), Language::English);

        speaker.speak("long text that takes minutes");
        speaker.speak("another long text");
        thread::sleep(Duration::from_millis(50));
        speaker.poll();

        // The "interrupted" error belongs to the first utterance
        assert!(speaker.is_speaking());
        speaker.stop();
        assert!(!speaker.is_speaking());
    }

    #[test]
    fn test_simulated_duration() {
        let synth = SimulatedSynthesizer::new(Vec::new(), 120);
        assert_eq!(synth.duration_for("one two"), Duration::from_secs(1));
        assert_eq!(synth.duration_for(""), Duration::ZERO);
    }

    #[test]
    fn test_missing_command_is_unsupported() {
        let mut synth = CommandSynthesizer::new("parley-no-such-tts-binary", Vec::new());
        let (tx, _rx) = unbounded();
        let utterance = Utterance {
            id: Uuid::new_v4(),
            text: "hello".to_string(),
            language: Language::English,
            voice: None,
        };
        assert!(matches!(
            synth.speak(utterance, tx),
            Err(ParleyError::SpeechUnsupported(_))
        ));
    }

    #[cfg(unix)]
    fn sleeping_script(seconds: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!("parley-tts-{}.sh", Uuid::new_v4()));
        std::fs::write(&path, format!("#!/bin/sh\nsleep {}\n", seconds)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_command_cancel_does_not_leak_into_next_utterance() {
        let script = sleeping_script("0.3");
        let mut synth = CommandSynthesizer::new(script.to_string_lossy(), Vec::new());
        let (tx, rx) = unbounded();
        let utterance = |text: &str| Utterance {
            id: Uuid::new_v4(),
            text: text.to_string(),
            language: Language::English,
            voice: None,
        };

        let first = utterance("first");
        let first_id = first.id;
        synth.speak(first, tx.clone()).unwrap();
        thread::sleep(Duration::from_millis(120));
        synth.cancel();

        let second = utterance("second");
        let second_id = second.id;
        synth.speak(second, tx).unwrap();

        let mut events = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            match rx.recv_timeout(Duration::from_millis(50)) {
                Ok(event) => {
                    let done = event == SynthesisEvent::Finished { utterance: second_id };
                    events.push(event);
                    if done {
                        break;
                    }
                }
                Err(_) => continue,
            }
        }
        let _ = std::fs::remove_file(&script);

        assert!(events.contains(&SynthesisEvent::Error {
            utterance: first_id,
            error: "interrupted".to_string(),
        }));
        assert!(events.contains(&SynthesisEvent::Finished { utterance: second_id }));
        assert!(!events.contains(&SynthesisEvent::Finished { utterance: first_id }));
        assert!(!events.iter().any(|e| matches!(
            e,
            SynthesisEvent::Error { utterance, .. } if *utterance == second_id
        )));
    }
}
