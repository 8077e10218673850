//! Speech-to-text capture
//!
//! The `Listener` is what the UI talks to. It drives a `SpeechRecognizer`
//! backend and turns the backend's asynchronous events into two observable
//! values: whether capture is active, and a single-use transcript slot.

use crate::i18n::Language;
use crate::{ParleyError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::collections::VecDeque;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Event emitted by a recognizer for one capture session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Capture has begun
    Started { session: Uuid },
    /// Final transcript for the session
    Result { session: Uuid, transcript: String },
    /// Capture failed
    Error { session: Uuid, error: String },
    /// Capture is over, with or without a result
    End { session: Uuid },
}

impl RecognitionEvent {
    pub fn session(&self) -> Uuid {
        match self {
            RecognitionEvent::Started { session }
            | RecognitionEvent::Result { session, .. }
            | RecognitionEvent::Error { session, .. }
            | RecognitionEvent::End { session } => *session,
        }
    }
}

/// Speech recognition capability
pub trait SpeechRecognizer: Send {
    fn is_supported(&self) -> bool {
        true
    }

    /// Begin capturing; events for `session` are delivered on `events`
    fn start(
        &mut self,
        session: Uuid,
        language: Language,
        events: Sender<RecognitionEvent>,
    ) -> Result<()>;

    /// Finish capture and deliver the result
    fn stop(&mut self) -> Result<()>;

    /// Finish capture without a result
    fn abort(&mut self);
}

/// Speech-to-text facade used by the UI
pub struct Listener {
    recognizer: Box<dyn SpeechRecognizer>,
    language: Language,
    event_tx: Sender<RecognitionEvent>,
    event_rx: Receiver<RecognitionEvent>,
    session: Option<Uuid>,
    is_listening: bool,
    transcript: Option<String>,
}

impl Listener {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>, language: Language) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            recognizer,
            language,
            event_tx,
            event_rx,
            session: None,
            is_listening: false,
            transcript: None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Latest transcript, if one is waiting to be consumed
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Consume the transcript. Subsequent calls return `None` until a new capture finishes.
    pub fn take_transcript(&mut self) -> Option<String> {
        self.transcript.take()
    }

    pub fn reset_transcript(&mut self) {
        self.transcript = None;
    }

    /// Start a new capture session, superseding any previous transcript
    pub fn start_listening(&mut self) {
        if let Some(previous) = self.session.take() {
            debug!(%previous, "Superseding capture session");
            self.recognizer.abort();
        }
        self.transcript = None;

        let session = Uuid::new_v4();
        match self
            .recognizer
            .start(session, self.language, self.event_tx.clone())
        {
            Ok(()) => {
                info!(%session, language = %self.language, "Speech capture requested");
                self.session = Some(session);
            }
            Err(e) => {
                warn!("Speech recognition unavailable: {}", e);
                self.is_listening = false;
            }
        }
    }

    pub fn stop_listening(&mut self) {
        if self.session.is_none() {
            return;
        }
        if let Err(e) = self.recognizer.stop() {
            warn!("Failed to stop speech recognition: {}", e);
            self.session = None;
            self.is_listening = false;
        }
    }

    pub fn toggle(&mut self) {
        if self.is_listening || self.session.is_some() {
            self.stop_listening();
        } else {
            self.start_listening();
        }
    }

    /// Apply pending recognizer events. Call once per frame.
    pub fn poll(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if Some(event.session()) != self.session {
                debug!(session = %event.session(), "Ignoring stale recognition event");
                continue;
            }

            match event {
                RecognitionEvent::Started { .. } => {
                    self.is_listening = true;
                }
                RecognitionEvent::Result { transcript, .. } => {
                    debug!(chars = transcript.len(), "Transcript received");
                    self.transcript = Some(transcript);
                    self.is_listening = false;
                }
                RecognitionEvent::Error { error, .. } => {
                    warn!("Speech recognition error: {}", error);
                    self.is_listening = false;
                }
                RecognitionEvent::End { .. } => {
                    self.is_listening = false;
                    self.session = None;
                }
            }
        }
    }

    /// Whether a capture session is open (requested or running)
    pub fn is_busy(&self) -> bool {
        self.session.is_some()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if self.session.is_some() {
            self.recognizer.abort();
        }
    }
}

/// Recognizer for platforms without speech input
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(
        &mut self,
        _session: Uuid,
        _language: Language,
        _events: Sender<RecognitionEvent>,
    ) -> Result<()> {
        Err(ParleyError::SpeechUnsupported(
            "speech recognition not supported on this system".to_string(),
        ))
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn abort(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureSignal {
    Stop,
    Abort,
}

/// Simulated recognizer that "hears" scripted phrases.
///
/// Each capture runs on a worker thread and ends when stopped, aborted, or
/// when the capture window elapses. Phrases are used round-robin.
pub struct ScriptedRecognizer {
    phrases: VecDeque<String>,
    capture_window: Duration,
    control: Option<Sender<CaptureSignal>>,
}

impl ScriptedRecognizer {
    pub fn new(phrases: Vec<String>, capture_window: Duration) -> Self {
        Self {
            phrases: phrases.into(),
            capture_window,
            control: None,
        }
    }

    fn next_phrase(&mut self) -> Option<String> {
        let phrase = self.phrases.pop_front()?;
        self.phrases.push_back(phrase.clone());
        Some(phrase)
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(
        &mut self,
        session: Uuid,
        language: Language,
        events: Sender<RecognitionEvent>,
    ) -> Result<()> {
        self.abort();

        let (control_tx, control_rx) = bounded(1);
        let phrase = self.next_phrase();
        let window = self.capture_window;

        thread::Builder::new()
            .name("scripted-recognizer".to_string())
            .spawn(move || {
                debug!(%session, %language, "Scripted capture started");
                let _ = events.send(RecognitionEvent::Started { session });

                let deliver = match control_rx.recv_timeout(window) {
                    Ok(CaptureSignal::Stop) | Err(RecvTimeoutError::Timeout) => true,
                    Ok(CaptureSignal::Abort) | Err(RecvTimeoutError::Disconnected) => false,
                };

                if deliver {
                    match phrase {
                        Some(transcript) => {
                            let _ = events.send(RecognitionEvent::Result { session, transcript });
                        }
                        None => {
                            let _ = events.send(RecognitionEvent::Error {
                                session,
                                error: "no-speech".to_string(),
                            });
                        }
                    }
                }
                let _ = events.send(RecognitionEvent::End { session });
            })
            .map_err(|e| ParleyError::RecognitionError(format!("Failed to spawn capture: {}", e)))?;

        self.control = Some(control_tx);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(control) = self.control.take() {
            // The worker may already have finished on its own
            let _ = control.try_send(CaptureSignal::Stop);
        }
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(control) = self.control.take() {
            let _ = control.try_send(CaptureSignal::Abort);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Instant;

    /// Recognizer whose events are pushed by the test
    #[derive(Clone, Default)]
    struct ManualRecognizer {
        inner: Arc<Mutex<Option<(Uuid, Sender<RecognitionEvent>)>>>,
    }

    impl ManualRecognizer {
        fn emit(&self, make: impl FnOnce(Uuid) -> RecognitionEvent) {
            let guard = self.inner.lock();
            let (session, tx) = guard.as_ref().expect("capture not started");
            tx.send(make(*session)).unwrap();
        }
    }

    impl SpeechRecognizer for ManualRecognizer {
        fn start(
            &mut self,
            session: Uuid,
            _language: Language,
            events: Sender<RecognitionEvent>,
        ) -> Result<()> {
            *self.inner.lock() = Some((session, events));
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }

        fn abort(&mut self) {}
    }

    fn poll_until(listener: &mut Listener, done: impl Fn(&Listener) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !done(&*listener) && Instant::now() < deadline {
            listener.poll();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_transcript_consumed_once() {
        let manual = ManualRecognizer::default();
        let mut listener = Listener::new(Box::new(manual.clone()), Language::English);

        listener.start_listening();
        manual.emit(|session| RecognitionEvent::Started { session });
        listener.poll();
        assert!(listener.is_listening());

        manual.emit(|session| RecognitionEvent::Result {
            session,
            transcript: "hello there".to_string(),
        });
        manual.emit(|session| RecognitionEvent::End { session });
        listener.poll();

        assert!(!listener.is_listening());
        assert_eq!(listener.take_transcript().as_deref(), Some("hello there"));
        assert_eq!(listener.take_transcript(), None);
    }

    #[test]
    fn test_reset_transcript_discards_result() {
        let manual = ManualRecognizer::default();
        let mut listener = Listener::new(Box::new(manual.clone()), Language::English);

        listener.start_listening();
        manual.emit(|session| RecognitionEvent::Result {
            session,
            transcript: "discard me".to_string(),
        });
        manual.emit(|session| RecognitionEvent::End { session });
        listener.poll();
        assert_eq!(listener.transcript(), Some("discard me"));

        listener.reset_transcript();
        assert!(listener.transcript().is_none());
        assert_eq!(listener.take_transcript(), None);
        assert!(!listener.is_listening());
    }

    #[test]
    fn test_error_degrades_without_transcript() {
        let manual = ManualRecognizer::default();
        let mut listener = Listener::new(Box::new(manual.clone()), Language::English);

        listener.start_listening();
        manual.emit(|session| RecognitionEvent::Started { session });
        manual.emit(|session| RecognitionEvent::Error {
            session,
            error: "network".to_string(),
        });
        listener.poll();

        assert!(!listener.is_listening());
        assert!(listener.transcript().is_none());
    }

    #[test]
    fn test_stale_session_events_ignored() {
        let manual = ManualRecognizer::default();
        let mut listener = Listener::new(Box::new(manual.clone()), Language::English);

        listener.start_listening();
        let stale = manual.inner.lock().as_ref().map(|(s, _)| *s).unwrap();
        listener.start_listening();

        let tx = manual.inner.lock().as_ref().map(|(_, tx)| tx.clone()).unwrap();
        tx.send(RecognitionEvent::Result {
            session: stale,
            transcript: "old".to_string(),
        })
        .unwrap();
        listener.poll();

        assert!(listener.transcript().is_none());
    }

    #[test]
    fn test_unsupported_recognizer_stays_idle() {
        let mut listener = Listener::new(Box::new(UnsupportedRecognizer), Language::Hebrew);
        assert!(!listener.is_supported());

        listener.start_listening();
        listener.poll();

        assert!(!listener.is_listening());
        assert!(!listener.is_busy());
        assert!(listener.transcript().is_none());
    }

    #[test]
    fn test_scripted_recognizer_delivers_on_stop() {
        let recognizer =
            ScriptedRecognizer::new(vec!["dictated text".to_string()], Duration::from_secs(30));
        let mut listener = Listener::new(Box::new(recognizer), Language::English);

        listener.start_listening();
        poll_until(&mut listener, |l| l.is_listening());
        assert!(listener.is_listening());

        listener.stop_listening();
        poll_until(&mut listener, |l| !l.is_busy());

        assert!(!listener.is_listening());
        assert_eq!(listener.take_transcript().as_deref(), Some("dictated text"));
    }

    #[test]
    fn test_scripted_recognizer_finishes_after_window() {
        let recognizer =
            ScriptedRecognizer::new(vec!["auto".to_string()], Duration::from_millis(20));
        let mut listener = Listener::new(Box::new(recognizer), Language::English);

        listener.start_listening();
        poll_until(&mut listener, |l| l.transcript().is_some());

        assert_eq!(listener.transcript(), Some("auto"));
        assert!(!listener.is_listening());
    }

    #[test]
    fn test_scripted_recognizer_without_phrases_reports_no_speech() {
        let recognizer = ScriptedRecognizer::new(Vec::new(), Duration::from_millis(10));
        let mut listener = Listener::new(Box::new(recognizer), Language::English);

        listener.start_listening();
        poll_until(&mut listener, |l| !l.is_busy());

        assert!(listener.transcript().is_none());
    }
}
