//! Application state management
//!
//! `AppState` owns every store and adapter. Components read from it and call
//! its methods; nothing else mutates the stores.

use crate::chat::mock::{seed_chats, seed_directories};
use crate::chat::{ChatStore, Message, Role, SimulatedResponder};
use crate::directories::DirectoryRegistry;
use crate::i18n::{Catalog, Language, LocaleChange, LocaleState};
use crate::integration::{AppConfig, SpeechAdapters};
use crate::speech::{Listener, Speaker, Voice};
use crate::{ParleyError, Result};
use chrono::Utc;
use crossbeam_channel::Receiver;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Add-directory form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryForm {
    pub open: bool,
    pub path: String,
    pub name: String,
    /// Last validation failure, rendered through the catalog
    pub error: Option<ParleyError>,
}

impl DirectoryForm {
    pub fn reset(&mut self) {
        self.path.clear();
        self.name.clear();
        self.error = None;
    }

    /// Catalog key describing the current error
    pub fn error_key(&self) -> Option<&'static str> {
        match self.error.as_ref()? {
            ParleyError::EmptyPath => Some("settings.pathRequired"),
            ParleyError::DuplicateDirectory(_) => Some("settings.directoryExists"),
            _ => None,
        }
    }
}

/// Central application state
pub struct AppState {
    pub chats: ChatStore,
    pub directories: DirectoryRegistry,
    pub locale: LocaleState,
    pub catalog: Catalog,
    pub listener: Listener,
    pub speaker: Speaker,
    pub responder: Option<SimulatedResponder>,

    /// Current text input
    pub input_text: String,

    pub directory_form: DirectoryForm,

    /// Confirmation from the last merge
    pub merge_notice: Option<String>,

    /// Whether the previous-chat picker is expanded
    pub chat_selector_open: bool,

    /// Whether the settings panel is shown
    pub show_settings: bool,

    /// Message being read aloud
    speaking_message: Option<Uuid>,

    /// An extra font with non-Latin glyphs was installed
    extra_font: bool,
    missing_glyphs_warned: bool,

    locale_rx: Receiver<LocaleChange>,
}

impl AppState {
    /// Empty stores, no simulated replies
    pub fn new(language: Language, adapters: SpeechAdapters) -> Result<Self> {
        let mut locale = LocaleState::new(language);
        let locale_rx = locale.subscribe();

        Ok(Self {
            chats: ChatStore::new(),
            directories: DirectoryRegistry::new(),
            locale,
            catalog: Catalog::bundled(language)?,
            listener: adapters.listener,
            speaker: adapters.speaker,
            responder: None,
            input_text: String::new(),
            directory_form: DirectoryForm::default(),
            merge_notice: None,
            chat_selector_open: false,
            show_settings: true,
            speaking_message: None,
            extra_font: false,
            missing_glyphs_warned: false,
            locale_rx,
        })
    }

    /// Build the state described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let language = config.language()?;
        let mut state = Self::new(language, SpeechAdapters::from_config(config, language))?;

        if config.seed_mock_data {
            state = state.with_mock_data();
        }
        if config.responder.enabled {
            state = state.with_responder(SimulatedResponder::new(
                config.responder.reply.clone(),
                config.responder.delay(),
            ));
        }

        info!(
            %language,
            chats = state.chats.len(),
            directories = state.directories.len(),
            "Application state ready"
        );
        Ok(state)
    }

    /// Seed the demo chats and directories
    pub fn with_mock_data(mut self) -> Self {
        let now = Utc::now();
        self.chats = ChatStore::with_chats(seed_chats(now));
        self.directories = DirectoryRegistry::with_directories(seed_directories(now));
        self
    }

    pub fn with_responder(mut self, responder: SimulatedResponder) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Record whether `Theme::install_fonts` added an extra font
    pub fn with_extra_font(mut self, installed: bool) -> Self {
        self.extra_font = installed;
        self.warn_missing_glyphs();
        self
    }

    pub fn language(&self) -> Language {
        self.locale.language()
    }

    pub fn is_rtl(&self) -> bool {
        self.locale.is_rtl()
    }

    /// Translate a catalog key in the active language
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.t(key)
    }

    /// Messages of the current chat
    pub fn current_messages(&self) -> &[Message] {
        self.chats
            .current_chat()
            .map(|chat| chat.messages.as_slice())
            .unwrap_or_default()
    }

    /// Send the input text as a user message and schedule the simulated reply
    pub fn send_message(&mut self, now: Instant) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }

        if self.chats.add_message(text, Role::User).is_none() {
            debug!("Message not sent: no current chat");
            return;
        }
        self.input_text.clear();

        if let Some(responder) = &mut self.responder {
            responder.schedule(now);
        }
    }

    /// Start or stop dictation
    pub fn toggle_listening(&mut self) {
        self.listener.toggle();
    }

    /// Drain adapter, responder and locale events. Call once per frame.
    pub fn poll_events(&mut self, now: Instant) {
        self.apply_locale_changes();

        self.listener.poll();
        if let Some(transcript) = self.listener.take_transcript() {
            self.append_transcript(&transcript);
        }

        self.speaker.poll();
        if !self.speaker.is_speaking() {
            self.speaking_message = None;
        }

        let replies = match &mut self.responder {
            Some(responder) => responder.poll(now),
            None => Vec::new(),
        };
        for reply in replies {
            self.chats.add_message(reply, Role::Assistant);
        }
    }

    /// Whether anything is pending that needs another frame
    pub fn is_busy(&self) -> bool {
        self.listener.is_busy()
            || self.speaker.is_speaking()
            || self.responder.as_ref().is_some_and(|r| r.has_pending())
    }

    fn append_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.input_text.trim_end().is_empty() {
            let trimmed_len = self.input_text.trim_end().len();
            self.input_text.truncate(trimmed_len);
            self.input_text.push(' ');
        } else {
            self.input_text.clear();
        }
        self.input_text.push_str(transcript);
    }

    pub fn create_chat(&mut self) {
        self.chats.create_chat();
        self.merge_notice = None;
        self.chat_selector_open = false;
    }

    pub fn switch_chat(&mut self, chat_id: Uuid) {
        if self.chats.current_chat_id() == Some(chat_id) {
            return;
        }
        if self.chats.switch_chat(chat_id) {
            self.stop_speech();
            self.merge_notice = None;
            self.chat_selector_open = false;
        }
    }

    /// Append a previous chat's history to the current chat
    pub fn merge_previous_chat(&mut self, chat_id: Uuid) {
        if let Some(notice) = self.chats.add_previous_chat_to_current(chat_id) {
            info!(%chat_id, "Added previous chat to current");
            self.merge_notice = Some(notice);
        }
        self.chat_selector_open = false;
    }

    pub fn set_language(&mut self, language: Language) {
        if self.locale.set_language(language) {
            self.apply_locale_changes();
        }
    }

    fn apply_locale_changes(&mut self) {
        let mut changed = false;
        while let Ok(change) = self.locale_rx.try_recv() {
            self.catalog.set_language(change.language);
            self.listener.set_language(change.language);
            self.speaker.set_language(change.language);
            changed = true;
        }
        if changed {
            self.warn_missing_glyphs();
        }
    }

    /// Warn once when the active language needs glyphs the bundled fonts lack.
    /// Returns whether the warning was emitted by this call.
    fn warn_missing_glyphs(&mut self) -> bool {
        let language = self.language();
        if self.extra_font || self.missing_glyphs_warned || language.has_bundled_glyphs() {
            return false;
        }
        warn!(
            %language,
            "No extra font installed; set ui.font_path to a font with {} glyphs",
            language.native_name()
        );
        self.missing_glyphs_warned = true;
        true
    }

    /// Validate and submit the add-directory form. Returns whether a directory was added.
    pub fn submit_directory_form(&mut self) -> bool {
        let path = self.directory_form.path.trim().to_string();
        let name = self.directory_form.name.trim().to_string();
        let name = (!name.is_empty()).then_some(name.as_str());

        match self.directories.add_directory(&path, name) {
            Ok(directory) => {
                info!(path = %directory.path, name = %directory.name, "Directory added");
                self.directory_form.reset();
                self.directory_form.open = false;
                true
            }
            Err(e) => {
                debug!("Directory form rejected: {}", e);
                self.directory_form.error = Some(e);
                false
            }
        }
    }

    pub fn toggle_directory_form(&mut self) {
        self.directory_form.open = !self.directory_form.open;
        if !self.directory_form.open {
            self.directory_form.reset();
        }
    }

    pub fn remove_directory(&mut self, directory_id: Uuid) {
        self.directories.remove_directory(directory_id);
    }

    /// Read a message aloud, or stop if it is the one being read
    pub fn toggle_speech(&mut self, message_id: Uuid) {
        if self.is_speaking_message(message_id) {
            self.stop_speech();
            return;
        }

        let Some(content) = self
            .current_messages()
            .iter()
            .find(|m| m.id == message_id)
            .map(|m| m.content.clone())
        else {
            debug!(%message_id, "toggle_speech ignored: unknown message");
            return;
        };

        self.speaker.speak(&content);
        self.speaking_message = self.speaker.is_speaking().then_some(message_id);
    }

    pub fn is_speaking_message(&self, message_id: Uuid) -> bool {
        self.speaking_message == Some(message_id) && self.speaker.is_speaking()
    }

    pub fn stop_speech(&mut self) {
        self.speaker.stop();
        self.speaking_message = None;
    }

    /// Use `voice` for read-aloud until the language changes
    pub fn select_voice(&mut self, voice: Voice) {
        info!(voice = %voice.name, lang = %voice.lang, "Voice selected");
        self.speaker.change_voice(voice);
    }

    pub fn refresh_voices(&mut self) {
        self.speaker.refresh_voices();
        debug!(voices = self.speaker.voices().len(), "Voices refreshed");
    }
}
