//! Chat session store
//!
//! Owns every chat and the identifier of the current one. All mutation goes
//! through the operations below; a modified chat is rebuilt as a new value
//! and written back over the entry with the same id.

use super::types::{Chat, Message, Role, NEW_CHAT_TITLE};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    chats: Vec<Chat>,
    current: Option<Uuid>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing chats; the first one becomes current
    pub fn with_chats(chats: Vec<Chat>) -> Self {
        let current = chats.first().map(|c| c.id);
        Self { chats, current }
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn get(&self, id: Uuid) -> Option<&Chat> {
        self.chats.iter().find(|c| c.id == id)
    }

    pub fn current_chat_id(&self) -> Option<Uuid> {
        self.current
    }

    pub fn current_chat(&self) -> Option<&Chat> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Chats that can be merged into the current one
    pub fn selectable_chats(&self) -> impl Iterator<Item = &Chat> {
        let current = self.current;
        self.chats.iter().filter(move |c| Some(c.id) != current)
    }

    /// Create an empty chat at the head of the list and make it current
    pub fn create_chat(&mut self) -> &Chat {
        let chat = Chat::new(NEW_CHAT_TITLE);
        debug!(chat_id = %chat.id, "Created chat");
        self.current = Some(chat.id);
        self.chats.insert(0, chat);
        &self.chats[0]
    }

    /// Append a message to the current chat.
    ///
    /// Returns the new message id, or `None` when there is no current chat.
    pub fn add_message(&mut self, content: impl Into<String>, role: Role) -> Option<Uuid> {
        let Some(current) = self.current_chat() else {
            debug!("add_message ignored: no current chat");
            return None;
        };

        let message = Message::new(content, role);
        let message_id = message.id;

        let mut updated = current.clone();
        updated.messages.push(message);
        updated.updated_at = Utc::now();
        self.replace(updated);

        Some(message_id)
    }

    /// Make `chat_id` the current chat. Unknown ids are ignored.
    pub fn switch_chat(&mut self, chat_id: Uuid) -> bool {
        if self.get(chat_id).is_none() {
            debug!(%chat_id, "switch_chat ignored: unknown chat");
            return false;
        }
        self.current = Some(chat_id);
        true
    }

    /// Append another chat's history onto the current chat.
    ///
    /// The merged sequence is the current messages, one system marker naming
    /// the previous chat, then the previous messages in their original order.
    /// Returns a confirmation for display, or `None` when either chat is missing.
    pub fn add_previous_chat_to_current(&mut self, previous_chat_id: Uuid) -> Option<String> {
        let Some(current) = self.current_chat() else {
            debug!("merge ignored: no current chat");
            return None;
        };
        let Some(previous) = self.get(previous_chat_id) else {
            debug!(%previous_chat_id, "merge ignored: unknown chat");
            return None;
        };

        let mut messages = Vec::with_capacity(current.messages.len() + previous.messages.len() + 1);
        messages.extend(current.messages.iter().cloned());
        messages.push(Message::merge_marker(&previous.title));
        messages.extend(previous.messages.iter().cloned());

        let merged = Chat {
            id: current.id,
            title: format!("{} + {}", current.title, previous.title),
            messages,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };
        let confirmation = format!(
            "Successfully added \"{}\" to the current chat.",
            previous.title
        );

        debug!(chat_id = %merged.id, %previous_chat_id, "Merged chat");
        self.replace(merged);

        Some(confirmation)
    }

    fn replace(&mut self, chat: Chat) {
        if let Some(slot) = self.chats.iter_mut().find(|c| c.id == chat.id) {
            *slot = chat;
        }
    }
}
