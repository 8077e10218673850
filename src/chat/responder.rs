//! Simulated assistant replies
//!
//! Stands in for a backend: every user message schedules one canned reply
//! that becomes due after a fixed delay. Callers poll with the current instant.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_REPLY: &str = "This is a simulated response from the assistant.";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingReply {
    due: Instant,
    text: String,
}

#[derive(Debug, Clone)]
pub struct SimulatedResponder {
    reply: String,
    delay: Duration,
    pending: VecDeque<PendingReply>,
}

impl Default for SimulatedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY, DEFAULT_REPLY_DELAY)
    }
}

impl SimulatedResponder {
    pub fn new(reply: impl Into<String>, delay: Duration) -> Self {
        Self {
            reply: reply.into(),
            delay,
            pending: VecDeque::new(),
        }
    }

    /// Schedule a reply to a message sent at `now`
    pub fn schedule(&mut self, now: Instant) {
        self.pending.push_back(PendingReply {
            due: now + self.delay,
            text: self.reply.clone(),
        });
        debug!(pending = self.pending.len(), "Scheduled simulated reply");
    }

    /// Remove and return every reply that is due at `now`, oldest first
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|r| r.due <= now) {
            if let Some(reply) = self.pending.pop_front() {
                due.push(reply.text);
            }
        }
        due
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
