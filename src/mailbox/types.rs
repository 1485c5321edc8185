//! Mailbox capability and the records it hands out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

/// A mail label. Hierarchy is expressed with `/` in the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Processing cursor carried by every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    /// Flagged by the user; attachments still need filing.
    Pending,
    /// Filed, or never flagged.
    #[default]
    Done,
}

/// A file attached to a message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A single message in a thread.
#[derive(Debug, Clone)]
pub struct Message {
    /// Backend-specific identifier, used to clear the marker.
    pub id: String,
    pub marker: Marker,
    /// Sender address.
    pub sender: String,
    pub received_at: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn is_pending(&self) -> bool {
        self.marker == Marker::Pending
    }
}

/// An ordered conversation.
#[derive(Debug, Clone)]
pub struct Thread {
    pub id: String,
    pub messages: Vec<Message>,
}

impl Thread {
    /// Whether any message in the thread still needs filing.
    pub fn has_pending_messages(&self) -> bool {
        self.messages.iter().any(Message::is_pending)
    }
}

/// A labelled mail store with a per-message marker.
#[async_trait]
pub trait Mailbox: Send + Sync {
    /// All user labels.
    async fn labels(&self) -> Result<Vec<Label>>;

    /// Up to `count` threads of `label`, skipping the first `offset`.
    async fn threads(&self, label: &Label, offset: usize, count: usize) -> Result<Vec<Thread>>;

    /// Clear the marker of `message`.
    async fn mark_done(&self, message: &Message) -> Result<()>;
}
