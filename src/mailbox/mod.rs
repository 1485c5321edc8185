//! Mailbox module.
//!
//! Provides:
//! - The mailbox capability and its label/thread/message records
//! - Label hierarchy selection
//! - Paginated discovery of flagged threads
//! - A Maildir backend

pub mod labels;
pub mod maildir;
pub mod scanner;
pub mod types;

pub use labels::{sub_label_suffix, sub_labels};
pub use maildir::MaildirMailbox;
pub use scanner::{unprocessed_threads, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
pub use types::{Attachment, Label, Mailbox, Marker, Message, Thread};
