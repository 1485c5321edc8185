//! Attachment Filer - files attachments of flagged mail into a folder tree.
//!
//! Messages flagged under a root label (or any of its `/`-separated
//! sub-labels) have their attachments saved at a path rendered from a
//! template, after which the flag is cleared so the next run skips them.
//!
//! # Features
//!
//! - Longest-key-first `$placeholder` templates
//! - Idempotent folder creation, existing files are never overwritten
//! - Paginated discovery of flagged threads
//! - Maildir mailbox and local directory storage backends
//! - Dry runs
//!
//! # Example
//!
//! ```no_run
//! use attachment_filer::{Filer, FilerSettings, LocalStorage, MaildirMailbox};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let filer = Filer::new(
//!         FilerSettings::default(),
//!         MaildirMailbox::new("/home/me/Mail"),
//!         LocalStorage::new("/home/me/Drive"),
//!     );
//!
//!     let state = filer.run().await?;
//!     println!("{} attachments saved", state.attachments_saved);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filer;
pub mod fs;
pub mod mailbox;
pub mod output;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use config::{Config, TimeZoneMode};
pub use error::{Error, Result};
pub use filer::{Filer, FilerSettings, RunState};
pub use fs::{LocalStorage, Placement, Storage};
pub use mailbox::{Label, Mailbox, MaildirMailbox, Message, Thread};
