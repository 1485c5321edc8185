//! Filing run: walks flagged threads and files their attachments.

use crate::config::{Config, TimeZoneMode};
use crate::error::{Error, Result};
use crate::filer::placeholders::build_placeholders;
use crate::filer::state::RunState;
use crate::fs::naming::render_template;
use crate::fs::paths::place;
use crate::fs::storage::Storage;
use crate::mailbox::{
    sub_label_suffix, sub_labels, unprocessed_threads, Label, Mailbox, Thread, DEFAULT_BATCH_SIZE,
};

/// Settings a [`Filer`] runs with.
#[derive(Debug, Clone)]
pub struct FilerSettings {
    /// Label whose hierarchy is scanned.
    pub root_label: String,
    /// Destination path template.
    pub path_template: String,
    /// Threads fetched per page.
    pub batch_size: usize,
    /// Zone dates are rendered in.
    pub timezone: TimeZoneMode,
    /// Render and log destinations only.
    pub dry_run: bool,
}

impl Default for FilerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for FilerSettings {
    fn from(config: &Config) -> Self {
        Self {
            root_label: config.mailbox.root_label.clone(),
            path_template: config.storage.path_template.clone(),
            batch_size: if config.mailbox.batch_size == 0 {
                DEFAULT_BATCH_SIZE
            } else {
                config.mailbox.batch_size
            },
            timezone: config.options.timezone,
            dry_run: config.options.dry_run,
        }
    }
}

/// Files attachments of flagged messages from a mailbox into a storage.
pub struct Filer<M, S> {
    settings: FilerSettings,
    mailbox: M,
    storage: S,
}

impl<M: Mailbox, S: Storage> Filer<M, S> {
    pub fn new(settings: FilerSettings, mailbox: M, storage: S) -> Self {
        Self {
            settings,
            mailbox,
            storage,
        }
    }

    pub fn mailbox(&self) -> &M {
        &self.mailbox
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// File every flagged message under the root label hierarchy.
    ///
    /// Collaborator failures abort the run; messages not yet processed keep
    /// their flag and are picked up by the next run. An attachment whose
    /// rendered destination is not a valid file name is skipped with a warning.
    pub async fn run(&self) -> Result<RunState> {
        let mut state = RunState::new();
        let labels = self.mailbox.labels().await?;

        for label in sub_labels(&self.settings.root_label, &labels) {
            state.increment_labels();

            let threads =
                unprocessed_threads(&self.mailbox, label, self.settings.batch_size).await?;
            state.add_threads(threads.len());

            for thread in &threads {
                self.process_thread(thread, label, &mut state).await?;
            }
        }

        Ok(state)
    }

    /// File the attachments of every flagged message in `thread`, clearing
    /// each message's flag once all its attachments are handled.
    async fn process_thread(&self, thread: &Thread, label: &Label, state: &mut RunState) -> Result<()> {
        let sub_label = sub_label_suffix(&self.settings.root_label, &label.name);

        for (message_index, message) in thread.messages.iter().enumerate() {
            if !message.is_pending() {
                continue;
            }

            tracing::info!("Processing message from {}", message.received_at);
            state.increment_messages();

            for (attachment_index, attachment) in message.attachments.iter().enumerate() {
                let values = build_placeholders(
                    sub_label,
                    message,
                    message_index,
                    attachment,
                    attachment_index,
                    self.settings.timezone,
                );
                let destination = render_template(&self.settings.path_template, &values);

                if self.settings.dry_run {
                    tracing::info!("Would save {}", destination);
                    state.increment_planned();
                    continue;
                }

                match place(&self.storage, &attachment.data, &destination).await {
                    Ok(placement) => state.record_placement(placement),
                    Err(Error::InvalidFilename(reason)) => {
                        tracing::warn!(
                            "Skipping attachment '{}' from {}: {}",
                            attachment.name,
                            message.sender,
                            reason
                        );
                        state.increment_rejected();
                    }
                    Err(e) => return Err(e),
                }
            }

            if self.settings.dry_run {
                continue;
            }

            self.mailbox.mark_done(message).await?;
            state.increment_marked_done();
        }

        Ok(())
    }
}
