//! Maildir mailbox backend.
//!
//! Every Maildir nested below the configured root is a label named after its
//! relative path (`Finances/Utilities`). Maildir++ folders at the root, as
//! written by Dovecot and Courier, map the same way: `.Finances.Utilities`
//! is the label `Finances/Utilities`. The `F` (flagged) info flag is the
//! processing marker. Threads are rebuilt from `References` / `In-Reply-To`.
//!
//! A label is read once per scan: the page at offset 0 loads it from disk and
//! later pages are served from memory until a flag is cleared.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mail_parser::{HeaderValue, MessageParser, MimeHeaders};
use tokio::fs;

use crate::error::{Error, Result};
use crate::mailbox::labels::LABEL_SEPARATOR;
use crate::mailbox::types::{Attachment, Label, Mailbox, Marker, Message, Thread};

/// Subdirectories making up a single Maildir.
const MAILDIR_SUBDIRS: [&str; 3] = ["cur", "new", "tmp"];

/// Separator between a Maildir file's unique name and its flags.
const INFO_SEPARATOR: &str = ":2,";

/// The flag used as the processing marker.
const FLAGGED: char = 'F';

/// Name given to attachments without a file name.
const UNNAMED_ATTACHMENT: &str = "unnamed";

/// Prefix and hierarchy separator of Maildir++ folder names.
const MAILDIR_PLUS_SEPARATOR: char = '.';

/// A tree of Maildir folders on disk.
#[derive(Debug)]
pub struct MaildirMailbox {
    root: PathBuf,
    /// Sorted threads per label name, filled by the first page of a scan.
    loaded: Mutex<HashMap<String, Vec<Thread>>>,
}

/// A parsed message plus the key of the thread it belongs to.
struct LoadedMessage {
    thread_key: String,
    message: Message,
}

impl MaildirMailbox {
    /// Open the Maildir tree at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    fn loaded(&self) -> MutexGuard<'_, HashMap<String, Vec<Thread>>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Directory holding the Maildir of `label`.
    ///
    /// A nested folder wins over a Maildir++ folder of the same name.
    async fn label_dir(&self, label: &Label) -> PathBuf {
        let segments: Vec<&str> = label
            .name
            .split(LABEL_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .collect();

        let nested = segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment));
        if is_maildir(&nested).await {
            return nested;
        }

        let dotted = segments.join(MAILDIR_PLUS_SEPARATOR.to_string().as_str());
        let plus = self
            .root
            .join(format!("{}{}", MAILDIR_PLUS_SEPARATOR, dotted));
        if is_maildir(&plus).await {
            plus
        } else {
            nested
        }
    }

    /// Walk the tree and return every nested Maildir as a label, sorted by name.
    async fn discover_labels(&self) -> Result<Vec<Label>> {
        let mut labels = Vec::new();
        let mut pending = vec![(self.root.clone(), String::new())];

        while let Some((dir, name)) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                Error::Mailbox(format!("Failed to read {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_dir() {
                    continue;
                }

                let Some(child) = entry.file_name().to_str().map(str::to_string) else {
                    tracing::debug!("Skipping non UTF-8 folder in {}", dir.display());
                    continue;
                };
                if let Some(dotted) = child.strip_prefix(MAILDIR_PLUS_SEPARATOR) {
                    if name.is_empty() && is_maildir(&entry.path()).await {
                        if let Some(label) = maildir_plus_label(dotted) {
                            labels.push(Label::new(label));
                        }
                    }
                    continue;
                }
                if MAILDIR_SUBDIRS.contains(&child.as_str()) {
                    continue;
                }

                let child_name = if name.is_empty() {
                    child
                } else {
                    format!("{}{}{}", name, LABEL_SEPARATOR, child)
                };
                let child_dir = entry.path();

                if is_maildir(&child_dir).await {
                    labels.push(Label::new(child_name.clone()));
                }
                pending.push((child_dir, child_name));
            }
        }

        labels.sort_by(|a, b| a.name.cmp(&b.name));
        labels.dedup();
        Ok(labels)
    }

    /// Load and group every message of `label` into threads.
    ///
    /// Messages in a thread are oldest first; threads are ordered by their
    /// newest message, newest first.
    async fn load_threads(&self, label: &Label) -> Result<Vec<Thread>> {
        let dir = self.label_dir(label).await;
        tracing::debug!("Loading {} from {}", label.name, dir.display());
        let mut loaded = Vec::new();

        for subdir in ["cur", "new"] {
            let path = dir.join(subdir);
            if !fs::try_exists(&path).await? {
                continue;
            }

            let mut entries = fs::read_dir(&path).await.map_err(|e| {
                Error::Mailbox(format!("Failed to read {}: {}", path.display(), e))
            })?;

            while let Some(entry) = entries.next_entry().await? {
                if !entry.file_type().await?.is_file() {
                    continue;
                }
                if let Some(message) = load_message(&entry.path(), subdir == "cur").await? {
                    loaded.push(message);
                }
            }
        }

        let mut grouped: HashMap<String, Vec<Message>> = HashMap::new();
        for LoadedMessage {
            thread_key,
            message,
        } in loaded
        {
            grouped.entry(thread_key).or_default().push(message);
        }

        let mut threads: Vec<Thread> = grouped
            .into_iter()
            .map(|(id, mut messages)| {
                messages.sort_by(|a, b| {
                    a.received_at
                        .cmp(&b.received_at)
                        .then_with(|| a.id.cmp(&b.id))
                });
                Thread { id, messages }
            })
            .collect();

        threads.sort_by(|a, b| {
            newest(b)
                .cmp(&newest(a))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(threads)
    }
}

#[async_trait]
impl Mailbox for MaildirMailbox {
    async fn labels(&self) -> Result<Vec<Label>> {
        self.loaded().clear();
        self.discover_labels().await
    }

    async fn threads(&self, label: &Label, offset: usize, count: usize) -> Result<Vec<Thread>> {
        let cached = match offset {
            0 => None,
            _ => self
                .loaded()
                .get(&label.name)
                .map(|threads| page_of(threads, offset, count)),
        };
        if let Some(page) = cached {
            return Ok(page);
        }

        let threads = self.load_threads(label).await?;
        let page = page_of(&threads, offset, count);
        self.loaded().insert(label.name.clone(), threads);
        Ok(page)
    }

    async fn mark_done(&self, message: &Message) -> Result<()> {
        let path = PathBuf::from(&message.id);
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Mailbox(format!("Invalid message path: {}", message.id)))?;

        let Some(unflagged) = remove_flag(file_name, FLAGGED) else {
            return Ok(());
        };

        let target = path.with_file_name(unflagged);
        fs::rename(&path, &target).await.map_err(|e| {
            Error::Mailbox(format!(
                "Failed to unflag {}: {}",
                path.display(),
                e
            ))
        })?;

        self.loaded().clear();
        tracing::debug!("Unflagged {}", target.display());
        Ok(())
    }
}

/// Label of a Maildir++ folder name with its leading dot removed.
///
/// `Finances.Utilities` gives `Finances/Utilities`. Names with empty segments
/// are not folders this backend understands.
fn maildir_plus_label(dotted: &str) -> Option<String> {
    let segments: Vec<&str> = dotted.split(MAILDIR_PLUS_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments.join(LABEL_SEPARATOR.to_string().as_str()))
}

fn page_of(threads: &[Thread], offset: usize, count: usize) -> Vec<Thread> {
    threads.iter().skip(offset).take(count).cloned().collect()
}

fn newest(thread: &Thread) -> Option<DateTime<Utc>> {
    thread.messages.last().map(|m| m.received_at)
}

async fn is_maildir(dir: &Path) -> bool {
    for subdir in ["cur", "new"] {
        if fs::metadata(dir.join(subdir))
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
        {
            return true;
        }
    }
    false
}

/// The flags of a Maildir file name, if it carries an info section.
pub fn flags(file_name: &str) -> Option<&str> {
    file_name
        .find(INFO_SEPARATOR)
        .map(|pos| &file_name[pos + INFO_SEPARATOR.len()..])
}

/// File name with `flag` removed, or `None` if the flag was not set.
pub fn remove_flag(file_name: &str, flag: char) -> Option<String> {
    let pos = file_name.find(INFO_SEPARATOR)?;
    let (base, info) = file_name.split_at(pos + INFO_SEPARATOR.len());

    if !info.contains(flag) {
        return None;
    }

    let remaining: String = info.chars().filter(|&c| c != flag).collect();
    Some(format!("{}{}", base, remaining))
}

/// First message id of a `References` or `In-Reply-To` header.
fn first_id<'a>(value: &'a HeaderValue<'_>) -> Option<&'a str> {
    value.as_text().or_else(|| {
        value
            .as_text_list()
            .and_then(|ids| ids.first())
            .map(|id| &**id)
    })
}

async fn load_message(path: &Path, in_cur: bool) -> Result<Option<LoadedMessage>> {
    let raw = fs::read(path).await.map_err(|e| {
        Error::Mailbox(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let Some(parsed) = MessageParser::default().parse(&raw) else {
        tracing::warn!("Skipping unparseable message {}", path.display());
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let flagged = in_cur && flags(file_name).is_some_and(|f| f.contains(FLAGGED));

    let sender = parsed
        .from()
        .and_then(|addr| addr.first())
        .and_then(|a| a.address())
        .unwrap_or_default()
        .to_string();

    let received_at = match parsed
        .date()
        .and_then(|d| DateTime::<Utc>::from_timestamp(d.to_timestamp(), 0))
    {
        Some(date) => date,
        None => {
            let modified = fs::metadata(path).await?.modified()?;
            DateTime::<Utc>::from(modified)
        }
    };

    let attachments = parsed
        .attachments()
        .map(|part| {
            Attachment::new(
                part.attachment_name().unwrap_or(UNNAMED_ATTACHMENT),
                part.contents(),
            )
        })
        .collect();

    let thread_key = first_id(parsed.references())
        .or_else(|| first_id(parsed.in_reply_to()))
        .or_else(|| parsed.message_id())
        .unwrap_or(file_name)
        .to_string();

    Ok(Some(LoadedMessage {
        thread_key,
        message: Message {
            id: path.to_string_lossy().into_owned(),
            marker: if flagged { Marker::Pending } else { Marker::Done },
            sender,
            received_at,
            attachments,
        },
    }))
}
