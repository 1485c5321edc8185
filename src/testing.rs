//! In-memory mailbox and storage used by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::fs::storage::Storage;
use crate::mailbox::types::{Attachment, Label, Mailbox, Marker, Message, Thread};

static NEXT_MESSAGE_ID: AtomicUsize = AtomicUsize::new(0);

/// Build a message received at 2024-03-05 10:07:09 UTC.
pub fn message(sender: &str, pending: bool, attachments: Vec<Attachment>) -> Message {
    message_at(
        sender,
        pending,
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 7, 9).unwrap(),
        attachments,
    )
}

pub fn message_at(
    sender: &str,
    pending: bool,
    received_at: DateTime<Utc>,
    attachments: Vec<Attachment>,
) -> Message {
    Message {
        id: format!("msg-{}", NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)),
        marker: if pending { Marker::Pending } else { Marker::Done },
        sender: sender.to_string(),
        received_at,
        attachments,
    }
}

#[derive(Default)]
struct MailboxState {
    labels: Vec<String>,
    threads: HashMap<String, Vec<Thread>>,
    page_requests: Vec<(usize, usize)>,
    marked_done: Vec<String>,
}

/// Mailbox keeping labels and threads in memory and recording every call.
#[derive(Default)]
pub struct MemoryMailbox {
    state: Mutex<MailboxState>,
}

impl MemoryMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_label(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        if !state.labels.iter().any(|l| l == name) {
            state.labels.push(name.to_string());
        }
    }

    pub fn add_thread(&self, label: &str, thread: Thread) {
        self.add_label(label);
        let mut state = self.state.lock().unwrap();
        state
            .threads
            .entry(label.to_string())
            .or_default()
            .push(thread);
    }

    /// `(offset, count)` of every `threads` call.
    pub fn page_requests(&self) -> Vec<(usize, usize)> {
        self.state.lock().unwrap().page_requests.clone()
    }

    /// Message ids passed to `mark_done`, in call order.
    pub fn marked_done(&self) -> Vec<String> {
        self.state.lock().unwrap().marked_done.clone()
    }
}

#[async_trait]
impl Mailbox for MemoryMailbox {
    async fn labels(&self) -> Result<Vec<Label>> {
        let state = self.state.lock().unwrap();
        Ok(state.labels.iter().map(Label::new).collect())
    }

    async fn threads(&self, label: &Label, offset: usize, count: usize) -> Result<Vec<Thread>> {
        let mut state = self.state.lock().unwrap();
        state.page_requests.push((offset, count));

        let threads = state
            .threads
            .get(&label.name)
            .map(|threads| threads.iter().skip(offset).take(count).cloned().collect())
            .unwrap_or_default();
        Ok(threads)
    }

    async fn mark_done(&self, message: &Message) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.marked_done.push(message.id.clone());

        for thread in state.threads.values_mut().flatten() {
            for stored in thread.messages.iter_mut() {
                if stored.id == message.id {
                    stored.marker = Marker::Done;
                }
            }
        }
        Ok(())
    }
}

struct FolderNode {
    name: String,
    children: Vec<usize>,
    files: Vec<(String, Vec<u8>)>,
}

/// Folder tree kept in memory. Folder handles are node indexes; 0 is the root.
pub struct MemoryStorage {
    nodes: Mutex<Vec<FolderNode>>,
    fail_on: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(vec![FolderNode {
                name: String::new(),
                children: Vec::new(),
                files: Vec::new(),
            }]),
            fail_on: None,
        }
    }

    /// A store whose `create_file` fails for files named `name`.
    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::new()
        }
    }

    /// Number of folders, excluding the root.
    pub fn folder_count(&self) -> usize {
        self.nodes.lock().unwrap().len() - 1
    }

    pub fn file_count(&self) -> usize {
        self.nodes
            .lock()
            .unwrap()
            .iter()
            .map(|node| node.files.len())
            .sum()
    }

    /// Create the folder chain of a slash-delimited path.
    pub fn make_folders(&self, path: &str) {
        let mut nodes = self.nodes.lock().unwrap();
        let mut current = 0;
        for name in path.split('/').filter(|n| !n.is_empty()) {
            current = match Self::child(&nodes, current, name) {
                Some(idx) => idx,
                None => Self::push_child(&mut nodes, current, name),
            };
        }
    }

    /// Contents of the file at a slash-delimited path.
    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        let nodes = self.nodes.lock().unwrap();
        let (folder_path, file_name) = crate::fs::paths::split_destination(path);

        let mut current = 0;
        for name in folder_path.split('/').filter(|n| !n.is_empty()) {
            current = Self::child(&nodes, current, name)?;
        }

        nodes[current]
            .files
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, data)| data.clone())
    }

    fn child(nodes: &[FolderNode], parent: usize, name: &str) -> Option<usize> {
        nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&idx| nodes[idx].name == name)
    }

    fn push_child(nodes: &mut Vec<FolderNode>, parent: usize, name: &str) -> usize {
        nodes.push(FolderNode {
            name: name.to_string(),
            children: Vec::new(),
            files: Vec::new(),
        });
        let idx = nodes.len() - 1;
        nodes[parent].children.push(idx);
        idx
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    type Folder = usize;

    fn root(&self) -> usize {
        0
    }

    async fn find_folder(&self, parent: &usize, name: &str) -> Result<Option<usize>> {
        let nodes = self.nodes.lock().unwrap();
        Ok(Self::child(&nodes, *parent, name))
    }

    async fn create_folder(&self, parent: &usize, name: &str) -> Result<usize> {
        let mut nodes = self.nodes.lock().unwrap();
        Ok(Self::push_child(&mut nodes, *parent, name))
    }

    async fn has_file(&self, folder: &usize, name: &str) -> Result<bool> {
        let nodes = self.nodes.lock().unwrap();
        Ok(nodes[*folder].files.iter().any(|(n, _)| n == name))
    }

    async fn create_file(&self, folder: &usize, name: &str, data: &[u8]) -> Result<()> {
        if self.fail_on.as_deref() == Some(name) {
            return Err(Error::Storage(format!("Refused to create {}", name)));
        }

        let mut nodes = self.nodes.lock().unwrap();
        nodes[*folder].files.push((name.to_string(), data.to_vec()));
        Ok(())
    }
}
