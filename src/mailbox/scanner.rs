//! Flagged thread discovery.

use crate::error::Result;
use crate::mailbox::types::{Label, Mailbox, Thread};

/// Threads fetched per page.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Largest page the mailbox service accepts.
pub const MAX_BATCH_SIZE: usize = 500;

/// Collect every thread of `label` holding at least one pending message.
///
/// Pages through the label from offset 0 until a page comes back short.
pub async fn unprocessed_threads<M: Mailbox + ?Sized>(
    mailbox: &M,
    label: &Label,
    batch_size: usize,
) -> Result<Vec<Thread>> {
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut offset = 0;
    let mut result = Vec::new();

    loop {
        let threads = mailbox.threads(label, offset, batch_size).await?;
        offset += batch_size;

        let fetched = threads.len();
        result.extend(threads.into_iter().filter(Thread::has_pending_messages));

        if fetched < batch_size {
            break;
        }
    }

    tracing::info!("{} threads to process in {}", result.len(), label.name);

    Ok(result)
}
