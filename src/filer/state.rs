//! Run statistics.

use crate::fs::paths::Placement;

/// Counters collected over one filing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunState {
    pub labels_scanned: u64,
    pub threads_found: u64,
    pub messages_processed: u64,
    pub messages_marked_done: u64,
    pub attachments_saved: u64,
    pub attachments_skipped: u64,
    /// Attachments whose rendered destination was not a valid file name.
    pub attachments_rejected: u64,
    /// Destinations rendered but not written because of a dry run.
    pub attachments_planned: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_labels(&mut self) {
        self.labels_scanned += 1;
    }

    pub fn add_threads(&mut self, count: usize) {
        self.threads_found += count as u64;
    }

    pub fn increment_messages(&mut self) {
        self.messages_processed += 1;
    }

    pub fn increment_marked_done(&mut self) {
        self.messages_marked_done += 1;
    }

    pub fn increment_planned(&mut self) {
        self.attachments_planned += 1;
    }

    pub fn increment_rejected(&mut self) {
        self.attachments_rejected += 1;
    }

    /// Record the outcome of one placement.
    pub fn record_placement(&mut self, placement: Placement) {
        match placement {
            Placement::Created => self.attachments_saved += 1,
            Placement::AlreadyExists => self.attachments_skipped += 1,
        }
    }

    /// Total attachments looked at.
    pub fn total_attachments(&self) -> u64 {
        self.attachments_saved
            + self.attachments_skipped
            + self.attachments_rejected
            + self.attachments_planned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_placement() {
        let mut state = RunState::new();
        state.record_placement(Placement::Created);
        state.record_placement(Placement::Created);
        state.record_placement(Placement::AlreadyExists);
        state.increment_planned();
        state.increment_rejected();

        assert_eq!(state.attachments_saved, 2);
        assert_eq!(state.attachments_skipped, 1);
        assert_eq!(state.attachments_rejected, 1);
        assert_eq!(state.total_attachments(), 5);
    }
}
