//! Bounded entry buffer

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::types::LogEntry;

/// FIFO ring of accepted entries
///
/// Also tracks the last timestamp handed out so that entries never go
/// backwards in time when the wall clock does.
#[derive(Debug, Default)]
pub(crate) struct LogBuffer {
    entries: VecDeque<Arc<LogEntry>>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl LogBuffer {
    /// Seed the buffer with previously persisted entries, keeping the newest `capacity`
    pub(crate) fn restore(entries: Vec<LogEntry>, capacity: usize) -> Self {
        let mut buffer = Self::default();
        for entry in entries {
            buffer.last_timestamp = Some(match buffer.last_timestamp {
                Some(last) if last > entry.timestamp() => last,
                _ => entry.timestamp(),
            });
            buffer.entries.push_back(Arc::new(entry));
        }
        buffer.truncate(capacity);
        buffer
    }

    /// Next creation time: `now`, unless an earlier entry is already later
    pub(crate) fn next_timestamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        timestamp
    }

    /// Append and evict the oldest entries beyond `capacity`
    pub(crate) fn push(&mut self, entry: Arc<LogEntry>, capacity: usize) {
        self.entries.push_back(entry);
        self.truncate(capacity);
    }

    pub(crate) fn truncate(&mut self, capacity: usize) {
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
    }

    /// Remove exactly the given entries (by identity), keeping everything else
    pub(crate) fn remove_all(&mut self, sent: &[Arc<LogEntry>]) -> usize {
        let sent: HashSet<*const LogEntry> = sent.iter().map(Arc::as_ptr).collect();
        let before = self.entries.len();
        self.entries.retain(|entry| !sent.contains(&Arc::as_ptr(entry)));
        before - self.entries.len()
    }

    /// Drop every entry; later timestamps follow the clock again
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.last_timestamp = None;
    }

    pub(crate) fn entries(&self) -> &VecDeque<Arc<LogEntry>> {
        &self.entries
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<LogEntry>> {
        self.entries.iter().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
