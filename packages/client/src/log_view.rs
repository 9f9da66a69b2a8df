//! Bounded scrolling log.

use std::collections::VecDeque;

use crate::model::LogEntry;

/// Number of lines kept when no capacity is configured
pub const DEFAULT_LOG_CAPACITY: usize = 80;

/// Fixed-capacity log view. Pushing beyond capacity evicts the oldest line.
#[derive(Debug, Clone)]
pub struct LogView {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogView {
    /// Create an empty view holding at most `capacity` lines (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, returning the evicted oldest line if the view was full
    pub fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Lines from newest to oldest, the order they are displayed in
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}
