//! Buffer queries

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::LogEntry;
use super::level::LogLevel;

/// Conjunctive filter over buffered entries
///
/// Every supplied predicate must hold; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// Minimum severity (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    /// Earliest timestamp (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Latest timestamp (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Exact page path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Check a single entry against every supplied predicate
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(level) = self.level {
            if entry.level() < level {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if entry.timestamp() < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if entry.timestamp() > end {
                return false;
            }
        }
        if let Some(page) = &self.page {
            if entry.page() != page {
                return false;
            }
        }
        true
    }
}

/// Filtered view over a snapshot of the buffer
///
/// Nothing is filtered until the view is iterated, and every call to
/// [`LogView::iter`] starts over from the first entry. Later writes to the
/// logger do not show up in an existing view.
#[derive(Debug, Clone)]
pub struct LogView {
    entries: Vec<Arc<LogEntry>>,
    filter: LogFilter,
}

impl LogView {
    pub(crate) fn new(entries: Vec<Arc<LogEntry>>, filter: LogFilter) -> Self {
        Self { entries, filter }
    }

    /// The filter this view applies
    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    /// Iterate matching entries in buffer order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LogEntry>> + '_ {
        self.entries.iter().filter(move |entry| self.filter.matches(entry))
    }

    /// Number of matching entries
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Collect matching entries
    pub fn to_vec(&self) -> Vec<Arc<LogEntry>> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a LogView {
    type Item = &'a Arc<LogEntry>;
    type IntoIter = Box<dyn Iterator<Item = &'a Arc<LogEntry>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
