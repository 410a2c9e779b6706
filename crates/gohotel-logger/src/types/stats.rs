//! Buffer statistics

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use serde::Serialize;

use super::entry::LogEntry;

/// Maximum number of error entries kept in [`Statistics::recent_errors`]
pub const RECENT_ERROR_LIMIT: usize = 10;

/// Summary of the current buffer
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of buffered entries
    pub total: usize,
    /// Entry count per level name
    pub by_level: BTreeMap<String, usize>,
    /// Entry count per page
    pub by_page: BTreeMap<String, usize>,
    /// The most recently appended ERROR/FATAL entries, oldest first
    pub recent_errors: Vec<Arc<LogEntry>>,
}

impl Statistics {
    /// Summarize entries in a single pass
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<LogEntry>>,
    {
        let mut stats = Statistics::default();
        let mut recent = VecDeque::with_capacity(RECENT_ERROR_LIMIT);

        for entry in entries {
            stats.total += 1;
            *stats.by_level.entry(entry.level_name().to_string()).or_insert(0) += 1;
            *stats.by_page.entry(entry.page().to_string()).or_insert(0) += 1;

            if entry.level().is_error() {
                if recent.len() == RECENT_ERROR_LIMIT {
                    recent.pop_front();
                }
                recent.push_back(Arc::clone(entry));
            }
        }

        stats.recent_errors = recent.into();
        stats
    }

    /// Count for a level name, zero when absent
    pub fn level_count(&self, level_name: &str) -> usize {
        self.by_level.get(level_name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryContext, LogLevel};

    fn entry(level: LogLevel, message: &str, page: &str) -> Arc<LogEntry> {
        Arc::new(LogEntry::new(level, message).with_context(EntryContext {
            page: page.to_string(),
            ..Default::default()
        }))
    }

    #[test]
    fn test_statistics_counts() {
        let entries = vec![
            entry(LogLevel::Info, "a", "pages/index"),
            entry(LogLevel::Error, "b", "pages/index"),
            entry(LogLevel::Error, "c", "pages/order"),
            entry(LogLevel::Warn, "d", "pages/index"),
        ];

        let stats = Statistics::from_entries(&entries);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_level.len(), 3);
        assert_eq!(stats.level_count("INFO"), 1);
        assert_eq!(stats.level_count("ERROR"), 2);
        assert_eq!(stats.level_count("WARN"), 1);
        assert_eq!(stats.level_count("FATAL"), 0);
        assert_eq!(stats.by_page["pages/index"], 3);
        assert_eq!(stats.by_page["pages/order"], 1);

        let recent: Vec<_> = stats.recent_errors.iter().map(|e| e.message()).collect();
        assert_eq!(recent, vec!["b", "c"]);
    }

    #[test]
    fn test_recent_errors_keep_newest_ten() {
        let entries: Vec<_> = (0..15)
            .map(|i| {
                let level = if i % 2 == 0 { LogLevel::Fatal } else { LogLevel::Error };
                entry(level, &i.to_string(), "pages/index")
            })
            .collect();

        let stats = Statistics::from_entries(&entries);
        assert_eq!(stats.recent_errors.len(), RECENT_ERROR_LIMIT);
        let recent: Vec<_> = stats.recent_errors.iter().map(|e| e.message().to_string()).collect();
        let expected: Vec<_> = (5..15).map(|i| i.to_string()).collect();
        assert_eq!(recent, expected);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::from_entries(&Vec::<Arc<LogEntry>>::new());
        assert_eq!(stats.total, 0);
        assert!(stats.by_level.is_empty());
        assert!(stats.recent_errors.is_empty());
    }
}
