//! Log severity levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Ordinal log severity
///
/// Levels are totally ordered: `Debug < Info < Warn < Error < Fatal`.
/// On the wire a level travels as its upper-case name (`"ERROR"`), and the
/// ordinal travels next to it as `levelValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    /// All levels, lowest first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Upper-case label for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Numeric severity (0 = DEBUG .. 4 = FATAL)
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Look up a level by its ordinal
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Whether this level counts as an error for statistics
    pub fn is_error(&self) -> bool {
        *self >= LogLevel::Error
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Self::from_value(value).ok_or_else(|| ParseLevelError(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Config files and older persisted buffers may carry either the name or the ordinal
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Value(u8),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
            Repr::Value(value) => Self::from_value(value)
                .ok_or_else(|| serde::de::Error::custom(format!("Unknown log level: {}", value))),
        }
    }
}
