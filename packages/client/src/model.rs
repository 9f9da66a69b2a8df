//! Domain model for the dashboard: device records and log entries.
//!
//! This module contains pure types and derivation rules without side
//! effects, making them easy to test.

use chrono::{DateTime, Local};

/// Collection state of a monitored device.
///
/// The discriminants are the state codes pushed by the backup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    Pending = 0,
    Error = 1,
    Timeout = 2,
    Success = 3,
}

impl DeviceState {
    const TABLE: [DeviceState; 4] = [
        DeviceState::Pending,
        DeviceState::Error,
        DeviceState::Timeout,
        DeviceState::Success,
    ];

    /// Look up the state for a state code.
    ///
    /// Returns `None` for codes outside `0..=3`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::TABLE.get(index).copied())
    }

    /// Human-readable label shown in the device table
    pub fn label(self) -> &'static str {
        match self {
            DeviceState::Pending => "Pending",
            DeviceState::Error => "Error",
            DeviceState::Timeout => "Timeout",
            DeviceState::Success => "Success",
        }
    }
}

/// Label for an optional state, `"Unknown"` when the code was out of range
pub fn state_label(state: Option<DeviceState>) -> &'static str {
    state.map_or("Unknown", DeviceState::label)
}

/// A device is pending iff its state code is 0
pub fn is_pending(state_code: i64) -> bool {
    state_code == DeviceState::Pending as i64
}

/// A device is in error iff its state code is 1 or the error flag is set
pub fn is_error(state_code: i64, error_flag: bool) -> bool {
    state_code == DeviceState::Error as i64 || error_flag
}

/// Row of the live device table, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: String,
    pub hostname: String,
    pub is_pending: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
    pub state: Option<DeviceState>,
    /// When the status was produced (or received, if the server did not say)
    pub updated_at: DateTime<Local>,
}

impl DeviceRecord {
    /// Label of the current state
    pub fn state_label(&self) -> &'static str {
        state_label(self.state)
    }
}

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Error,
}

/// One line of the scrolling log. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Local>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp,
            message: message.into(),
            severity,
        }
    }
}
