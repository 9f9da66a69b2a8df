//! Inbound event dispatch.
//!
//! [`Dashboard`] owns the view model: the bounded log, the device table and
//! the displayed counters. Each decoded event is applied synchronously and
//! yields the [`Update`] the screen has to render.

use std::{collections::BTreeMap, sync::Arc};

use chrono::Local;
use sweetdash_shared::time::{Clock, SystemClock};

use crate::{
    dto::{DeviceStatusPayload, InboundMessage, MessageData},
    log_view::LogView,
    model::{self, DeviceRecord, DeviceState, LogEntry, Severity},
};

/// Banner shown once the event stream is gone
pub const NETWORK_ERROR_BANNER: &str = "Network error - please reload.";

/// Log line appended once the event stream is gone
pub const CONNECTION_CLOSED_MESSAGE: &str = "Network error - server connection closed.";

/// Metric whose value is shown as a counter while stats are enabled
pub const GOROUTINES_METRIC: &str = "goroutines";

/// Counters displayed while stats are enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub goroutines: Option<String>,
}

/// State change produced by one event, to be rendered by a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A line was appended to the log
    Logged(LogEntry),
    /// A device row was inserted or replaced
    DeviceUpserted(DeviceRecord),
    /// A displayed counter changed
    CounterUpdated { name: String, value: String },
    /// The connection closed; `entry` was appended to the log
    Disconnected { banner: &'static str, entry: LogEntry },
}

/// View model of the dashboard
pub struct Dashboard {
    log: LogView,
    devices: BTreeMap<String, DeviceRecord>,
    counters: Counters,
    show_stats: bool,
    disconnected: bool,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    /// Create an empty dashboard using the system clock
    pub fn new(log_capacity: usize, show_stats: bool) -> Self {
        Self::with_clock(log_capacity, show_stats, Arc::new(SystemClock))
    }

    /// Create an empty dashboard with an injected clock
    pub fn with_clock(log_capacity: usize, show_stats: bool, clock: Arc<dyn Clock>) -> Self {
        Self {
            log: LogView::with_capacity(log_capacity),
            devices: BTreeMap::new(),
            counters: Counters::default(),
            show_stats,
            disconnected: false,
            clock,
        }
    }

    /// Apply one inbound event.
    ///
    /// Returns `None` when the event changes nothing on screen.
    pub fn dispatch(&mut self, message: InboundMessage) -> Option<Update> {
        match message {
            InboundMessage::Log { message_data } => {
                Some(self.append_log(&message_data, Severity::Normal))
            }
            InboundMessage::Error { message_data } | InboundMessage::Fatal { message_data } => {
                Some(self.append_log(&message_data, Severity::Error))
            }
            InboundMessage::Device { device, status } => Some(self.upsert_device(device, status)),
            InboundMessage::Metric {
                device,
                message_data,
            } => self.update_metric(&device, &message_data),
            InboundMessage::Unknown => {
                tracing::debug!("Ignoring event with unknown messageType");
                None
            }
        }
    }

    /// Record the loss of the connection.
    ///
    /// There is no reconnect: the banner stays until the dashboard is restarted.
    pub fn connection_closed(&mut self) -> Update {
        self.disconnected = true;
        let entry = LogEntry::new(self.clock.now(), CONNECTION_CLOSED_MESSAGE, Severity::Error);
        self.log.push(entry.clone());
        Update::Disconnected {
            banner: NETWORK_ERROR_BANNER,
            entry,
        }
    }

    /// Flip the stats display, returning the new setting
    pub fn toggle_stats(&mut self) -> bool {
        self.show_stats = !self.show_stats;
        tracing::debug!("Stats display set to {}", self.show_stats);
        self.show_stats
    }

    fn append_log(&mut self, message_data: &MessageData, severity: Severity) -> Update {
        let entry = LogEntry::new(self.clock.now(), message_data.to_string(), severity);
        if let Some(evicted) = self.log.push(entry.clone()) {
            tracing::trace!("Evicted log line: {}", evicted.message);
        }
        Update::Logged(entry)
    }

    fn upsert_device(&mut self, id: String, status: DeviceStatusPayload) -> Update {
        let updated_at = status
            .produced_at()
            .map(|when| when.with_timezone(&Local))
            .unwrap_or_else(|| self.clock.now());
        let is_error = model::is_error(status.state, status.error_flag());
        let error_message = Some(status.error_message).filter(|message| !message.is_empty());

        let record = DeviceRecord {
            id,
            hostname: status.device.hostname,
            is_pending: model::is_pending(status.state),
            is_error,
            error_message,
            state: DeviceState::from_code(status.state),
            updated_at,
        };
        if record.state.is_none() {
            tracing::warn!(
                "Device '{}' reported unknown state code {}",
                record.id,
                status.state
            );
        }

        self.devices.insert(record.id.clone(), record.clone());
        Update::DeviceUpserted(record)
    }

    fn update_metric(&mut self, name: &str, message_data: &MessageData) -> Option<Update> {
        if !self.show_stats {
            return None;
        }
        if name != GOROUTINES_METRIC {
            tracing::debug!("Metric {} = {}", name, message_data);
            return None;
        }

        let value = message_data.to_string();
        self.counters.goroutines = Some(value.clone());
        Some(Update::CounterUpdated {
            name: name.to_string(),
            value,
        })
    }

    /// Device rows ordered by device id
    pub fn devices(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices.values()
    }

    pub fn device(&self, id: &str) -> Option<&DeviceRecord> {
        self.devices.get(id)
    }

    pub fn log(&self) -> &LogView {
        &self.log
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
