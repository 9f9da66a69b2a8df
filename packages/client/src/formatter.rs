//! Text formatting for the dashboard screen.

use chrono::{DateTime, Local};
use sweetdash_shared::time::{format_clock_time, time_ago};

use crate::{
    command::Command,
    dispatcher::Counters,
    log_view::LogView,
    model::{DeviceRecord, LogEntry, Severity},
};

const RULE: &str = "============================================================";

/// Formatter for dashboard output
pub struct DashboardFormatter;

impl DashboardFormatter {
    /// Format one log line: wall clock time, then the message
    ///
    /// Error lines carry an `[error]` marker.
    pub fn format_log_entry(entry: &LogEntry) -> String {
        let time = format_clock_time(&entry.timestamp);
        match entry.severity {
            Severity::Normal => format!("{} {}", time, entry.message),
            Severity::Error => format!("{} [error] {}", time, entry.message),
        }
    }

    /// Format the notification printed when a device row changes
    pub fn format_device_update(record: &DeviceRecord) -> String {
        let mut line = format!(
            "~ {} ({}) is now {}",
            record.id,
            record.hostname,
            record.state_label()
        );
        if let Some(error_message) = &record.error_message {
            line.push_str(&format!(": {}", error_message));
        }
        line
    }

    /// Format one row of the device table
    ///
    /// # Arguments
    ///
    /// * `record` - The device row
    /// * `now` - Reference time for the age column
    pub fn format_device_row(record: &DeviceRecord, now: &DateTime<Local>) -> String {
        let marker = if record.is_error {
            "!"
        } else if record.is_pending {
            "…"
        } else {
            " "
        };
        let age = time_ago(&record.updated_at, now);
        let mut row = format!(
            "{} {:<16} {:<32} {:<8} {}",
            marker,
            record.id,
            record.hostname,
            record.state_label(),
            age
        );
        if let Some(error_message) = &record.error_message {
            row.push_str(&format!("\n  └ {}", error_message));
        }
        row
    }

    /// Format the full device table
    pub fn format_device_table<'a>(
        devices: impl IntoIterator<Item = &'a DeviceRecord>,
        now: &DateTime<Local>,
    ) -> String {
        let mut output = String::new();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "  {:<16} {:<32} {:<8} {}\n",
            "DEVICE", "HOSTNAME", "STATE", "UPDATED"
        ));

        let mut empty = true;
        for record in devices {
            empty = false;
            output.push_str(&Self::format_device_row(record, now));
            output.push('\n');
        }
        if empty {
            output.push_str("(No devices)\n");
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format the log view, newest line first
    pub fn format_log_view(log: &LogView) -> String {
        let mut output = String::new();
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!("Log ({}/{}):\n", log.len(), log.capacity()));

        if log.is_empty() {
            output.push_str("(No log lines)\n");
        } else {
            for entry in log.newest_first() {
                output.push_str(&Self::format_log_entry(entry));
                output.push('\n');
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a counter change
    pub fn format_counter(name: &str, value: &str) -> String {
        format!("# {}: {}", name, value)
    }

    /// Format the stats panel
    pub fn format_stats(show_stats: bool, counters: &Counters) -> String {
        if !show_stats {
            return "Stats display is off.".to_string();
        }
        let goroutines = counters.goroutines.as_deref().unwrap_or("-");
        format!("Stats display is on.\n# goroutines: {}", goroutines)
    }

    /// Format the static banner shown after the connection is gone
    pub fn format_banner(banner: &str) -> String {
        format!("\n{}\n{}\n{}\n", RULE, banner, RULE)
    }

    /// Format a binary message notification
    ///
    /// # Arguments
    ///
    /// * `byte_count` - The number of bytes received
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("← Received {} bytes of binary data", byte_count)
    }

    /// Format a raw text message (when decoding fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("← Received: {}", text)
    }

    /// Format the list of interactive commands
    pub fn format_help() -> String {
        let mut output = String::from("Commands:\n");
        for (name, description) in Command::HELP {
            output.push_str(&format!("  {:<8} {}\n", name, description));
        }
        output
    }

    /// Format the hint printed for unrecognized input
    pub fn format_unknown_command(input: &str) -> String {
        format!("Unknown command '{}'. Type 'help' for a list of commands.", input)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::model::DeviceState;

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
            .single()
            .expect("unambiguous local time")
    }

    fn record(id: &str, state: DeviceState) -> DeviceRecord {
        DeviceRecord {
            id: id.to_string(),
            hostname: format!("{}.example.net", id),
            is_pending: state == DeviceState::Pending,
            is_error: state == DeviceState::Error,
            error_message: None,
            state: Some(state),
            updated_at: now() - Duration::seconds(150),
        }
    }

    #[test]
    fn test_format_log_entry_normal_and_error() {
        // テスト項目: 通常行とエラー行が時刻付きでフォーマットされる
        // given (前提条件):
        let normal = LogEntry::new(now(), "Starting collectors", Severity::Normal);
        let error = LogEntry::new(now(), "Collector failed", Severity::Error);

        // when (操作):
        let normal_line = DashboardFormatter::format_log_entry(&normal);
        let error_line = DashboardFormatter::format_log_entry(&error);

        // then (期待する結果):
        assert_eq!(normal_line, "12:00:00 Starting collectors");
        assert_eq!(error_line, "12:00:00 [error] Collector failed");
    }

    #[test]
    fn test_format_device_update_with_error_message() {
        // テスト項目: エラーメッセージ付きのデバイス更新通知がフォーマットされる
        // given (前提条件):
        let mut device = record("core1", DeviceState::Error);
        device.error_message = Some("Login failed".to_string());

        // when (操作):
        let result = DashboardFormatter::format_device_update(&device);

        // then (期待する結果):
        assert_eq!(result, "~ core1 (core1.example.net) is now Error: Login failed");
    }

    #[test]
    fn test_format_device_table_with_devices() {
        // テスト項目: デバイス表に全デバイスが状態と経過時間付きで表示される
        // given (前提条件):
        let devices = vec![
            record("core1", DeviceState::Success),
            record("edge1", DeviceState::Pending),
        ];

        // when (操作):
        let result = DashboardFormatter::format_device_table(&devices, &now());

        // then (期待する結果):
        assert!(result.contains("HOSTNAME"));
        assert!(result.contains("core1.example.net"));
        assert!(result.contains("Success"));
        assert!(result.contains("edge1.example.net"));
        assert!(result.contains("Pending"));
        assert!(result.contains("2 minutes"));
        assert!(!result.contains("(No devices)"));
    }

    #[test]
    fn test_format_device_table_empty() {
        // テスト項目: デバイスが無い場合、適切なメッセージが表示される
        // given (前提条件):
        let devices: Vec<DeviceRecord> = vec![];

        // when (操作):
        let result = DashboardFormatter::format_device_table(&devices, &now());

        // then (期待する結果):
        assert!(result.contains("(No devices)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_device_row_marks_errors() {
        // テスト項目: エラー状態の行にはマーカーとエラーメッセージが付く
        // given (前提条件):
        let mut device = record("core1", DeviceState::Timeout);
        device.is_error = true;
        device.error_message = Some("Timed out".to_string());

        // when (操作):
        let result = DashboardFormatter::format_device_row(&device, &now());

        // then (期待する結果):
        assert!(result.starts_with("! core1"));
        assert!(result.contains("Timeout"));
        assert!(result.contains("└ Timed out"));
    }

    #[test]
    fn test_format_log_view_newest_first() {
        // テスト項目: ログビューが新しい順に表示される
        // given (前提条件):
        let mut log = LogView::with_capacity(5);
        log.push(LogEntry::new(now(), "older", Severity::Normal));
        log.push(LogEntry::new(now(), "newer", Severity::Normal));

        // when (操作):
        let result = DashboardFormatter::format_log_view(&log);

        // then (期待する結果):
        assert!(result.contains("Log (2/5):"));
        let newer = result.find("newer").unwrap();
        let older = result.find("older").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_format_stats() {
        // テスト項目: 統計表示のオン・オフに応じてカウンターが表示される
        // given (前提条件):
        let counters = Counters {
            goroutines: Some("17".to_string()),
        };

        // when (操作):
        let hidden = DashboardFormatter::format_stats(false, &counters);
        let shown = DashboardFormatter::format_stats(true, &counters);

        // then (期待する結果):
        assert_eq!(hidden, "Stats display is off.");
        assert!(shown.contains("# goroutines: 17"));
    }

    #[test]
    fn test_format_banner() {
        // テスト項目: バナーが区切り線で囲まれる
        // given (前提条件):
        let banner = "Network error - please reload.";

        // when (操作):
        let result = DashboardFormatter::format_banner(banner);

        // then (期待する結果):
        assert!(result.contains(banner));
        assert_eq!(result.matches(RULE).count(), 2);
    }

    #[test]
    fn test_format_binary_and_raw_message() {
        // テスト項目: バイナリ通知と生メッセージが正しくフォーマットされる
        // given (前提条件):
        let byte_count = 1024;
        let text = "unknown message format";

        // when (操作):
        let binary = DashboardFormatter::format_binary_message(byte_count);
        let raw = DashboardFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(binary.contains("1024 bytes"));
        assert!(raw.contains("unknown message format"));
    }

    #[test]
    fn test_format_help_lists_every_command() {
        // テスト項目: ヘルプにすべてのコマンドが表示される
        // given (前提条件):

        // when (操作):
        let result = DashboardFormatter::format_help();

        // then (期待する結果):
        for name in ["devices", "log", "stats", "help", "quit"] {
            assert!(result.contains(name), "{}", name);
        }
    }
}
