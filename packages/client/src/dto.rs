//! Wire DTOs for the events pushed by the backup service.
//!
//! Every text frame is a JSON object tagged by `messageType`. Payload field
//! names follow the server's encoding (`messageData`, `State`, `Device`, ...).

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Inbound event, discriminated by `messageType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all = "lowercase")]
pub enum InboundMessage {
    Log {
        #[serde(rename = "messageData", default)]
        message_data: MessageData,
    },
    Error {
        #[serde(rename = "messageData", default)]
        message_data: MessageData,
    },
    Fatal {
        #[serde(rename = "messageData", default)]
        message_data: MessageData,
    },
    Device {
        /// Device id, the key of the device table
        device: String,
        status: DeviceStatusPayload,
    },
    Metric {
        /// Metric name (the server reuses the `device` field for it)
        device: String,
        #[serde(rename = "messageData", default)]
        message_data: MessageData,
    },
    /// Any `messageType` this client does not know about
    #[serde(other)]
    Unknown,
}

/// Free-form `messageData` payload.
///
/// Strings display verbatim, other JSON values display as their JSON text.
/// A missing or `null` payload displays as empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageData(pub serde_json::Value);

impl fmt::Display for MessageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::Null => Ok(()),
            serde_json::Value::String(text) => f.write_str(text),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for MessageData {
    fn from(text: &str) -> Self {
        Self(serde_json::Value::String(text.to_string()))
    }
}

/// Status snapshot of one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusPayload {
    /// State code, see [`crate::model::DeviceState`]
    #[serde(rename = "State")]
    pub state: i64,
    /// Explicit error flag, `1` when set
    #[serde(rename = "StateIsError", default)]
    pub state_is_error: i64,
    #[serde(rename = "Device")]
    pub device: DeviceInfoPayload,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
    #[serde(rename = "When", default, skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<FixedOffset>>,
}

impl DeviceStatusPayload {
    pub fn error_flag(&self) -> bool {
        self.state_is_error == 1
    }

    /// Time the status was produced, if the server sent a real one
    pub fn produced_at(&self) -> Option<DateTime<FixedOffset>> {
        // unset times arrive as year 1
        self.when.filter(|when| when.timestamp() > 0)
    }
}

/// Access info of a device, only the hostname is displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfoPayload {
    #[serde(rename = "Hostname")]
    pub hostname: String,
}

/// Decode one text frame into an inbound event
pub fn decode_message(text: &str) -> Result<InboundMessage, ClientError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_log_message() {
        // テスト項目: log メッセージが正しくデコードされる
        // given (前提条件):
        let text = r#"{"messageType":"log","messageData":"Starting collector: core1"}"#;

        // when (操作):
        let result = decode_message(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            InboundMessage::Log {
                message_data: MessageData::from("Starting collector: core1"),
            }
        );
    }

    #[test]
    fn test_decode_device_message_with_server_fields() {
        // テスト項目: device メッセージがサーバーのフィールド名でデコードされ、未知のフィールドは無視される
        // given (前提条件):
        let text = r#"{
            "messageType": "device",
            "device": "core1",
            "status": {
                "State": 1,
                "StateIsError": 1,
                "Device": {"Hostname": "core1.example.net", "Method": "cisco"},
                "ErrorMessage": "Timeout waiting for prompt",
                "When": "2023-01-01T09:00:00+09:00",
                "Configs": {}
            }
        }"#;

        // when (操作):
        let result = decode_message(text).unwrap();

        // then (期待する結果):
        let InboundMessage::Device { device, status } = result else {
            panic!("expected a device message");
        };
        assert_eq!(device, "core1");
        assert_eq!(status.state, 1);
        assert!(status.error_flag());
        assert_eq!(status.device.hostname, "core1.example.net");
        assert_eq!(status.error_message, "Timeout waiting for prompt");
        assert!(status.produced_at().is_some());
    }

    #[test]
    fn test_decode_device_message_with_minimal_status() {
        // テスト項目: 省略可能なフィールドが無い device メッセージもデコードできる
        // given (前提条件):
        let text = r#"{"messageType":"device","device":"d1","status":{"State":3,"Device":{"Hostname":"h1"}}}"#;

        // when (操作):
        let result = decode_message(text).unwrap();

        // then (期待する結果):
        let InboundMessage::Device { status, .. } = result else {
            panic!("expected a device message");
        };
        assert!(!status.error_flag());
        assert!(status.error_message.is_empty());
        assert_eq!(status.produced_at(), None);
    }

    #[test]
    fn test_zero_time_is_not_a_production_time() {
        // テスト項目: ゼロ値の時刻は生成時刻として扱われない
        // given (前提条件):
        let text = r#"{"messageType":"device","device":"d1","status":{"State":0,"Device":{"Hostname":"h1"},"When":"0001-01-01T00:00:00Z"}}"#;

        // when (操作):
        let result = decode_message(text).unwrap();

        // then (期待する結果):
        let InboundMessage::Device { status, .. } = result else {
            panic!("expected a device message");
        };
        assert!(status.when.is_some());
        assert_eq!(status.produced_at(), None);
    }

    #[test]
    fn test_decode_unknown_message_type() {
        // テスト項目: 未知の messageType は Unknown としてデコードされる
        // given (前提条件):
        let text = r#"{"messageType":"heartbeat","messageData":"ok"}"#;

        // when (操作):
        let result = decode_message(text).unwrap();

        // then (期待する結果):
        assert_eq!(result, InboundMessage::Unknown);
    }

    #[test]
    fn test_decode_rejects_malformed_frame() {
        // テスト項目: JSON でないフレームや必須フィールドの欠落はデコードエラーになる
        // given (前提条件):
        let frames = [
            "not json",
            r#"{"messageData":"no type"}"#,
            r#"{"messageType":"device","device":"d1"}"#,
        ];

        for frame in frames {
            // when (操作):
            let result = decode_message(frame);

            // then (期待する結果):
            assert!(matches!(result, Err(ClientError::Decode(_))), "{}", frame);
        }
    }

    #[test]
    fn test_message_data_display() {
        // テスト項目: messageData は文字列ならそのまま、それ以外は JSON テキストとして表示される
        // given (前提条件):
        let text = MessageData::from("hello");
        let number = MessageData(serde_json::json!(42));
        let missing = MessageData::default();
        let null = MessageData(serde_json::Value::Null);

        // when (操作) / then (期待する結果):
        assert_eq!(text.to_string(), "hello");
        assert_eq!(number.to_string(), "42");
        assert_eq!(missing.to_string(), "");
        assert_eq!(null.to_string(), "");
    }
}
