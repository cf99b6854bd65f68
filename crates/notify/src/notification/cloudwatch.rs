//! CloudWatch alarm state-change notifications.

use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{nullable_str, require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[
    (
        "notices",
        &[
            ("ok", ":ok:"),
            ("alarm", ":fire:"),
            ("insufficient_data", ":question:"),
        ],
    ),
    (
        "alerts",
        &[
            ("ok", ":ok:"),
            ("alarm", ":fire:"),
            ("insufficient_data", ":question:"),
        ],
    ),
];

/// Alarm state. Closed world: any other `NewStateValue` is rejected at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Ok,
    Alarm,
    InsufficientData,
}

impl AlarmState {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ok" => Some(AlarmState::Ok),
            "alarm" => Some(AlarmState::Alarm),
            "insufficient_data" => Some(AlarmState::InsufficientData),
            _ => None,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AlarmState::Ok => "good",
            AlarmState::Alarm => "danger",
            AlarmState::InsufficientData => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudWatchAlarm {
    pub meta: RecordMeta,
    pub alarm_name: String,
    pub state: AlarmState,
    /// `NewStateValue` as published, shown in the Status field.
    pub state_label: String,
    pub description: Option<String>,
    pub reason: String,
}

impl CloudWatchAlarm {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let alarm_name = require_str(message, "AlarmName", &meta)?;
        let state_label = require_str(message, "NewStateValue", &meta)?;
        let state = AlarmState::parse(&state_label).ok_or_else(|| {
            RelayError::unknown_value(&meta.message_id, "NewStateValue", &state_label)
        })?;
        // AlarmDescription must be present; null is an accepted value.
        let description = nullable_str(message, "AlarmDescription", &meta)?;
        let reason = require_str(message, "NewStateReason", &meta)?;
        Ok(Self {
            meta,
            alarm_name,
            state,
            state_label,
            description,
            reason,
        })
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            fallback: Some(self.meta.raw_message.clone()),
            color: Some(self.state.color().to_string()),
            fields: vec![
                AttachmentField::short("Alarm", self.alarm_name.clone()),
                AttachmentField::short("Status", self.state_label.clone()),
                AttachmentField {
                    title: "Description".to_string(),
                    value: self.description.clone(),
                    short: Some(false),
                },
                AttachmentField::long("Reason", self.reason.clone()),
            ],
            ..Attachment::default()
        }]
    }
}
