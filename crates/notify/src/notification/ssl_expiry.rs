//! SSL certificate expiration check notifications.

use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":supersurycat:")])];

const HIGH_PRETEXT: &str = "Certificate will expire soon. Have a look at it!";
const CRITICAL_PRETEXT: &str = "Error while validating certificate.";
/// Low-priority reports show this fixed glyph pair instead of the
/// hostname.
const LOW_TITLE: &str = ":white_check_mark: :scroll:";

/// Check priority. Closed world: anything else is rejected at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Low,
}

impl Priority {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "Critical" => Some(Priority::Critical),
            "High" => Some(Priority::High),
            "Low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Low => "Low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Priority::Critical => "#FF0000",
            Priority::High => "#FF8C00",
            Priority::Low => "#008000",
        }
    }

    fn marker(&self) -> &'static str {
        match self {
            Priority::Critical => ":rotating_light:",
            Priority::High => ":warning:",
            Priority::Low => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SslExpiration {
    pub meta: RecordMeta,
    pub hostname: String,
    pub message: String,
    pub priority: Priority,
}

impl SslExpiration {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let hostname = require_str(message, "hostname", &meta)?;
        let display_message = require_str(message, "message", &meta)?;
        let priority_label = require_str(message, "priority", &meta)?;
        let priority = Priority::parse(&priority_label).ok_or_else(|| {
            RelayError::unknown_value(&meta.message_id, "priority", &priority_label)
        })?;
        Ok(Self {
            meta,
            hostname,
            message: display_message,
            priority,
        })
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        match self.priority {
            Priority::Critical | Priority::High => {
                let sentence = match self.priority {
                    Priority::High => HIGH_PRETEXT,
                    _ => CRITICAL_PRETEXT,
                };
                let marker = self.priority.marker();
                vec![Attachment {
                    fallback: Some(self.message.clone()),
                    color: Some(self.priority.color().to_string()),
                    pretext: Some(format!("{marker} {sentence} {marker}")),
                    title: Some(self.hostname.clone()),
                    title_link: Some(format!("https://{}", self.hostname)),
                    fields: vec![
                        AttachmentField::long("Priority", self.priority.as_str()),
                        AttachmentField::long("Reason", self.message.clone()),
                    ],
                    ..Attachment::default()
                }]
            }
            Priority::Low => vec![Attachment {
                fallback: Some(self.message.clone()),
                color: Some(self.priority.color().to_string()),
                title: Some(LOW_TITLE.to_string()),
                fields: vec![AttachmentField::long("Priority", self.priority.as_str())],
                ..Attachment::default()
            }],
        }
    }
}
