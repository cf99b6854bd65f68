//! Backup checker reports.
//!
//! Also the classifier's structured fallthrough target: any JSON
//! message matching no other predicate lands here, so construction is
//! the gate that rejects payloads without the expected shape.

use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":open_file_folder:")])];

/// Report priority. Narrower than the SSL checker's: High is not a
/// known backup priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPriority {
    Critical,
    Low,
}

impl BackupPriority {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "Critical" => Some(BackupPriority::Critical),
            "Low" => Some(BackupPriority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackupPriority::Critical => "Critical",
            BackupPriority::Low => "Low",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BackupPriority::Critical => "#FF0000",
            BackupPriority::Low => "#008000",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupChecker {
    pub meta: RecordMeta,
    pub hostname: String,
    pub message: String,
    pub priority: BackupPriority,
}

impl BackupChecker {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let hostname = require_str(message, "hostname", &meta)?;
        let display_message = require_str(message, "message", &meta)?;
        let priority_label = require_str(message, "priority", &meta)?;
        let priority = BackupPriority::parse(&priority_label).ok_or_else(|| {
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
        vec![Attachment {
            title: Some(self.hostname.clone()),
            title_link: Some(format!("https://{}", self.hostname)),
            fallback: Some(self.message.clone()),
            color: Some(self.priority.color().to_string()),
            fields: vec![
                AttachmentField::long("Priority", self.priority.as_str()),
                AttachmentField::long("Reason", self.message.clone()),
            ],
            ..Attachment::default()
        }]
    }
}
