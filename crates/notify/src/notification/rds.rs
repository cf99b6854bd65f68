//! RDS event notifications.

use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{optional_str, require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":registered:")])];

#[derive(Debug, Clone, PartialEq)]
pub struct RdsEvent {
    pub meta: RecordMeta,
    pub event_source: String,
    pub event_message: String,
    pub source_id: String,
    /// Two-line value: URL, then a human title.
    pub identifier_link: Option<String>,
}

impl RdsEvent {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let event_source = require_str(message, "Event Source", &meta)?;
        let event_message = require_str(message, "Event Message", &meta)?;
        let source_id = require_str(message, "Source ID", &meta)?;
        let identifier_link = optional_str(message, "Identifier Link");
        Ok(Self {
            meta,
            event_source,
            event_message,
            source_id,
            identifier_link,
        })
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        let mut fields = vec![
            AttachmentField::plain(
                "Source",
                format!("{} '{}'", self.event_source, self.source_id),
            ),
            AttachmentField::plain("Message", self.event_message.clone()),
        ];
        if let Some(link) = &self.identifier_link {
            fields.push(AttachmentField::plain("Details", hyperlink(link)));
        }
        // No color: RDS events carry no severity.
        vec![Attachment {
            fields,
            ..Attachment::default()
        }]
    }
}

/// Render the `Identifier Link` value as Slack markup `<URL|TITLE>`.
/// A single-line value is reused for both URL and title.
fn hyperlink(link: &str) -> String {
    let mut lines = link.lines();
    let url = lines.next().unwrap_or(link);
    let title = lines.next().unwrap_or(url);
    format!("<{url}|{title}>")
}
