//! Datadog monitor alerts, forwarded through SNS as plain text.
//!
//! Nothing here is structured: the event URL, monitor status, and
//! host are sniffed out of the message and subject with patterns.

use std::sync::LazyLock;

use regex::Regex;

use relay_core::RelayError;

use crate::notification::{IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":datadog:")])];

static EVENT_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Event URL: (\S*)").expect("event URL pattern is valid"));
static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+)\]").expect("status pattern is valid"));
static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"host:([A-Za-z0-9.-]*)").expect("host pattern is valid"));
// (?s) so the trailing monitor-links block is stripped through to the
// end of the message, newlines included.
static MONITOR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\sMonitor Status.*").expect("suffix pattern is valid"));

/// Monitor transition status, parsed from the `[...]` tag in the
/// subject. Closed world: anything else is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStatus {
    Recovered,
    Warn,
    Triggered,
}

impl MonitorStatus {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "Recovered" => Some(MonitorStatus::Recovered),
            "Warn" => Some(MonitorStatus::Warn),
            "Triggered" => Some(MonitorStatus::Triggered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorStatus::Recovered => "Recovered",
            MonitorStatus::Warn => "Warn",
            MonitorStatus::Triggered => "Triggered",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MonitorStatus::Recovered => "#008000",
            MonitorStatus::Warn => "#FF8C00",
            MonitorStatus::Triggered => "#FF0000",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Datadog {
    pub meta: RecordMeta,
    pub event_url: String,
    pub status: MonitorStatus,
    pub host: String,
    /// Rewritten display message: an `<URL|SUBJECT>` header plus the
    /// original text with the trailing ` Monitor Status...` block
    /// removed.
    pub message: String,
}

impl Datadog {
    pub(crate) fn from_text(meta: RecordMeta) -> Result<Self, RelayError> {
        let text = meta.raw_message.as_str();

        let event_url = EVENT_URL_RE
            .captures(text)
            .map(|c| c[1].to_string())
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "Event URL"))?;

        let subject = meta
            .subject
            .clone()
            .unwrap_or_else(|| meta.raw_message.clone());
        let status_label = STATUS_RE
            .captures(&subject)
            .map(|c| c[1].to_string())
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "monitor status"))?;
        let status = MonitorStatus::parse(&status_label).ok_or_else(|| {
            RelayError::unknown_value(&meta.message_id, "monitor status", &status_label)
        })?;

        let host = HOST_RE
            .captures(text)
            .map(|c| c[1].to_string())
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "host"))?;

        let message = format!(
            "<{event_url}|{subject}>\n\n{}",
            MONITOR_SUFFIX_RE.replace(text, "")
        );

        Ok(Self {
            meta,
            event_url,
            status,
            host,
            message,
        })
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            fallback: Some(self.message.clone()),
            color: Some(self.status.color().to_string()),
            title: Some(self.host.clone()),
            fields: vec![
                AttachmentField::plain("Alarm", "Datadog"),
                AttachmentField::plain("Status", self.status.as_str()),
                AttachmentField::plain("Host", self.host.clone()),
            ],
            ..Attachment::default()
        }]
    }
}
