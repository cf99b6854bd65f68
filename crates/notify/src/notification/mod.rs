//! Typed notifications, one variant per kind.
//!
//! Each variant extracts its fields once at construction and renders
//! on demand. Shared behavior (topic routing, icon fallback) operates
//! over the [`RecordMeta`] every variant carries.

pub mod autoscaling;
pub mod backup;
pub mod cloudwatch;
pub mod codepipeline;
pub mod datadog;
pub mod elasticache;
pub mod rds;
pub mod ssl_expiry;

pub use autoscaling::AutoScaling;
pub use backup::{BackupChecker, BackupPriority};
pub use cloudwatch::{AlarmState, CloudWatchAlarm};
pub use codepipeline::{CodePipeline, PipelineState};
pub use datadog::{Datadog, MonitorStatus};
pub use elasticache::ElastiCacheSnapshot;
pub use rds::RdsEvent;
pub use ssl_expiry::{Priority, SslExpiration};

use serde_json::Value;

use relay_core::{RawRecord, RelayConfig, RelayError, TopicInfo, TopicType};

use crate::classifier::{self, NotificationKind};
use crate::payload::{Attachment, RenderedMessage};

/// Two-level icon table: topic type, then event condition.
pub(crate) type IconTable =
    &'static [(&'static str, &'static [(&'static str, &'static str)])];

/// Icon used on a table miss when the topic name contains `alerts`.
const ALERT_ICON: &str = ":fire:";

/// Fields shared by every notification kind, lifted off the source
/// record at construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMeta {
    pub message_id: String,
    pub subject: Option<String>,
    pub raw_message: String,
    pub region: String,
    pub topic_name: String,
}

impl RecordMeta {
    pub(crate) fn from_record(record: &RawRecord) -> Result<Self, RelayError> {
        let topic = TopicInfo::parse(&record.topic_arn)?;
        Ok(Self {
            message_id: record.message_id.clone(),
            subject: record.subject.clone(),
            raw_message: record.message.clone(),
            region: topic.region,
            topic_name: topic.topic_name,
        })
    }

    pub fn topic_type(&self) -> TopicType {
        TopicType::of(&self.topic_name)
    }

    /// Subject when present and non-empty, else the raw message.
    pub fn display_text(&self) -> &str {
        match &self.subject {
            Some(subject) if !subject.is_empty() => subject,
            _ => &self.raw_message,
        }
    }
}

/// A classified record, carrying its kind-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    CloudWatchAlarm(CloudWatchAlarm),
    AutoScaling(AutoScaling),
    ElastiCacheSnapshot(ElastiCacheSnapshot),
    Rds(RdsEvent),
    CodePipeline(CodePipeline),
    Datadog(Datadog),
    SslExpiration(SslExpiration),
    BackupChecker(BackupChecker),
}

impl Notification {
    /// Classify and construct. `Ok(None)` is a classification miss
    /// (the record is dropped); `Err` is a per-record extraction
    /// failure the caller must surface.
    pub fn from_record(record: &RawRecord) -> Result<Option<Self>, RelayError> {
        let Some(kind) = classifier::classify(record) else {
            return Ok(None);
        };
        let meta = RecordMeta::from_record(record)?;

        let notification = match kind {
            NotificationKind::CloudWatchAlarm => {
                Notification::CloudWatchAlarm(CloudWatchAlarm::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::AutoScaling => {
                Notification::AutoScaling(AutoScaling::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::ElastiCacheSnapshot => {
                Notification::ElastiCacheSnapshot(ElastiCacheSnapshot::new(meta))
            }
            NotificationKind::Rds => {
                Notification::Rds(RdsEvent::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::CodePipeline => {
                Notification::CodePipeline(CodePipeline::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::SslExpiration => {
                Notification::SslExpiration(SslExpiration::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::BackupChecker => {
                Notification::BackupChecker(BackupChecker::from_message(meta, &parsed(record)?)?)
            }
            NotificationKind::Datadog => Notification::Datadog(Datadog::from_text(meta)?),
        };
        Ok(Some(notification))
    }

    pub fn meta(&self) -> &RecordMeta {
        match self {
            Notification::CloudWatchAlarm(n) => &n.meta,
            Notification::AutoScaling(n) => &n.meta,
            Notification::ElastiCacheSnapshot(n) => &n.meta,
            Notification::Rds(n) => &n.meta,
            Notification::CodePipeline(n) => &n.meta,
            Notification::Datadog(n) => &n.meta,
            Notification::SslExpiration(n) => &n.meta,
            Notification::BackupChecker(n) => &n.meta,
        }
    }

    /// Fixed display name for the kind.
    pub fn username(&self) -> &'static str {
        match self {
            Notification::CloudWatchAlarm(_) => "AWS CloudWatch",
            Notification::AutoScaling(_) => "AWS AutoScaling",
            Notification::ElastiCacheSnapshot(_) => "AWS ElastiCache",
            Notification::Rds(_) => "AWS RDS",
            Notification::CodePipeline(_) => "AWS CodePipeline",
            Notification::Datadog(_) => "Datadog",
            Notification::SslExpiration(_) => "SSL Production Expiry Checker",
            Notification::BackupChecker(_) => "Backup checker",
        }
    }

    /// Kind-specific severity/state key, used only for icon lookup.
    pub fn event_condition(&self) -> String {
        match self {
            Notification::CloudWatchAlarm(n) => n.state_label.to_lowercase(),
            Notification::CodePipeline(n) => n.state.as_str().to_string(),
            _ => "default".to_string(),
        }
    }

    fn icon_table(&self) -> IconTable {
        match self {
            Notification::CloudWatchAlarm(_) => cloudwatch::ICONS,
            Notification::AutoScaling(_) => autoscaling::ICONS,
            Notification::ElastiCacheSnapshot(_) => elasticache::ICONS,
            Notification::Rds(_) => rds::ICONS,
            Notification::CodePipeline(_) => codepipeline::ICONS,
            Notification::Datadog(_) => datadog::ICONS,
            Notification::SslExpiration(_) => ssl_expiry::ICONS,
            Notification::BackupChecker(_) => backup::ICONS,
        }
    }

    pub fn icon(&self, config: &RelayConfig) -> String {
        resolve_icon(
            self.icon_table(),
            self.meta(),
            &self.event_condition(),
            &config.default_icon,
        )
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        match self {
            Notification::CloudWatchAlarm(n) => n.attachments(),
            Notification::AutoScaling(n) => n.attachments(),
            Notification::ElastiCacheSnapshot(n) => n.attachments(),
            Notification::Rds(n) => n.attachments(),
            Notification::CodePipeline(n) => n.attachments(),
            Notification::Datadog(n) => n.attachments(),
            Notification::SslExpiration(n) => n.attachments(),
            Notification::BackupChecker(n) => n.attachments(),
        }
    }

    /// Render into the canonical output value. Pure: rendering the
    /// same notification twice yields identical output.
    pub fn render(&self, config: &RelayConfig) -> RenderedMessage {
        let meta = self.meta();
        RenderedMessage {
            text: meta.display_text().to_string(),
            channel_key: meta.topic_name.clone(),
            username: self.username().to_string(),
            icon_emoji: self.icon(config),
            attachments: self.attachments(),
        }
    }
}

/// Look up `(topic_type, event_condition)` in a kind's icon table.
///
/// On a miss the fallback is two-stage: `:fire:` when the topic name
/// contains `alerts`, else the configured default icon.
pub(crate) fn resolve_icon(
    table: IconTable,
    meta: &RecordMeta,
    event_condition: &str,
    default_icon: &str,
) -> String {
    let condition = event_condition.to_ascii_lowercase();
    let hit = table
        .iter()
        .find(|(topic_type, _)| *topic_type == meta.topic_type().as_str())
        .and_then(|(_, conditions)| {
            conditions
                .iter()
                .find(|(cond, _)| *cond == condition)
                .map(|(_, icon)| *icon)
        });
    match hit {
        Some(icon) => icon.to_string(),
        None if meta.topic_name.contains("alerts") => ALERT_ICON.to_string(),
        None => default_icon.to_string(),
    }
}

fn parsed(record: &RawRecord) -> Result<Value, RelayError> {
    // classify() only routes structured kinds here, so this parse
    // succeeds for every record that reaches it.
    serde_json::from_str(&record.message)
        .map_err(|_| RelayError::missing_field(&record.message_id, "message"))
}

pub(crate) fn require_str(
    message: &Value,
    key: &'static str,
    meta: &RecordMeta,
) -> Result<String, RelayError> {
    message
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RelayError::missing_field(&meta.message_id, key))
}

pub(crate) fn optional_str(message: &Value, key: &str) -> Option<String> {
    message.get(key).and_then(Value::as_str).map(str::to_string)
}

/// The key must be present; an explicit JSON null maps to `None`.
pub(crate) fn nullable_str(
    message: &Value,
    key: &'static str,
    meta: &RecordMeta,
) -> Result<Option<String>, RelayError> {
    match message.get(key) {
        None => Err(RelayError::missing_field(&meta.message_id, key)),
        Some(value) => Ok(value.as_str().map(str::to_string)),
    }
}
