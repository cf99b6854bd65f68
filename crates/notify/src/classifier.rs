//! Record classification: ordered content-sniffing predicates.
//!
//! First match wins. The predicate order is part of the contract: a
//! structured message carrying both `AlarmName` and `Cause` is a
//! CloudWatch alarm, never an Auto Scaling event.

use serde_json::Value;

use relay_core::RawRecord;

/// `source` value identifying CodePipeline execution events.
const CODEPIPELINE_SOURCE: &str = "aws.codepipeline";
/// Substring identifying Datadog monitor text.
const DATADOG_DOMAIN: &str = "app.datadoghq.com";

/// The notification kinds the relay understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    CloudWatchAlarm,
    AutoScaling,
    ElastiCacheSnapshot,
    CodePipeline,
    Rds,
    SslExpiration,
    BackupChecker,
    Datadog,
}

/// Map a record to the notification kind it represents, or `None` to
/// drop it (subscription-control messages, unrecognized plain text).
pub fn classify(record: &RawRecord) -> Option<NotificationKind> {
    if record.record_type != "Notification" {
        return None;
    }
    let subject = record.subject.as_deref().unwrap_or("");
    match serde_json::from_str::<Value>(&record.message) {
        Ok(message) => Some(classify_structured(&message, subject)),
        Err(_) if record.message.contains(DATADOG_DOMAIN) => Some(NotificationKind::Datadog),
        Err(_) => None,
    }
}

fn classify_structured(message: &Value, subject: &str) -> NotificationKind {
    if message.get("AlarmName").is_some() {
        NotificationKind::CloudWatchAlarm
    } else if message.get("Cause").is_some() {
        NotificationKind::AutoScaling
    } else if message.get("ElastiCache:SnapshotComplete").is_some() {
        NotificationKind::ElastiCacheSnapshot
    } else if message.get("source").and_then(Value::as_str) == Some(CODEPIPELINE_SOURCE) {
        NotificationKind::CodePipeline
    } else if subject.contains("RDS") {
        NotificationKind::Rds
    } else if subject.contains("SSL Expiration Check") {
        NotificationKind::SslExpiration
    } else {
        // Deliberate catch-all: any structured message matching nothing
        // above is treated as a backup-checker report. Field extraction
        // rejects it afterwards if the shape doesn't fit.
        NotificationKind::BackupChecker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: Option<&str>, message: &str, record_type: &str) -> RawRecord {
        RawRecord {
            message_id: "95df01b4-ee98-5cb9-9903-4c221d41eb5e".to_string(),
            subject: subject.map(str::to_string),
            message: message.to_string(),
            topic_arn: "arn:aws:sns:us-east-1:123456789012:production-notices".to_string(),
            record_type: record_type.to_string(),
        }
    }

    #[test]
    fn non_notification_type_is_dropped() {
        let r = record(None, r#"{"AlarmName":"cpu-high"}"#, "SubscriptionConfirmation");
        assert_eq!(classify(&r), None);
    }

    #[test]
    fn alarm_name_selects_cloudwatch() {
        let r = record(None, r#"{"AlarmName":"cpu-high","Other":1}"#, "Notification");
        assert_eq!(classify(&r), Some(NotificationKind::CloudWatchAlarm));
    }

    #[test]
    fn predicate_order_is_significant() {
        // AlarmName and Cause together must classify as CloudWatch.
        let r = record(
            None,
            r#"{"AlarmName":"cpu-high","Cause":"scale out"}"#,
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::CloudWatchAlarm));
    }

    #[test]
    fn cause_selects_autoscaling() {
        let r = record(None, r#"{"Event":"launch","Cause":"At ..."}"#, "Notification");
        assert_eq!(classify(&r), Some(NotificationKind::AutoScaling));
    }

    #[test]
    fn snapshot_key_selects_elasticache() {
        let r = record(
            None,
            r#"{"ElastiCache:SnapshotComplete":"redis-cluster"}"#,
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::ElastiCacheSnapshot));
    }

    #[test]
    fn codepipeline_source_selects_codepipeline() {
        let r = record(
            None,
            r#"{"source":"aws.codepipeline","detail-type":"CodePipeline Pipeline Execution State Change","detail":{"pipeline":"deploy","state":"STARTED"}}"#,
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::CodePipeline));
    }

    #[test]
    fn rds_subject_selects_rds() {
        let r = record(
            Some("RDS Notification Message"),
            r#"{"Event Source":"db-instance","Event Message":"Backing up","Source ID":"prod-db"}"#,
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::Rds));
    }

    #[test]
    fn ssl_subject_selects_ssl_expiration() {
        let r = record(
            Some("SSL Expiration Check"),
            r#"{"hostname":"example.com","message":"all good","priority":"Low"}"#,
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::SslExpiration));
    }

    #[test]
    fn structured_fallthrough_is_backup_checker() {
        // Any JSON message matching no earlier predicate lands here,
        // whatever its shape.
        let r = record(None, r#"{"unrelated":"payload"}"#, "Notification");
        assert_eq!(classify(&r), Some(NotificationKind::BackupChecker));
    }

    #[test]
    fn plain_text_with_datadog_domain_selects_datadog() {
        let r = record(
            Some("[Triggered] CPU Load"),
            "docker.cpu.usage over host:web-1 ... Event URL: https://app.datadoghq.com/event/1",
            "Notification",
        );
        assert_eq!(classify(&r), Some(NotificationKind::Datadog));
    }

    #[test]
    fn plain_text_without_datadog_domain_is_dropped() {
        let r = record(None, "just some text", "Notification");
        assert_eq!(classify(&r), None);
    }
}
