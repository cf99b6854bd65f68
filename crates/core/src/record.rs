//! SNS delivery records and topic-identifier parsing.
//!
//! The transport envelope is treated as a thin pipe: the interesting
//! unit is the [`RawRecord`], an opaque bag of string fields that the
//! classifier inspects without ever mutating.

use serde::Deserialize;

use crate::error::RelayError;

/// One SNS delivery as it appears inside the transport envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "MessageId")]
    pub message_id: String,
    /// Absent on some publishers (e.g. raw CLI publishes).
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    /// Free text or a JSON document, depending on the publisher.
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "TopicArn")]
    pub topic_arn: String,
    /// `"Notification"` for real notifications; anything else is a
    /// subscription-control message and gets dropped.
    #[serde(rename = "Type", default)]
    pub record_type: String,
}

/// The `{"Records":[{"Sns":{...}}]}` envelope SNS hands to consumers.
#[derive(Debug, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    records: Vec<EnvelopeEntry>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeEntry {
    #[serde(rename = "Sns")]
    sns: RawRecord,
}

impl SnsEnvelope {
    /// Unwrap the envelope into its ordered records.
    pub fn into_records(self) -> Vec<RawRecord> {
        self.records.into_iter().map(|entry| entry.sns).collect()
    }
}

/// Routing information derived from a topic ARN.
///
/// An ARN looks like `arn:aws:sns:<REGION>:<ACCOUNT_ID>:<TOPIC_NAME>`:
/// region is segment index 3, topic name is the last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub region: String,
    pub topic_name: String,
}

impl TopicInfo {
    /// Split a colon-delimited topic ARN. Fewer than 4 segments means
    /// the region can't be extracted and the record is unusable.
    pub fn parse(arn: &str) -> Result<Self, RelayError> {
        let segments: Vec<&str> = arn.split(':').collect();
        if segments.len() < 4 {
            return Err(RelayError::MalformedTopicArn(arn.to_string()));
        }
        Ok(Self {
            region: segments[3].to_string(),
            // len >= 4, last() can't fail
            topic_name: segments.last().unwrap_or(&"").to_string(),
        })
    }

    pub fn topic_type(&self) -> TopicType {
        TopicType::of(&self.topic_name)
    }
}

/// Topic severity class, sniffed from the topic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicType {
    Notices,
    Alerts,
    Default,
}

impl TopicType {
    /// `notices` or `alerts` when that literal substring occurs in the
    /// topic name; the earliest occurrence wins when both appear.
    pub fn of(topic_name: &str) -> Self {
        match (topic_name.find("notices"), topic_name.find("alerts")) {
            (Some(n), Some(a)) if a < n => TopicType::Alerts,
            (Some(_), _) => TopicType::Notices,
            (None, Some(_)) => TopicType::Alerts,
            (None, None) => TopicType::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicType::Notices => "notices",
            TopicType::Alerts => "alerts",
            TopicType::Default => "default",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_topic_arn() {
        let info = TopicInfo::parse("arn:aws:sns:us-east-1:123456789012:production-notices")
            .unwrap();
        assert_eq!(info.region, "us-east-1");
        assert_eq!(info.topic_name, "production-notices");
        assert_eq!(info.topic_type(), TopicType::Notices);
    }

    #[test]
    fn parse_topic_arn_too_short() {
        let result = TopicInfo::parse("arn:aws:sns");
        match result {
            Err(RelayError::MalformedTopicArn(arn)) => assert_eq!(arn, "arn:aws:sns"),
            other => panic!("expected MalformedTopicArn, got: {other:?}"),
        }
    }

    #[test]
    fn topic_type_alerts() {
        assert_eq!(TopicType::of("production-alerts"), TopicType::Alerts);
    }

    #[test]
    fn topic_type_default() {
        assert_eq!(TopicType::of("deploys"), TopicType::Default);
    }

    #[test]
    fn topic_type_earliest_occurrence_wins() {
        assert_eq!(TopicType::of("alerts-notices"), TopicType::Alerts);
        assert_eq!(TopicType::of("notices-alerts"), TopicType::Notices);
    }

    #[test]
    fn envelope_unwraps_in_order() {
        let envelope: SnsEnvelope = serde_json::from_str(
            r#"{"Records":[
                {"Sns":{"MessageId":"a","Message":"one","TopicArn":"arn:aws:sns:r:1:t","Type":"Notification"}},
                {"Sns":{"MessageId":"b","Message":"two","TopicArn":"arn:aws:sns:r:1:t","Type":"Notification"}}
            ]}"#,
        )
        .unwrap();
        let records = envelope.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message_id, "a");
        assert_eq!(records[1].message_id, "b");
        assert!(records[0].subject.is_none());
    }
}
