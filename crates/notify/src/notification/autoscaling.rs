//! Auto Scaling group activity notifications.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":scales:")])];

static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"capacity from \w+ to \w+").expect("capacity pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct AutoScaling {
    pub meta: RecordMeta,
    pub event: String,
    pub cause: String,
}

impl AutoScaling {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let event = require_str(message, "Event", &meta)?;
        let cause = require_str(message, "Cause", &meta)?;
        Ok(Self { meta, event, cause })
    }

    /// The `capacity from X to Y` fragment of the cause, when present.
    /// No match renders as a null field value, not an error.
    pub fn capacity_change(&self) -> Option<String> {
        CAPACITY_RE
            .find(&self.cause)
            .map(|m| m.as_str().to_string())
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            text: Some("Details".to_string()),
            fallback: Some(self.meta.raw_message.clone()),
            color: Some("good".to_string()),
            fields: vec![
                AttachmentField {
                    title: "Capacity Change".to_string(),
                    value: self.capacity_change(),
                    short: Some(true),
                },
                AttachmentField::long("Event", self.event.clone()),
                AttachmentField::long("Cause", self.cause.clone()),
            ],
            ..Attachment::default()
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> RecordMeta {
        RecordMeta {
            message_id: "m-1".to_string(),
            subject: Some("Auto Scaling: launch".to_string()),
            raw_message: "{}".to_string(),
            region: "us-east-1".to_string(),
            topic_name: "production-notices".to_string(),
        }
    }

    #[test]
    fn capacity_change_extracted() {
        let message = serde_json::json!({
            "Event": "autoscaling:EC2_INSTANCE_LAUNCH",
            "Cause": "At 2018-06-10T23:01:29Z an instance was started in response to a difference between desired and actual capacity, increasing the capacity from 1 to 2."
        });
        let n = AutoScaling::from_message(meta(), &message).unwrap();
        assert_eq!(n.capacity_change().as_deref(), Some("capacity from 1 to 2"));
    }

    #[test]
    fn capacity_change_absent_is_null_field() {
        let message = serde_json::json!({
            "Event": "autoscaling:TEST_NOTIFICATION",
            "Cause": "User request"
        });
        let n = AutoScaling::from_message(meta(), &message).unwrap();
        assert_eq!(n.capacity_change(), None);

        let attachment = &n.attachments()[0];
        assert_eq!(attachment.fields[0].title, "Capacity Change");
        assert_eq!(attachment.fields[0].value, None);
    }

    #[test]
    fn attachment_shape() {
        let message = serde_json::json!({
            "Event": "autoscaling:EC2_INSTANCE_TERMINATE",
            "Cause": "shrinking the capacity from 2 to 1"
        });
        let n = AutoScaling::from_message(meta(), &message).unwrap();
        let attachment = &n.attachments()[0];
        assert_eq!(attachment.text.as_deref(), Some("Details"));
        assert_eq!(attachment.color.as_deref(), Some("good"));
        let titles: Vec<&str> = attachment
            .fields
            .iter()
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(titles, ["Capacity Change", "Event", "Cause"]);
    }

    #[test]
    fn missing_event_is_extraction_error() {
        let message = serde_json::json!({ "Cause": "User request" });
        match AutoScaling::from_message(meta(), &message) {
            Err(RelayError::MissingField { field, .. }) => assert_eq!(field, "Event"),
            other => panic!("expected MissingField, got: {other:?}"),
        }
    }
}
