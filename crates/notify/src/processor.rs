//! Batch processing: classify, construct, render.
//!
//! Records are independent and processed in input order. One bad
//! record never blocks the rest of the batch; its failure is collected
//! and surfaced to the caller.

use relay_core::{RawRecord, RelayConfig, RelayError};

use crate::notification::Notification;
use crate::payload::RenderedMessage;

/// One record that classified but failed field extraction.
#[derive(Debug)]
pub struct RecordFailure {
    pub message_id: String,
    pub error: RelayError,
}

/// Result of processing one batch.
#[derive(Debug)]
pub struct BatchOutput {
    /// Rendered messages, in input order. Classification misses are
    /// simply absent.
    pub messages: Vec<RenderedMessage>,
    /// Per-record extraction failures, in input order.
    pub failures: Vec<RecordFailure>,
}

/// Process one batch of records sequentially.
pub fn process_batch(records: &[RawRecord], config: &RelayConfig) -> BatchOutput {
    let mut messages = Vec::new();
    let mut failures = Vec::new();

    for record in records {
        match Notification::from_record(record) {
            Ok(Some(notification)) => messages.push(notification.render(config)),
            Ok(None) => {
                tracing::debug!(
                    message_id = %record.message_id,
                    "record matched no notification kind, dropped"
                );
            }
            Err(error) => {
                tracing::warn!(
                    message_id = %record.message_id,
                    error = %error,
                    "failed to build notification"
                );
                failures.push(RecordFailure {
                    message_id: record.message_id.clone(),
                    error,
                });
            }
        }
    }

    BatchOutput { messages, failures }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, subject: Option<&str>, message: &str, record_type: &str) -> RawRecord {
        RawRecord {
            message_id: id.to_string(),
            subject: subject.map(str::to_string),
            message: message.to_string(),
            topic_arn: "arn:aws:sns:us-east-1:123456789012:production-notices".to_string(),
            record_type: record_type.to_string(),
        }
    }

    #[test]
    fn bad_record_does_not_block_batch() {
        let records = vec![
            record(
                "good-1",
                Some("OK: cpu-high"),
                r#"{"AlarmName":"cpu-high","NewStateValue":"OK","AlarmDescription":null,"NewStateReason":"r"}"#,
                "Notification",
            ),
            // Classifies as BackupChecker (fallthrough) but has no usable shape.
            record("bad-1", None, r#"{"unrelated":true}"#, "Notification"),
            record(
                "good-2",
                None,
                r#"{"Event":"launch","Cause":"increasing the capacity from 1 to 2"}"#,
                "Notification",
            ),
        ];
        let output = process_batch(&records, &RelayConfig::default());
        assert_eq!(output.messages.len(), 2);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].message_id, "bad-1");
        // Input order preserved.
        assert_eq!(output.messages[0].username, "AWS CloudWatch");
        assert_eq!(output.messages[1].username, "AWS AutoScaling");
    }

    #[test]
    fn control_messages_are_silently_dropped() {
        let records = vec![record(
            "sub-1",
            None,
            r#"{"AlarmName":"a"}"#,
            "SubscriptionConfirmation",
        )];
        let output = process_batch(&records, &RelayConfig::default());
        assert!(output.messages.is_empty());
        assert!(output.failures.is_empty());
    }

    #[test]
    fn empty_batch_yields_empty_output() {
        let output = process_batch(&[], &RelayConfig::default());
        assert!(output.messages.is_empty());
        assert!(output.failures.is_empty());
    }
}
