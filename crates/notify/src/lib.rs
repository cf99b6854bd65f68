//! SNS to Slack notification relay.
//!
//! This crate provides:
//! - `classify`: ordered content-sniffing over raw SNS records
//! - `Notification`: one typed variant per notification kind, with
//!   Slack attachment rendering
//! - `process_batch`: per-record classify, construct, render
//! - `SlackWebhook`: incoming-webhook delivery behind the `Notifier` trait

pub mod classifier;
pub mod notification;
pub mod payload;
pub mod processor;
pub mod slack;

pub use classifier::{classify, NotificationKind};
pub use notification::Notification;
pub use payload::{Attachment, AttachmentField, RenderedMessage, SlackMessage};
pub use processor::{process_batch, BatchOutput, RecordFailure};
pub use slack::{DeliveryError, Notifier, SlackWebhook};
