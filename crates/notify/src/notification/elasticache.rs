//! ElastiCache snapshot-completion notices.
//!
//! The payload carries nothing the rendering needs beyond the trigger
//! key itself, so the attachment text is fixed.

use crate::notification::{IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":stopwatch:")])];

#[derive(Debug, Clone, PartialEq)]
pub struct ElastiCacheSnapshot {
    pub meta: RecordMeta,
}

impl ElastiCacheSnapshot {
    pub(crate) fn new(meta: RecordMeta) -> Self {
        Self { meta }
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            text: Some("Details".to_string()),
            fallback: Some(self.meta.raw_message.clone()),
            color: Some("good".to_string()),
            fields: vec![
                AttachmentField::plain("Event", "ElastiCache Snapshot"),
                AttachmentField::plain("Message", "Snapshot Complete"),
            ],
            ..Attachment::default()
        }]
    }
}
