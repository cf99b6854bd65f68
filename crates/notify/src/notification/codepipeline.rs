//! CodePipeline execution state-change events.

use serde_json::Value;

use relay_core::RelayError;

use crate::notification::{require_str, IconTable, RecordMeta};
use crate::payload::{Attachment, AttachmentField};

pub(crate) const ICONS: IconTable = &[("notices", &[("default", ":datadog:")])];

/// Execution state. Closed world: states outside this set are rejected
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Started,
    Succeeded,
    Failed,
}

impl PipelineState {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "STARTED" => Some(PipelineState::Started),
            "SUCCEEDED" => Some(PipelineState::Succeeded),
            "FAILED" => Some(PipelineState::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Started => "STARTED",
            PipelineState::Succeeded => "SUCCEEDED",
            PipelineState::Failed => "FAILED",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PipelineState::Started | PipelineState::Succeeded => "good",
            PipelineState::Failed => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodePipeline {
    pub meta: RecordMeta,
    pub pipeline: String,
    pub state: PipelineState,
    /// The event's `detail-type`, used as attachment fallback.
    pub detail_type: String,
}

impl CodePipeline {
    pub(crate) fn from_message(meta: RecordMeta, message: &Value) -> Result<Self, RelayError> {
        let detail = message
            .get("detail")
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "detail"))?;
        let state_raw = detail
            .get("state")
            .and_then(Value::as_str)
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "detail.state"))?;
        let state = PipelineState::parse(state_raw).ok_or_else(|| {
            RelayError::unknown_value(&meta.message_id, "detail.state", state_raw)
        })?;
        let pipeline = detail
            .get("pipeline")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RelayError::missing_field(&meta.message_id, "detail.pipeline"))?;
        let detail_type = require_str(message, "detail-type", &meta)?;
        Ok(Self {
            meta,
            pipeline,
            state,
            detail_type,
        })
    }

    pub(crate) fn attachments(&self) -> Vec<Attachment> {
        vec![Attachment {
            fallback: Some(self.detail_type.clone()),
            color: Some(self.state.color().to_string()),
            fields: vec![
                AttachmentField::plain("Pipeline", self.pipeline.clone()),
                AttachmentField::plain("State", self.state.as_str()),
            ],
            ..Attachment::default()
        }]
    }
}
