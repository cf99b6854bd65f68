//! Outbound Slack payload types.
//!
//! Rendering splits in two: [`RenderedMessage`] is the canonical
//! output of the core (its `channel_key` is the bare topic name), and
//! [`SlackMessage`] is the wire payload after the caller resolves the
//! channel through the configured mapping.

use serde::Serialize;

use relay_core::RelayConfig;

/// One `{title, value, short?}` entry of an attachment block.
///
/// `value` serializes as JSON null when absent (e.g. a CloudWatch
/// alarm without a description); `short` is omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

impl AttachmentField {
    pub fn short(title: &str, value: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: Some(value.into()),
            short: Some(true),
        }
    }

    pub fn long(title: &str, value: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: Some(value.into()),
            short: Some(false),
        }
    }

    /// A field without the `short` hint.
    pub fn plain(title: &str, value: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            value: Some(value.into()),
            short: None,
        }
    }
}

/// One structured visual unit of the outbound payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    pub fields: Vec<AttachmentField>,
}

/// Canonical rendered output for one classified record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedMessage {
    /// Record subject when non-empty, else the raw message.
    pub text: String,
    /// Bare topic name; the caller resolves it to a channel.
    pub channel_key: String,
    pub username: String,
    pub icon_emoji: String,
    pub attachments: Vec<Attachment>,
}

impl RenderedMessage {
    /// Resolve the channel and produce the wire payload.
    pub fn into_payload(self, config: &RelayConfig) -> SlackMessage {
        let channel = config.channel_for(&self.channel_key).to_string();
        SlackMessage {
            text: self.text,
            channel,
            username: self.username,
            icon_emoji: self.icon_emoji,
            attachments: self.attachments,
        }
    }
}

/// The JSON document posted to the incoming webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlackMessage {
    pub text: String,
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_attachment_keys_are_omitted() {
        let attachment = Attachment {
            fallback: Some("fb".to_string()),
            fields: vec![AttachmentField::plain("Source", "db")],
            ..Attachment::default()
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["fallback"], "fb");
        assert!(json.get("color").is_none());
        assert!(json.get("title_link").is_none());
        assert!(json["fields"][0].get("short").is_none());
    }

    #[test]
    fn absent_field_value_serializes_as_null() {
        let field = AttachmentField {
            title: "Description".to_string(),
            value: None,
            short: Some(false),
        };
        let json = serde_json::to_value(&field).unwrap();
        assert!(json["value"].is_null());
        assert_eq!(json["short"], false);
    }

    #[test]
    fn into_payload_resolves_channel() {
        let mut config = RelayConfig::default();
        config
            .channel_map
            .insert("production-notices".to_string(), "#events".to_string());

        let rendered = RenderedMessage {
            text: "hello".to_string(),
            channel_key: "production-notices".to_string(),
            username: "AWS CloudWatch".to_string(),
            icon_emoji: ":ok:".to_string(),
            attachments: Vec::new(),
        };
        let payload = rendered.into_payload(&config);
        assert_eq!(payload.channel, "#events");

        let rendered = RenderedMessage {
            text: "hello".to_string(),
            channel_key: "unmapped-topic".to_string(),
            username: "AWS CloudWatch".to_string(),
            icon_emoji: ":ok:".to_string(),
            attachments: Vec::new(),
        };
        let payload = rendered.into_payload(&config);
        assert_eq!(payload.channel, "#webhook-tests");
    }

    #[test]
    fn empty_attachments_are_omitted_from_wire_payload() {
        let payload = SlackMessage {
            text: "t".to_string(),
            channel: "#c".to_string(),
            username: "u".to_string(),
            icon_emoji: ":ok:".to_string(),
            attachments: Vec::new(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("attachments").is_none());
    }
}
