use thiserror::Error;

/// Per-record and configuration failures.
///
/// Classification misses are not errors: unmatched records are simply
/// dropped. Everything here is surfaced to the caller so one bad
/// record never blocks the rest of a batch.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("malformed topic ARN `{0}`: expected at least 4 colon-delimited segments")]
    MalformedTopicArn(String),

    #[error("record {message_id}: missing required field `{field}`")]
    MissingField {
        message_id: String,
        field: &'static str,
    },

    #[error("record {message_id}: unrecognized {field} value `{value}`")]
    UnknownValue {
        message_id: String,
        field: &'static str,
        value: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl RelayError {
    pub fn missing_field(message_id: &str, field: &'static str) -> Self {
        RelayError::MissingField {
            message_id: message_id.to_string(),
            field,
        }
    }

    pub fn unknown_value(message_id: &str, field: &'static str, value: &str) -> Self {
        RelayError::UnknownValue {
            message_id: message_id.to_string(),
            field,
            value: value.to_string(),
        }
    }
}
