//! Pre-flight validation for outbound requests.
//!
//! Anything rejected here is rejected before a remote call is made: oversized
//! messaging payloads, oversized or empty topic names, and entry values that
//! are not valid JSON. The limits are remote-enforced; validating locally
//! just turns a guaranteed HTTP 400 into an immediate typed error.

use snafu::Snafu;

/// Maximum length of a pub/sub topic name, in characters.
pub const MAX_TOPIC_CHARS: usize = 80;

/// Maximum length of a pub/sub message payload, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1024;

/// A request field rejected before reaching the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ValidationError {
    /// Topic name missing.
    #[snafu(display("topic name must not be empty"))]
    EmptyTopic,

    /// Topic name too long.
    #[snafu(display("topic name is {length} characters; maximum is {MAX_TOPIC_CHARS}"))]
    TopicTooLong {
        /// Observed length in characters.
        length: usize,
    },

    /// Message payload too long.
    #[snafu(display("message is {length} characters; maximum is {MAX_MESSAGE_CHARS}"))]
    MessageTooLong {
        /// Observed length in characters.
        length: usize,
    },

    /// Entry payload is not valid JSON.
    #[snafu(display("entry payload is not valid JSON: {reason}"))]
    MalformedPayload {
        /// Parser error text.
        reason: String,
    },
}

/// Validates a pub/sub topic name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTopic`] for an empty or whitespace-only
/// name and [`ValidationError::TopicTooLong`] past [`MAX_TOPIC_CHARS`].
pub fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    if topic.trim().is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    let length = topic.chars().count();
    if length > MAX_TOPIC_CHARS {
        return Err(ValidationError::TopicTooLong { length });
    }
    Ok(())
}

/// Validates a pub/sub message payload.
///
/// # Errors
///
/// Returns [`ValidationError::MessageTooLong`] past [`MAX_MESSAGE_CHARS`].
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    let length = message.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooLong { length });
    }
    Ok(())
}

/// Validates that an entry payload parses as JSON.
///
/// The set-entry endpoint stores JSON documents; a malformed payload is
/// rejected here rather than bounced off the remote.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedPayload`] with the parser's message.
pub fn validate_entry_payload(raw: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(raw).map_err(|e| ValidationError::MalformedPayload {
        reason: e.to_string(),
    })
}
