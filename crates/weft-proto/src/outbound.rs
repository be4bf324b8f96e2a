//! Outbound events: render surface → core.
//!
//! Scroll telemetry drives fetching and read-marking; the rest are user
//! interaction intents routed to external actions. The set is open-ended on
//! the surface side (it evolves independently), so decoding tolerates
//! unknown `type` tags per event instead of failing the whole batch.

use serde::{Deserialize, Serialize};
use weft_core::{MessageId, Narrow};

use crate::errors::ProtocolError;

/// What a long-press gesture landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongPressTarget {
    /// A message body.
    Message,
    /// A conversation header.
    Header,
    /// A link inside a message.
    Link,
}

/// One event reported by the render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum OutboundEvent {
    /// Handshake answer; transitions the channel to ready.
    Ready,

    /// The viewport scrolled (or the surface pretended it did, e.g. after
    /// layout). Geometry is in logical pixels.
    Scroll {
        /// Height of the entire message-list document.
        offset_height: f64,
        /// Height of the visible portion.
        inner_height: f64,
        /// Offset from the document top to the visible portion's top.
        scroll_y: f64,
        /// Earliest message ID in view around this event.
        start_message_id: MessageId,
        /// Latest message ID in view around this event.
        end_message_id: MessageId,
    },

    /// Tap on a sender avatar.
    Avatar {
        /// The sender's user ID.
        from_user_id: u64,
    },

    /// Request to switch to another narrow (e.g. tapping a recipient bar).
    #[serde(rename = "narrow")]
    NarrowChange {
        /// The requested narrow.
        narrow: Narrow,
    },

    /// Tap on an inline image.
    Image {
        /// Image source URL.
        src: String,
        /// Message the image belongs to.
        message_id: MessageId,
    },

    /// Tap on a link.
    Url {
        /// Link target.
        href: String,
        /// Message the link belongs to.
        message_id: MessageId,
    },

    /// Long-press gesture.
    LongPress {
        /// What was pressed.
        target: LongPressTarget,
        /// Message (or header's first message) involved.
        message_id: MessageId,
        /// Link target when `target` is a link.
        href: Option<String>,
    },

    /// Toggle an emoji reaction.
    Reaction {
        /// Message being reacted to.
        message_id: MessageId,
        /// Emoji name.
        name: String,
        /// Emoji code.
        code: String,
        /// Reaction type (unicode emoji, realm emoji, ...).
        reaction_type: String,
        /// Whether the user had already voted this reaction.
        voted: bool,
    },

    /// Diagnostic chatter from the surface.
    Debug,

    /// Non-fatal problem reported by the surface.
    Warn {
        /// Arbitrary diagnostic payload.
        details: serde_json::Value,
    },

    /// Script error reported by the surface.
    Error {
        /// Arbitrary diagnostic payload.
        details: serde_json::Value,
    },
}

/// Event tags this protocol version understands.
const KNOWN_TYPES: &[&str] = &[
    "ready",
    "scroll",
    "avatar",
    "narrow",
    "image",
    "url",
    "long-press",
    "reaction",
    "debug",
    "warn",
    "error",
];

impl OutboundEvent {
    /// Decode a single event from its JSON value.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UnknownEvent`] for an unrecognized `type` tag;
    /// [`ProtocolError::InvalidPayload`] when the tag is known but the
    /// payload does not decode.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<missing>")
            .to_owned();
        serde_json::from_value(value).map_err(|err| {
            if KNOWN_TYPES.contains(&kind.as_str()) {
                ProtocolError::InvalidPayload { kind, message: err.to_string() }
            } else {
                ProtocolError::UnknownEvent { kind }
            }
        })
    }
}
