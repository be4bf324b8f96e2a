//! Protocol error types.
//!
//! Decode errors distinguish an unrecognized event type (an evolving render
//! surface may emit events this version does not know; degrade gracefully)
//! from a malformed payload on a known type (a bug on one side or the
//! other). Neither is allowed to take down the event loop.

use thiserror::Error;

/// Errors from encoding or decoding render-surface event batches.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The batch itself is not valid JSON or not an array.
    #[error("malformed event batch: {0}")]
    MalformedBatch(#[from] serde_json::Error),

    /// An event carries a `type` tag this protocol version does not know.
    #[error("unrecognized outbound event type {kind:?}")]
    UnknownEvent {
        /// The unrecognized tag (or `"<missing>"` if absent).
        kind: String,
    },

    /// An event has a known `type` tag but an invalid payload.
    #[error("invalid payload for outbound event {kind:?}: {message}")]
    InvalidPayload {
        /// The event's tag.
        kind: String,
        /// Decoder message.
        message: String,
    },
}

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
