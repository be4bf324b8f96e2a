//! Piece-list construction from upstream message records.
//!
//! Turns an ascending message list into the canonical piece sequence for a
//! narrow: a date separator at the top and on day change, a recipient header
//! at the top and on conversation change (unless the narrow already pins the
//! conversation down), and a brief message rendering whenever the sender
//! repeats with nothing in between.

use crate::{
    error::OrderError,
    narrow::Narrow,
    piece::{MessageId, Piece, PieceSequence},
};

const SECONDS_PER_DAY: u64 = 86_400;

/// Minimal upstream message record the layout needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMeta {
    /// Message ID, ascending in send order.
    pub id: MessageId,
    /// Sender's user ID.
    pub sender_id: u64,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    /// Conversation key: stream+topic or the DM participant list. Two
    /// messages belong to the same conversation iff the keys are equal.
    pub conversation: String,
    /// Upstream-provided render payload, carried into the message piece.
    pub content: String,
}

/// Whether two timestamps fall on the same UTC day.
fn same_day(a: u64, b: u64) -> bool {
    a / SECONDS_PER_DAY == b / SECONDS_PER_DAY
}

/// Build the piece sequence for `messages` viewed through `narrow`.
///
/// # Errors
///
/// Returns [`OrderError::Unordered`] if `messages` is not ascending by ID
/// (which would make the resulting pieces violate the sequence invariant).
pub fn build_piece_sequence(
    messages: &[MessageMeta],
    narrow: &Narrow,
) -> Result<PieceSequence, OrderError> {
    // Headers identify the conversation; skip them when the narrow already
    // does.
    let show_headers = !narrow.is_single_conversation();

    let mut pieces = Vec::new();
    let mut prev: Option<&MessageMeta> = None;
    for message in messages {
        let show_date =
            prev.is_none_or(|previous| !same_day(previous.timestamp, message.timestamp));
        if show_date {
            pieces.push(Piece::Time { message_id: message.id, timestamp: message.timestamp });
        }

        let show_header = show_headers
            && prev.is_none_or(|previous| previous.conversation != message.conversation);
        if show_header {
            pieces.push(Piece::Header { message_id: message.id, style: narrow.header_style() });
        }

        // Sender binds tighter than date or header in the visual design, so
        // reaffirm it after either separator.
        let show_sender = prev.is_none_or(|previous| previous.sender_id != message.sender_id)
            || show_date
            || show_header;

        pieces.push(Piece::Message {
            id: message.id,
            is_brief: !show_sender,
            content: message.content.clone(),
        });
        prev = Some(message);
    }

    PieceSequence::new(pieces)
}
