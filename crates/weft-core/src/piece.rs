//! Renderable pieces and their total order.
//!
//! A message stream renders as an ordered run of pieces: date separators,
//! conversation headers, and the messages themselves. Separators and headers
//! are associated with the message that follows them, so every piece carries
//! a message ID. Pieces sharing a message ID are ordered by rank:
//! time separator, then header, then message.
//!
//! # Invariants
//!
//! - A [`PieceSequence`] is non-decreasing by `(message id, rank)`. Violating
//!   this is a programming error in the upstream producer and is rejected at
//!   construction, never silently reordered.

use std::cmp::Ordering;

use crate::error::OrderError;

/// Numeric message identifier, ascending in send order.
pub type MessageId = u64;

/// How much identifying detail a conversation header renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Full recipient bar: conversation plus topic and date.
    Full,
    /// Topic and date only; the conversation is implied by the view.
    TopicDate,
    /// No visible header (single-conversation views).
    None,
}

/// One renderable unit in the message stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Date separator shown above the associated message.
    Time {
        /// ID of the message this separator precedes.
        message_id: MessageId,
        /// Unix timestamp (seconds) of that message.
        timestamp: u64,
    },

    /// Conversation header shown above the associated message.
    Header {
        /// ID of the message this header precedes.
        message_id: MessageId,
        /// Detail level for this header.
        style: HeaderStyle,
    },

    /// A chat message (or locally-queued outgoing message).
    Message {
        /// The message's ID.
        id: MessageId,
        /// Brief rendering: suppress sender, avatar, and timestamp because
        /// the previous piece already established them.
        is_brief: bool,
        /// Upstream-provided render payload. Opaque to the core; it only
        /// participates in equality so that content edits are detected.
        content: String,
    },
}

impl Piece {
    /// ID of the message this piece is associated with.
    pub fn message_id(&self) -> MessageId {
        match self {
            Self::Time { message_id, .. } | Self::Header { message_id, .. } => *message_id,
            Self::Message { id, .. } => *id,
        }
    }

    /// Rank used to order pieces that share a message ID:
    /// `Time < Header < Message`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Time { .. } => 0,
            Self::Header { .. } => 1,
            Self::Message { .. } => 2,
        }
    }

    /// Sort key defining the total order over pieces.
    pub fn sort_key(&self) -> (MessageId, u8) {
        (self.message_id(), self.rank())
    }

    /// Total order over pieces: message ID ascending, then rank.
    ///
    /// This is deliberately not an `Ord` impl: two pieces with equal keys may
    /// still differ in content, which would make `Ord` lie about equality.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Validated, ordered, immutable list of pieces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieceSequence {
    pieces: Vec<Piece>,
}

impl PieceSequence {
    /// Wrap a piece list, verifying the ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Unordered`] if any piece compares below its
    /// predecessor under [`Piece::compare`].
    pub fn new(pieces: Vec<Piece>) -> Result<Self, OrderError> {
        validate_order(&pieces)?;
        Ok(Self { pieces })
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pieces as a slice, in order.
    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    /// Iterate over pieces in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the sequence holds no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Ascending IDs of the `Message` pieces (separators and headers are
    /// presentation artifacts and do not count as messages).
    pub fn message_ids(&self) -> Vec<MessageId> {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Message { id, .. } => Some(*id),
                Piece::Time { .. } | Piece::Header { .. } => None,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PieceSequence {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

/// Verify that `pieces` is non-decreasing by `(message id, rank)`.
///
/// # Errors
///
/// Returns [`OrderError::Unordered`] with the index of the first offending
/// piece.
pub fn validate_order(pieces: &[Piece]) -> Result<(), OrderError> {
    for (index, window) in pieces.windows(2).enumerate() {
        if window[0].compare(&window[1]) == Ordering::Greater {
            return Err(OrderError::Unordered { index: index + 1 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: MessageId) -> Piece {
        Piece::Message { id, is_brief: false, content: format!("m{id}") }
    }

    #[test]
    fn rank_orders_time_header_message() {
        let time = Piece::Time { message_id: 5, timestamp: 1000 };
        let header = Piece::Header { message_id: 5, style: HeaderStyle::Full };
        let message = msg(5);

        assert_eq!(time.compare(&header), Ordering::Less);
        assert_eq!(header.compare(&message), Ordering::Less);
        assert_eq!(time.compare(&message), Ordering::Less);
    }

    #[test]
    fn message_id_dominates_rank() {
        let message = msg(4);
        let time = Piece::Time { message_id: 5, timestamp: 1000 };

        assert_eq!(message.compare(&time), Ordering::Less);
        assert_eq!(time.compare(&message), Ordering::Greater);
    }

    #[test]
    fn equal_keys_compare_equal_even_when_content_differs() {
        let a = Piece::Message { id: 3, is_brief: false, content: "old".into() };
        let b = Piece::Message { id: 3, is_brief: false, content: "new".into() };

        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn sequence_accepts_ordered_pieces() {
        let seq = PieceSequence::new(vec![
            Piece::Time { message_id: 1, timestamp: 10 },
            Piece::Header { message_id: 1, style: HeaderStyle::Full },
            msg(1),
            msg(2),
        ]);
        assert!(seq.is_ok());
    }

    #[test]
    fn sequence_rejects_unordered_pieces() {
        let result = PieceSequence::new(vec![msg(1), msg(5), msg(4)]);
        assert_eq!(result, Err(OrderError::Unordered { index: 2 }));
    }

    #[test]
    fn sequence_rejects_rank_inversion() {
        // Header after message for the same ID violates the rank order.
        let result = PieceSequence::new(vec![
            msg(7),
            Piece::Header { message_id: 7, style: HeaderStyle::Full },
        ]);
        assert_eq!(result, Err(OrderError::Unordered { index: 1 }));
    }

    #[test]
    fn message_ids_skips_separators_and_headers() {
        let seq = PieceSequence::new(vec![
            Piece::Time { message_id: 2, timestamp: 10 },
            Piece::Header { message_id: 2, style: HeaderStyle::TopicDate },
            msg(2),
            msg(4),
        ])
        .unwrap();
        assert_eq!(seq.message_ids(), vec![2, 4]);
    }
}
