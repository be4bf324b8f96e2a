//! Inbound events: core → render surface.
//!
//! Events are JSON-serializable tagged unions, delivered in batches whose
//! order the surface must respect: a content or edit-sequence event first,
//! then read, fetching, and typing updates. The surface's internal state
//! machine depends on that order.

use serde::{Deserialize, Serialize};
use weft_core::{EditSequence, MessageId, UpdateStrategy};

/// One instruction to the render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum InboundEvent {
    /// Full rebuild of the message-list document (initial population).
    Content {
        /// Anchor message to scroll to, if any.
        scroll_message_id: Option<MessageId>,
        /// Concatenated rendered pieces.
        content: String,
        /// How to position the viewport afterwards.
        strategy: UpdateStrategy,
    },

    /// Incremental update: splice edits applied left to right.
    EditSequence {
        /// Ordered splice edits.
        edits: EditSequence,
        /// How to position the viewport afterwards.
        strategy: UpdateStrategy,
        /// Initial scroll target, present only on a genuine content change
        /// while an initial "scroll to a specific message" request is
        /// outstanding.
        scroll_message_id: Option<MessageId>,
    },

    /// Show or hide the history-fetch spinners.
    Fetching {
        /// Placeholder content is covering the list.
        show_placeholders: bool,
        /// An older-history fetch is in flight.
        older: bool,
        /// A newer-history fetch is in flight.
        newer: bool,
    },

    /// Replace the typing-indicator content (empty string clears it).
    Typing {
        /// Pre-rendered indicator content.
        content: String,
    },

    /// Mark these messages read in the surface's local state.
    Read {
        /// Newly-read message IDs, ascending.
        message_ids: Vec<MessageId>,
    },

    /// Handshake probe; the surface answers with its own `ready`.
    Ready,
}
