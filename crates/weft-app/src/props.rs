//! Render-relevant prop snapshots.
//!
//! A [`RenderProps`] value is everything the inbound-event generator needs
//! to know about one render pass. Snapshots are immutable once built; the
//! bridge owns exactly one "previous" snapshot and replaces it atomically
//! after each comparison. There is a single logical writer (the upstream
//! state-change callback), so no locking is involved.

use weft_core::{FlagsState, MessageId, Narrow, PieceSequence};

/// In-flight history fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fetching {
    /// Fetching older history.
    pub older: bool,
    /// Fetching newer history.
    pub newer: bool,
}

/// A user currently typing in the viewed conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingUser {
    /// The user's ID.
    pub user_id: u64,
    /// Display name, used by the typing-indicator renderer.
    pub name: String,
}

/// Snapshot of everything render-relevant for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProps {
    /// Ordered pieces for the current narrow.
    pub pieces: PieceSequence,
    /// The narrow being viewed.
    pub narrow: Narrow,
    /// Message flag state.
    pub flags: FlagsState,
    /// In-flight fetch indicators.
    pub fetching: Fetching,
    /// Placeholder content is covering the list (initial load).
    pub show_placeholders: bool,
    /// Users currently typing.
    pub typing_users: Vec<TypingUser>,
    /// Outstanding "scroll to this message" request, if any.
    pub initial_scroll_message_id: Option<MessageId>,
}

impl RenderProps {
    /// Empty snapshot for a narrow: no messages, no flags, nothing in
    /// flight. The baseline a freshly-created surface is diffed against.
    pub fn empty(narrow: Narrow) -> Self {
        Self {
            pieces: PieceSequence::empty(),
            narrow,
            flags: FlagsState::new(),
            fetching: Fetching::default(),
            show_placeholders: false,
            typing_users: Vec::new(),
            initial_scroll_message_id: None,
        }
    }

    /// Ascending IDs of the messages in this snapshot.
    pub fn message_ids(&self) -> Vec<MessageId> {
        self.pieces.message_ids()
    }
}
