//! Side-effects and intents produced by the outbound handler.
//!
//! The handler is a pure state machine; these actions are instructions for
//! the hosting runtime to execute (dispatch a fetch, call the mark-as-read
//! API, open a screen). All are fire-and-forget from the engine's point of
//! view: it never observes their outcome.

use weft_core::{MessageId, Narrow};
use weft_proto::LongPressTarget;

/// Actions produced by the outbound event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    /// Fetch older history for this narrow. The external fetch layer is
    /// assumed idempotent against duplicate concurrent requests.
    FetchOlder {
        /// The narrow to fetch in.
        narrow: Narrow,
    },

    /// Fetch newer history for this narrow.
    FetchNewer {
        /// The narrow to fetch in.
        narrow: Narrow,
    },

    /// Mark these messages read. The API tolerates already-read IDs.
    MarkRead {
        /// Newly-visible unread message IDs, ascending.
        message_ids: Vec<MessageId>,
    },

    /// Open the profile screen for a user.
    ShowUserProfile {
        /// The user's ID.
        user_id: u64,
    },

    /// Switch the view to another narrow.
    SwitchNarrow {
        /// The requested narrow.
        narrow: Narrow,
    },

    /// Open an image in the lightbox.
    OpenLightbox {
        /// Image source URL.
        src: String,
        /// Message the image belongs to.
        message_id: MessageId,
    },

    /// Open a non-image link.
    OpenUrl {
        /// Link target.
        href: String,
        /// Message the link belongs to.
        message_id: MessageId,
    },

    /// Show the long-press action menu.
    ShowMessageMenu {
        /// What was pressed.
        target: LongPressTarget,
        /// Message involved.
        message_id: MessageId,
        /// Link target when a link was pressed.
        href: Option<String>,
    },

    /// Add or remove an emoji reaction.
    ToggleReaction {
        /// Message being reacted to.
        message_id: MessageId,
        /// Emoji name.
        name: String,
        /// Emoji code.
        code: String,
        /// Reaction type.
        reaction_type: String,
        /// Whether the user had already voted (true means remove).
        voted: bool,
    },
}
