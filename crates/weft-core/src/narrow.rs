//! Narrow descriptors: which slice of the conversation is being viewed.
//!
//! A narrow is a filter over the message stream: the whole feed, one stream,
//! one topic, one direct-message thread, and so on. Narrows are compared by
//! value; "same narrow" in transition classification means `PartialEq`.

use serde::{Deserialize, Serialize};

use crate::piece::HeaderStyle;

/// Filter describing the currently-viewed subset of the message stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Narrow {
    /// The combined home feed.
    Home,

    /// All messages in one stream.
    Stream {
        /// Stream name.
        name: String,
    },

    /// One topic within a stream.
    Topic {
        /// Stream name.
        stream: String,
        /// Topic name.
        topic: String,
    },

    /// A direct-message thread.
    Pm {
        /// Participant user IDs, ascending.
        user_ids: Vec<u64>,
    },

    /// Starred messages.
    Starred,

    /// Messages mentioning the user.
    Mentioned,

    /// Full-text search results.
    Search {
        /// Search query.
        query: String,
    },
}

impl Narrow {
    /// Header style for conversation headers rendered inside this narrow.
    ///
    /// Single-conversation narrows already identify the conversation, so
    /// their headers carry no detail; a stream narrow needs only topic and
    /// date; everything else shows the full recipient bar.
    pub fn header_style(&self) -> HeaderStyle {
        match self {
            Self::Stream { .. } => HeaderStyle::TopicDate,
            Self::Topic { .. } | Self::Pm { .. } => HeaderStyle::None,
            Self::Home | Self::Starred | Self::Mentioned | Self::Search { .. } => HeaderStyle::Full,
        }
    }

    /// Whether this narrow pins down a single conversation, making
    /// recipient headers redundant.
    pub fn is_single_conversation(&self) -> bool {
        matches!(self, Self::Topic { .. } | Self::Pm { .. })
    }
}
