//! Viewport update strategy selection.
//!
//! Maps transition facts to one of a fixed set of strategies the render
//! surface understands. Evaluated as an ordered ladder, first match wins;
//! the order is a deliberate tie-break policy and must not be "cleaned up":
//! switching narrows or jumping to a disjoint window always re-anchors, bulk
//! additions preserve the reading position, and exactly one new trailing
//! message nudges to the bottom only if the reader was already near it
//! (the surface itself decides "near").

use serde::{Deserialize, Serialize};

use crate::transition::TransitionFacts;

/// How the render surface should (re)position its viewport after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateStrategy {
    /// No repositioning hint.
    Default,
    /// Discard and rebuild the scroll position outright.
    Replace,
    /// Keep the current reading position fixed.
    PreservePosition,
    /// Scroll to the anchor message.
    ScrollToAnchor,
    /// Scroll to the bottom, but only if already near the bottom.
    ScrollToBottomIfNearBottom,
}

impl UpdateStrategy {
    /// Select the strategy for a classified transition.
    pub fn select(facts: &TransitionFacts) -> Self {
        if facts.no_messages {
            Self::Replace
        } else if !facts.same_narrow || facts.all_new_messages || facts.messages_replaced {
            Self::ScrollToAnchor
        } else if facts.no_new_messages
            || facts.old_messages_added
            || (facts.new_messages_added && !facts.only_one_new_message)
        {
            Self::PreservePosition
        } else if facts.only_one_new_message {
            Self::ScrollToBottomIfNearBottom
        } else {
            Self::Default
        }
    }
}
