//! Transition classification between two message-list snapshots.
//!
//! Compares the previous and next `(narrow, ordered message IDs)` pairs and
//! derives a set of boolean facts about what changed. The facts are computed
//! independently and are not mutually exclusive; the update-strategy ladder
//! imposes the priority order.

use crate::{narrow::Narrow, piece::MessageId};

/// Boolean facts describing how the visible message list changed.
///
/// Message-ID lists are assumed sorted ascending, consistent with how the
/// upstream state layer produces them; duplicate IDs are not expected and
/// get no special handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionFacts {
    /// The narrow descriptors compare equal by value.
    pub same_narrow: bool,
    /// The next list is empty.
    pub no_messages: bool,
    /// Same narrow and the list lengths are equal.
    pub no_new_messages: bool,
    /// Same narrow, previous list empty, next list non-empty.
    pub all_new_messages: bool,
    /// Same narrow, both non-empty, more history prepended.
    pub old_messages_added: bool,
    /// Same narrow, both non-empty, more recent messages appended.
    pub new_messages_added: bool,
    /// Same narrow and exactly one message appended past the prior last one.
    ///
    /// Literal check: next has at least two items and its second-to-last ID
    /// equals the previous last ID. Simultaneous prepend-and-append inputs
    /// can satisfy this without exactly one append; the behavior is kept
    /// as-is because the strategy ladder depends on it.
    pub only_one_new_message: bool,
    /// Same narrow, both non-empty, entirely disjoint newer window
    /// (for example after jumping to a new anchor).
    pub messages_replaced: bool,
}

impl TransitionFacts {
    /// Classify the transition from `(prev_narrow, prev_ids)` to
    /// `(next_narrow, next_ids)`.
    pub fn classify(
        prev_narrow: &Narrow,
        prev_ids: &[MessageId],
        next_narrow: &Narrow,
        next_ids: &[MessageId],
    ) -> Self {
        let same_narrow = prev_narrow == next_narrow;
        let both_non_empty = !prev_ids.is_empty() && !next_ids.is_empty();

        let first = |ids: &[MessageId]| ids.first().copied();
        let last = |ids: &[MessageId]| ids.last().copied();

        Self {
            same_narrow,
            no_messages: next_ids.is_empty(),
            no_new_messages: same_narrow && prev_ids.len() == next_ids.len(),
            all_new_messages: same_narrow && prev_ids.is_empty() && !next_ids.is_empty(),
            old_messages_added: same_narrow
                && both_non_empty
                && first(next_ids) < first(prev_ids),
            new_messages_added: same_narrow && both_non_empty && last(next_ids) > last(prev_ids),
            only_one_new_message: same_narrow
                && !prev_ids.is_empty()
                && next_ids.len() >= 2
                && next_ids.get(next_ids.len() - 2).copied() == last(prev_ids),
            messages_replaced: same_narrow
                && both_non_empty
                && last(prev_ids) < first(next_ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow() -> Narrow {
        Narrow::Stream { name: "general".into() }
    }

    fn other_narrow() -> Narrow {
        Narrow::Stream { name: "random".into() }
    }

    fn classify(prev: &[MessageId], next: &[MessageId]) -> TransitionFacts {
        TransitionFacts::classify(&narrow(), prev, &narrow(), next)
    }

    #[test]
    fn same_empty_lists() {
        let facts = classify(&[], &[]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            no_messages: true,
            no_new_messages: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn old_messages_prepended() {
        let facts = classify(&[2, 3, 4], &[0, 1, 3, 4]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            old_messages_added: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn new_messages_appended() {
        let facts = classify(&[2, 3, 4], &[2, 3, 4, 5, 6, 7]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            new_messages_added: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn exactly_one_message_appended() {
        let facts = classify(&[2, 3, 4], &[2, 3, 4, 5]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            new_messages_added: true,
            only_one_new_message: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn initial_fetch_is_all_new() {
        let facts = classify(&[], &[1, 2, 3]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            all_new_messages: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn disjoint_newer_window_is_replaced() {
        let facts = classify(&[1, 2], &[4, 5, 6]);
        assert_eq!(facts, TransitionFacts {
            same_narrow: true,
            messages_replaced: true,
            new_messages_added: true,
            ..TransitionFacts::default()
        });
    }

    #[test]
    fn narrow_change_clears_same_narrow_facts() {
        let facts = TransitionFacts::classify(&narrow(), &[1, 2], &other_narrow(), &[1, 2]);
        assert_eq!(facts, TransitionFacts::default());
    }
}
