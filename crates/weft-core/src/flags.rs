//! Message flag state.
//!
//! Flags are named sets of message IDs (`read`, `starred`, `mentioned`, ...).
//! The `read` flag is special throughout the engine: content diffing ignores
//! it (read state reaches the render surface through a dedicated event), and
//! in practice it only ever grows.

use std::collections::{BTreeMap, BTreeSet};

use crate::piece::MessageId;

/// Name of the read flag, excluded from content diffing.
pub const READ_FLAG: &str = "read";

/// Mapping of flag name to the set of message IDs carrying that flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlagsState {
    flags: BTreeMap<String, BTreeSet<MessageId>>,
}

impl FlagsState {
    /// Empty flag state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ID set for one flag.
    pub fn set(&mut self, name: impl Into<String>, ids: impl IntoIterator<Item = MessageId>) {
        self.flags.insert(name.into(), ids.into_iter().collect());
    }

    /// Whether `id` carries the named flag.
    pub fn has(&self, name: &str, id: MessageId) -> bool {
        self.flags.get(name).is_some_and(|ids| ids.contains(&id))
    }

    /// Whether `id` is marked read.
    pub fn is_read(&self, id: MessageId) -> bool {
        self.has(READ_FLAG, id)
    }

    /// Flag names present in this state.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    /// Compare flag states ignoring the `read` flag.
    ///
    /// Considers the union of flag names on both sides, so a flag present
    /// only on one side (with a non-empty set) counts as a difference.
    pub fn equal_excluding_read(&self, other: &Self) -> bool {
        let empty = BTreeSet::new();
        self.names()
            .chain(other.names())
            .filter(|name| *name != READ_FLAG)
            .all(|name| {
                self.flags.get(name).unwrap_or(&empty) == other.flags.get(name).unwrap_or(&empty)
            })
    }

    /// Whether any flag other than `read` differs between the two states for
    /// this particular message. Used by the diff to decide whether an
    /// unchanged piece still needs re-rendering.
    pub fn differs_excluding_read_for(&self, other: &Self, id: MessageId) -> bool {
        self.names()
            .chain(other.names())
            .filter(|name| *name != READ_FLAG)
            .any(|name| self.has(name, id) != other.has(name, id))
    }

    /// IDs read in `self` but not in `prev`, ascending.
    ///
    /// Read state is one-way in practice; removal is not signaled.
    pub fn newly_read(&self, prev: &Self) -> Vec<MessageId> {
        let empty = BTreeSet::new();
        let next_read = self.flags.get(READ_FLAG).unwrap_or(&empty);
        let prev_read = prev.flags.get(READ_FLAG).unwrap_or(&empty);
        next_read.difference(prev_read).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_excluding_read_ignores_read_changes() {
        let mut prev = FlagsState::new();
        prev.set(READ_FLAG, [2]);
        prev.set("starred", [7]);

        let mut next = FlagsState::new();
        next.set(READ_FLAG, [1, 2, 3]);
        next.set("starred", [7]);

        assert!(next.equal_excluding_read(&prev));
    }

    #[test]
    fn equal_excluding_read_sees_other_flags() {
        let mut prev = FlagsState::new();
        prev.set("starred", [7]);

        let mut next = FlagsState::new();
        next.set("starred", [7, 9]);

        assert!(!next.equal_excluding_read(&prev));
    }

    #[test]
    fn flag_present_on_one_side_only_counts() {
        let prev = FlagsState::new();
        let mut next = FlagsState::new();
        next.set("mentioned", [4]);

        assert!(!next.equal_excluding_read(&prev));
    }

    #[test]
    fn newly_read_is_ascending_set_difference() {
        let mut prev = FlagsState::new();
        prev.set(READ_FLAG, [2]);

        let mut next = FlagsState::new();
        next.set(READ_FLAG, [1, 2, 3]);

        assert_eq!(next.newly_read(&prev), vec![1, 3]);
    }

    #[test]
    fn differs_excluding_read_for_is_per_message() {
        let mut prev = FlagsState::new();
        prev.set("starred", [7]);
        let mut next = FlagsState::new();
        next.set("starred", [9]);

        assert!(next.differs_excluding_read_for(&prev, 7));
        assert!(next.differs_excluding_read_for(&prev, 9));
        assert!(!next.differs_excluding_read_for(&prev, 8));
    }
}
