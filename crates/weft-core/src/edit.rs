//! Edit-sequence generation: minimal ordered edits between two piece lists.
//!
//! The render surface hosts a long-lived document that is expensive to
//! rebuild, so content changes are shipped as splice edits instead. The
//! generator walks both sequences in lockstep under the piece total order
//! (a single merge pass, not a full LCS) and emits inserts, deletes, and
//! replaces whose indices refer to the evolving target array applied left to
//! right.
//!
//! # Invariants
//!
//! - Both inputs must individually be non-decreasing by `(message id, rank)`;
//!   a violation is fatal (upstream bug), never repaired here.
//! - Applying the emitted edits to the old rendered list yields exactly the
//!   new rendered list ([`apply_edit_sequence`] is the reference applier used
//!   by tests and fuzzing).

use serde::{Deserialize, Serialize};

use crate::{
    error::OrderError,
    flags::FlagsState,
    piece::{Piece, validate_order},
};

/// One splice operation on the rendered piece list.
///
/// `index` is a position in the target list as it evolves while edits are
/// applied left to right with array-splice semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Edit {
    /// Insert rendered content at `index`.
    Insert {
        /// Target position.
        index: usize,
        /// Rendered content for the inserted piece.
        content: String,
    },

    /// Remove the item at `index`.
    Delete {
        /// Target position.
        index: usize,
    },

    /// Replace the item at `index` with new rendered content.
    Replace {
        /// Target position.
        index: usize,
        /// Rendered content for the replacing piece.
        content: String,
    },
}

/// Ordered list of edits transforming one rendered piece list into another.
pub type EditSequence = Vec<Edit>;

/// Renders a piece to its final content form.
///
/// External collaborator: the core never interprets the output, it only
/// forwards it inside [`Edit::Insert`] and [`Edit::Replace`]. Invoked once
/// per inserted or replaced piece.
pub trait Renderer {
    /// Render one piece.
    fn render(&self, piece: &Piece) -> String;
}

impl<F: Fn(&Piece) -> String> Renderer for F {
    fn render(&self, piece: &Piece) -> String {
        self(piece)
    }
}

/// Predict whether two pieces with equal sort keys would render differently.
///
/// False positives cost a redundant replace; false negatives would leave
/// stale content on the surface, so equality is checked on the whole piece
/// plus any non-read flag of the associated message. Read state is excluded
/// because the surface updates it through the dedicated read event.
fn differs_interestingly(
    old_piece: &Piece,
    new_piece: &Piece,
    old_flags: &FlagsState,
    new_flags: &FlagsState,
) -> bool {
    if old_piece != new_piece {
        return true;
    }
    match new_piece {
        Piece::Message { id, .. } => new_flags.differs_excluding_read_for(old_flags, *id),
        Piece::Time { .. } | Piece::Header { .. } => false,
    }
}

/// Compute the edit sequence transforming `old` into `new`.
///
/// `old_flags`/`new_flags` are the flag states the two sequences were
/// rendered under; flag changes (other than `read`) force replaces even when
/// the pieces themselves are equal.
///
/// # Errors
///
/// Returns [`OrderError::Unordered`] if either input violates the piece
/// ordering invariant. This is a programming error upstream, not a
/// recoverable runtime condition.
pub fn get_edit_sequence<R: Renderer + ?Sized>(
    old: &[Piece],
    new: &[Piece],
    old_flags: &FlagsState,
    new_flags: &FlagsState,
    renderer: &R,
) -> Result<EditSequence, OrderError> {
    validate_order(old)?;
    validate_order(new)?;

    let mut edits = EditSequence::new();
    let mut x = 0;
    let mut y = 0;

    while x < old.len() && y < new.len() {
        let old_piece = &old[x];
        let new_piece = &new[y];
        match old_piece.compare(new_piece) {
            std::cmp::Ordering::Less => {
                // Old item with no counterpart in the new list.
                edits.push(Edit::Delete { index: y });
                x += 1;
            },
            std::cmp::Ordering::Greater => {
                // Newly introduced item.
                edits.push(Edit::Insert { index: y, content: renderer.render(new_piece) });
                y += 1;
            },
            std::cmp::Ordering::Equal => {
                if differs_interestingly(old_piece, new_piece, old_flags, new_flags) {
                    edits.push(Edit::Replace { index: y, content: renderer.render(new_piece) });
                }
                x += 1;
                y += 1;
            },
        }
    }
    while y < new.len() {
        edits.push(Edit::Insert { index: y, content: renderer.render(&new[y]) });
        y += 1;
    }
    // Each delete shifts the tail left, so deleting a trailing run repeats
    // the same index.
    while x < old.len() {
        edits.push(Edit::Delete { index: y });
        x += 1;
    }

    Ok(edits)
}

/// Apply an edit sequence to a rendered piece list with splice semantics.
///
/// Reference implementation of what the render surface does; used by the
/// round-trip tests and the fuzz target. Indices produced by
/// [`get_edit_sequence`] are always in range for the evolving list.
///
/// # Panics
///
/// Panics if an edit's index is out of range for the evolving list. Edits
/// from [`get_edit_sequence`] never are; hand-built sequences must keep the
/// splice indices valid themselves.
pub fn apply_edit_sequence(old: &[String], edits: &[Edit]) -> Vec<String> {
    let mut target: Vec<String> = old.to_vec();
    for edit in edits {
        match edit {
            Edit::Insert { index, content } => target.insert(*index, content.clone()),
            Edit::Delete { index } => {
                target.remove(*index);
            },
            Edit::Replace { index, content } => target[*index] = content.clone(),
        }
    }
    target
}
