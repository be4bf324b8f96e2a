//! Core algorithms for message-list synchronization.
//!
//! Everything here is pure and synchronous: given ordered piece lists and
//! UI-relevant metadata, compute what changed and how the render surface
//! should reposition. I/O, event plumbing, and the wire protocol live in the
//! `weft-proto` and `weft-app` crates.
//!
//! # Components
//!
//! - [`Piece`]/[`PieceSequence`]: renderable units and their total order
//! - [`get_edit_sequence`]: merge-style diff producing splice edits
//! - [`TransitionFacts`]: boolean facts about a message-list transition
//! - [`UpdateStrategy`]: viewport repositioning policy
//! - [`build_piece_sequence`]: canonical piece layout for a message list

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod edit;
mod error;
mod flags;
mod layout;
mod narrow;
mod piece;
mod strategy;
mod transition;

pub use edit::{Edit, EditSequence, Renderer, apply_edit_sequence, get_edit_sequence};
pub use error::OrderError;
pub use flags::{FlagsState, READ_FLAG};
pub use layout::{MessageMeta, build_piece_sequence};
pub use narrow::Narrow;
pub use piece::{HeaderStyle, MessageId, Piece, PieceSequence, validate_order};
pub use strategy::UpdateStrategy;
pub use transition::TransitionFacts;
