//! Fuzz target for the edit-sequence differ
//!
//! # Strategy
//!
//! - Generate two arbitrary piece snapshots (times, headers, messages) and
//!   arbitrary flag sets, normalized into valid ascending order
//! - Diff old against new, then replay the edits over the rendered old list
//!
//! # Invariants
//!
//! - Diffing ordered snapshots never fails and never panics
//! - Applying the edit sequence to the rendered old list reproduces the
//!   rendered new list exactly
//! - Equal snapshots with flag changes confined to `read` produce no edits

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use weft_core::{
    FlagsState, HeaderStyle, Piece, apply_edit_sequence, get_edit_sequence,
};

#[derive(Debug, Clone, Arbitrary)]
struct Snapshot {
    entries: Vec<Entry>,
    starred: Vec<u16>,
    read: Vec<u16>,
}

#[derive(Debug, Clone, Arbitrary)]
struct Entry {
    id: u16,
    kind: Kind,
    content: u8,
}

#[derive(Debug, Clone, Arbitrary)]
enum Kind {
    Time,
    Header,
    Message,
}

fn build_pieces(entries: &[Entry]) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = entries
        .iter()
        .map(|entry| {
            let id = u64::from(entry.id);
            match entry.kind {
                Kind::Time => Piece::Time { message_id: id, timestamp: u64::from(entry.content) },
                Kind::Header => Piece::Header { message_id: id, style: HeaderStyle::Full },
                Kind::Message => Piece::Message {
                    id,
                    is_brief: entry.content % 2 == 0,
                    content: format!("c{}", entry.content),
                },
            }
        })
        .collect();
    pieces.sort_by_key(Piece::sort_key);
    pieces.dedup_by_key(|piece| piece.sort_key());
    pieces
}

fn build_flags(starred: &[u16], read: &[u16]) -> FlagsState {
    let mut flags = FlagsState::new();
    flags.set("starred", starred.iter().map(|id| u64::from(*id)));
    flags.set("read", read.iter().map(|id| u64::from(*id)));
    flags
}

fn render(piece: &Piece) -> String {
    match piece {
        Piece::Time { message_id, timestamp } => format!("t:{message_id}:{timestamp}"),
        Piece::Header { message_id, style } => format!("h:{message_id}:{style:?}"),
        Piece::Message { id, is_brief, content } => format!("m:{id}:{is_brief}:{content}"),
    }
}

fuzz_target!(|input: (Snapshot, Snapshot)| {
    let (old, new) = input;

    let old_pieces = build_pieces(&old.entries);
    let new_pieces = build_pieces(&new.entries);
    let old_flags = build_flags(&old.starred, &old.read);
    let new_flags = build_flags(&new.starred, &new.read);

    let edits = get_edit_sequence(&old_pieces, &new_pieces, &old_flags, &new_flags, &render)
        .unwrap_or_else(|err| panic!("ordered snapshots must diff cleanly: {err}"));

    let old_rendered: Vec<String> = old_pieces.iter().map(render).collect();
    let new_rendered: Vec<String> = new_pieces.iter().map(render).collect();
    assert_eq!(apply_edit_sequence(&old_rendered, &edits), new_rendered);

    // Same pieces, same non-read flags: a read change alone is not a redraw.
    let mut read_only = old_flags.clone();
    read_only.set("read", new.read.iter().map(|id| u64::from(*id)));
    let quiet = get_edit_sequence(&old_pieces, &old_pieces, &old_flags, &read_only, &render)
        .unwrap_or_else(|err| panic!("ordered snapshots must diff cleanly: {err}"));
    assert!(quiet.is_empty());
});
