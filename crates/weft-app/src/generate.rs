//! Inbound event generation.
//!
//! Compares the previous and next [`RenderProps`] snapshots and produces the
//! ordered batch of [`InboundEvent`]s the render surface needs, skipping
//! anything that did not change. Emission order is part of the contract:
//! content first, then read, then fetching, then typing; the surface applies
//! batches in array order.

use weft_core::{OrderError, Renderer, TransitionFacts, UpdateStrategy, get_edit_sequence};
use weft_proto::InboundEvent;

use crate::props::{RenderProps, TypingUser};

/// Renders pieces and the typing indicator for the surface.
///
/// Extends the core piece renderer with the typing indicator, which has no
/// piece of its own. Implementations close over whatever background data
/// (theme, subscriptions, user directory) their output format needs.
pub trait SurfaceRenderer: Renderer {
    /// Render the typing indicator for a non-empty set of users.
    fn render_typing(&self, users: &[TypingUser]) -> String;
}

/// Compute the inbound event batch for a prop transition.
///
/// Rules are evaluated independently; several events may be emitted for one
/// transition, in the fixed order described in the module docs.
///
/// # Errors
///
/// Returns [`OrderError`] if either snapshot's piece sequence violates the
/// ordering invariant (an upstream bug; not recoverable here).
pub fn generate_inbound_events<R: SurfaceRenderer>(
    prev: &RenderProps,
    next: &RenderProps,
    renderer: &R,
) -> Result<Vec<InboundEvent>, OrderError> {
    let mut events = Vec::new();

    if prev.pieces != next.pieces || !next.flags.equal_excluding_read(&prev.flags) {
        let edits = get_edit_sequence(
            prev.pieces.as_slice(),
            next.pieces.as_slice(),
            &prev.flags,
            &next.flags,
            renderer,
        )?;
        let facts = TransitionFacts::classify(
            &prev.narrow,
            &prev.message_ids(),
            &next.narrow,
            &next.message_ids(),
        );
        let strategy = UpdateStrategy::select(&facts);
        // An outstanding initial-scroll request only takes effect on a
        // genuine content change; a pure flag repaint must not move the
        // viewport to it.
        let scroll_message_id =
            if edits.is_empty() { None } else { next.initial_scroll_message_id };
        events.push(InboundEvent::EditSequence { edits, strategy, scroll_message_id });
    }

    let newly_read = next.flags.newly_read(&prev.flags);
    if !newly_read.is_empty() {
        events.push(InboundEvent::Read { message_ids: newly_read });
    }

    if prev.fetching != next.fetching || prev.show_placeholders != next.show_placeholders {
        events.push(InboundEvent::Fetching {
            show_placeholders: next.show_placeholders,
            // Spinners are pointless while placeholders cover the list.
            older: next.fetching.older && !next.show_placeholders,
            newer: next.fetching.newer && !next.show_placeholders,
        });
    }

    if prev.typing_users != next.typing_users {
        let content = if next.typing_users.is_empty() {
            String::new()
        } else {
            renderer.render_typing(&next.typing_users)
        };
        events.push(InboundEvent::Typing { content });
    }

    Ok(events)
}

/// Build the full-content event that populates a freshly-created surface.
///
/// The transition is classified against the empty snapshot, so a non-empty
/// list anchors the viewport ([`UpdateStrategy::ScrollToAnchor`]) and an
/// empty one replaces outright.
pub fn initial_content<R: SurfaceRenderer>(props: &RenderProps, renderer: &R) -> InboundEvent {
    let facts =
        TransitionFacts::classify(&props.narrow, &[], &props.narrow, &props.message_ids());
    let content: String = props.pieces.iter().map(|piece| renderer.render(piece)).collect();
    InboundEvent::Content {
        scroll_message_id: props.initial_scroll_message_id,
        content,
        strategy: UpdateStrategy::select(&facts),
    }
}
