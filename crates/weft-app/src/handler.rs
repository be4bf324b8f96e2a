//! Outbound event handling: scroll-driven fetching and read-marking, plus
//! interaction routing.
//!
//! Pure state machine in the action pattern: consumes one [`OutboundEvent`]
//! against the current [`RenderProps`] and returns [`SyncAction`]s for the
//! runtime to execute. No I/O and no awaiting; fetches and read-marking are
//! fire-and-forget dispatches owned by external collaborators.

use weft_core::MessageId;
use weft_proto::OutboundEvent;

use crate::{action::SyncAction, props::RenderProps};

/// Default distance from either list edge, in logical pixels, at which a
/// history fetch is triggered.
pub const DEFAULT_FETCH_THRESHOLD_PX: f64 = 250.0;

/// Tunables for scroll handling.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Distance from either edge that triggers a history fetch.
    pub fetch_threshold_px: f64,
    /// Whether scrolling marks visible messages read. Off when the user has
    /// set the do-not-mark-as-read preference.
    pub mark_read_on_scroll: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { fetch_threshold_px: DEFAULT_FETCH_THRESHOLD_PX, mark_read_on_scroll: true }
    }
}

/// Handler for events reported by the render surface.
#[derive(Debug, Clone, Default)]
pub struct OutboundHandler {
    config: SurfaceConfig,
}

impl OutboundHandler {
    /// Create a handler with the given configuration.
    pub fn new(config: SurfaceConfig) -> Self {
        Self { config }
    }

    /// Process one outbound event against the current props.
    ///
    /// Unrecognized conditions degrade to logging; this must never take the
    /// event loop down.
    pub fn handle(&self, props: &RenderProps, event: &OutboundEvent) -> Vec<SyncAction> {
        match event {
            OutboundEvent::Ready => {
                // The channel consumes ready during the handshake; one
                // reaching the handler is late and carries no work.
                tracing::debug!("ready event outside handshake, ignoring");
                vec![]
            },
            OutboundEvent::Scroll {
                offset_height,
                inner_height,
                scroll_y,
                start_message_id,
                end_message_id,
            } => {
                let mut actions = self.fetch_actions(props, *offset_height, *inner_height, *scroll_y);
                if let Some(action) = self.mark_read_action(props, *start_message_id, *end_message_id)
                {
                    actions.push(action);
                }
                actions
            },
            OutboundEvent::Avatar { from_user_id } => {
                vec![SyncAction::ShowUserProfile { user_id: *from_user_id }]
            },
            OutboundEvent::NarrowChange { narrow } => {
                vec![SyncAction::SwitchNarrow { narrow: narrow.clone() }]
            },
            OutboundEvent::Image { src, message_id } => {
                vec![SyncAction::OpenLightbox { src: src.clone(), message_id: *message_id }]
            },
            OutboundEvent::Url { href, message_id } => {
                // Image links open in the lightbox like inline images do.
                if is_image_url(href) {
                    vec![SyncAction::OpenLightbox { src: href.clone(), message_id: *message_id }]
                } else {
                    vec![SyncAction::OpenUrl { href: href.clone(), message_id: *message_id }]
                }
            },
            OutboundEvent::LongPress { target, message_id, href } => {
                vec![SyncAction::ShowMessageMenu {
                    target: *target,
                    message_id: *message_id,
                    href: href.clone(),
                }]
            },
            OutboundEvent::Reaction { message_id, name, code, reaction_type, voted } => {
                vec![SyncAction::ToggleReaction {
                    message_id: *message_id,
                    name: name.clone(),
                    code: code.clone(),
                    reaction_type: reaction_type.clone(),
                    voted: *voted,
                }]
            },
            OutboundEvent::Debug => {
                tracing::debug!("surface debug event");
                vec![]
            },
            OutboundEvent::Warn { details } => {
                tracing::warn!(?details, "surface warning");
                vec![]
            },
            OutboundEvent::Error { details } => {
                tracing::error!(?details, "surface error");
                vec![]
            },
        }
    }

    /// Fetch requests for a scroll position. Both edges may trigger at once
    /// on a short list; deduplication is the fetch layer's problem.
    fn fetch_actions(
        &self,
        props: &RenderProps,
        offset_height: f64,
        inner_height: f64,
        scroll_y: f64,
    ) -> Vec<SyncAction> {
        let mut actions = Vec::new();
        if scroll_y < self.config.fetch_threshold_px {
            actions.push(SyncAction::FetchOlder { narrow: props.narrow.clone() });
        }
        if inner_height + scroll_y >= offset_height - self.config.fetch_threshold_px {
            actions.push(SyncAction::FetchNewer { narrow: props.narrow.clone() });
        }
        actions
    }

    /// Read-marking for the visible ID range.
    ///
    /// IDs the surface reports that are no longer in the model are simply
    /// skipped: the surface's document and our snapshot can transiently
    /// diverge across async round-trips, and that is not an error.
    fn mark_read_action(
        &self,
        props: &RenderProps,
        start_message_id: MessageId,
        end_message_id: MessageId,
    ) -> Option<SyncAction> {
        if !self.config.mark_read_on_scroll {
            return None;
        }
        let message_ids: Vec<MessageId> = props
            .message_ids()
            .into_iter()
            .filter(|id| (start_message_id..=end_message_id).contains(id))
            .filter(|id| !props.flags.is_read(*id))
            .collect();
        if message_ids.is_empty() {
            return None;
        }
        Some(SyncAction::MarkRead { message_ids })
    }
}

/// Whether a URL points at an image, judged by its path extension
/// (query string and fragment ignored).
fn is_image_url(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let lower = path.to_ascii_lowercase();
    [".png", ".jpg", ".jpeg", ".gif", ".webp", ".bmp"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use weft_core::{Narrow, Piece, PieceSequence};
    use weft_proto::LongPressTarget;

    use super::*;

    fn props_with(ids: &[u64], read: &[u64]) -> RenderProps {
        let pieces = PieceSequence::new(
            ids.iter()
                .map(|id| Piece::Message { id: *id, is_brief: false, content: format!("m{id}") })
                .collect(),
        )
        .unwrap();
        let mut props = RenderProps::empty(Narrow::Stream { name: "general".into() });
        props.pieces = pieces;
        props.flags.set("read", read.iter().copied());
        props
    }

    fn scroll(offset_height: f64, inner_height: f64, scroll_y: f64) -> OutboundEvent {
        OutboundEvent::Scroll {
            offset_height,
            inner_height,
            scroll_y,
            start_message_id: 0,
            end_message_id: 0,
        }
    }

    fn handler() -> OutboundHandler {
        OutboundHandler::new(SurfaceConfig { mark_read_on_scroll: false, ..SurfaceConfig::default() })
    }

    #[test]
    fn near_top_fetches_older_only() {
        let props = props_with(&[1, 2, 3], &[]);
        let actions = handler().handle(&props, &scroll(5000.0, 600.0, 100.0));
        assert_eq!(actions, vec![SyncAction::FetchOlder { narrow: props.narrow.clone() }]);
    }

    #[test]
    fn near_bottom_fetches_newer_only() {
        let props = props_with(&[1, 2, 3], &[]);
        // 600 + 4300 >= 5000 - 250
        let actions = handler().handle(&props, &scroll(5000.0, 600.0, 4300.0));
        assert_eq!(actions, vec![SyncAction::FetchNewer { narrow: props.narrow.clone() }]);
    }

    #[test]
    fn middle_of_list_fetches_nothing() {
        let props = props_with(&[1, 2, 3], &[]);
        let actions = handler().handle(&props, &scroll(5000.0, 600.0, 2000.0));
        assert!(actions.is_empty());
    }

    #[test]
    fn short_list_fetches_both_directions() {
        let props = props_with(&[1, 2, 3], &[]);
        let actions = handler().handle(&props, &scroll(700.0, 600.0, 0.0));
        assert_eq!(actions, vec![
            SyncAction::FetchOlder { narrow: props.narrow.clone() },
            SyncAction::FetchNewer { narrow: props.narrow.clone() },
        ]);
    }

    #[test]
    fn visible_unread_messages_are_marked_read() {
        let props = props_with(&[10, 11, 12, 13, 14], &[11]);
        let event = OutboundEvent::Scroll {
            offset_height: 5000.0,
            inner_height: 600.0,
            scroll_y: 2000.0,
            start_message_id: 11,
            end_message_id: 13,
        };
        let actions = OutboundHandler::default().handle(&props, &event);
        assert_eq!(actions, vec![SyncAction::MarkRead { message_ids: vec![12, 13] }]);
    }

    #[test]
    fn mark_read_skips_ids_missing_from_the_model() {
        // Surface still shows messages 20..30; model has moved on. Clamp,
        // don't crash.
        let props = props_with(&[25, 26], &[]);
        let event = OutboundEvent::Scroll {
            offset_height: 5000.0,
            inner_height: 600.0,
            scroll_y: 2000.0,
            start_message_id: 20,
            end_message_id: 30,
        };
        let actions = OutboundHandler::default().handle(&props, &event);
        assert_eq!(actions, vec![SyncAction::MarkRead { message_ids: vec![25, 26] }]);
    }

    #[test]
    fn do_not_mark_read_preference_suppresses_marking() {
        let props = props_with(&[10, 11], &[]);
        let event = OutboundEvent::Scroll {
            offset_height: 5000.0,
            inner_height: 600.0,
            scroll_y: 2000.0,
            start_message_id: 10,
            end_message_id: 11,
        };
        let actions = handler().handle(&props, &event);
        assert!(actions.is_empty());
    }

    #[test]
    fn image_url_opens_lightbox() {
        let props = props_with(&[1], &[]);
        let event = OutboundEvent::Url { href: "https://x.example/a.png?dl=1".into(), message_id: 1 };
        let actions = OutboundHandler::default().handle(&props, &event);
        assert_eq!(actions, vec![SyncAction::OpenLightbox {
            src: "https://x.example/a.png?dl=1".into(),
            message_id: 1,
        }]);
    }

    #[test]
    fn plain_url_opens_as_link() {
        let props = props_with(&[1], &[]);
        let event = OutboundEvent::Url { href: "https://x.example/doc".into(), message_id: 1 };
        let actions = OutboundHandler::default().handle(&props, &event);
        assert_eq!(actions, vec![SyncAction::OpenUrl {
            href: "https://x.example/doc".into(),
            message_id: 1,
        }]);
    }

    #[test]
    fn interaction_events_route_to_actions() {
        let props = props_with(&[1], &[]);
        let handler = OutboundHandler::default();

        let actions = handler.handle(&props, &OutboundEvent::Avatar { from_user_id: 7 });
        assert_eq!(actions, vec![SyncAction::ShowUserProfile { user_id: 7 }]);

        let actions = handler.handle(&props, &OutboundEvent::LongPress {
            target: LongPressTarget::Header,
            message_id: 1,
            href: None,
        });
        assert!(matches!(actions.as_slice(), [SyncAction::ShowMessageMenu { .. }]));

        let actions = handler.handle(&props, &OutboundEvent::Reaction {
            message_id: 1,
            name: "smile".into(),
            code: "1f604".into(),
            reaction_type: "unicode_emoji".into(),
            voted: true,
        });
        assert!(matches!(actions.as_slice(), [SyncAction::ToggleReaction { voted: true, .. }]));
    }

    #[test]
    fn diagnostics_produce_no_actions() {
        let props = props_with(&[1], &[]);
        let handler = OutboundHandler::default();
        assert!(handler.handle(&props, &OutboundEvent::Debug).is_empty());
        assert!(
            handler
                .handle(&props, &OutboundEvent::Warn { details: serde_json::json!({"w": 1}) })
                .is_empty()
        );
    }
}
