//! Surface bridge: composition of generator, channel, and handler.
//!
//! The bridge is the driver-facing API of the engine. It owns the previous
//! prop snapshot, the channel lifecycle, and the outbound handler, and
//! translates between the two directions of the surface channel:
//! prop updates flow in as inbound event batches, surface telemetry flows
//! out as [`SyncAction`]s for the runtime to execute.
//!
//! All methods are synchronous; the core never suspends. Transmission of
//! the returned inbound events (and execution of the returned actions) is
//! the hosting runtime's job.

use weft_core::OrderError;
use weft_proto::{InboundEvent, ProtocolError, decode_outbound_batch};

use crate::{
    action::SyncAction,
    channel::{ChannelOutcome, ChannelState, SurfaceChannel},
    generate::{SurfaceRenderer, generate_inbound_events, initial_content},
    handler::{OutboundHandler, SurfaceConfig},
    props::RenderProps,
};

/// Result of processing one payload from the render surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BridgeOutput {
    /// Inbound events to transmit to the surface now (handshake flushes).
    pub transmit: Vec<InboundEvent>,
    /// Actions for the runtime to execute.
    pub actions: Vec<SyncAction>,
}

/// Driver-facing composition of the synchronization engine.
pub struct SurfaceBridge<R> {
    props: RenderProps,
    channel: SurfaceChannel,
    handler: OutboundHandler,
    renderer: R,
}

impl<R: SurfaceRenderer> SurfaceBridge<R> {
    /// Create a bridge over the initial prop snapshot.
    pub fn new(props: RenderProps, config: SurfaceConfig, renderer: R) -> Self {
        Self {
            props,
            channel: SurfaceChannel::new(),
            handler: OutboundHandler::new(config),
            renderer,
        }
    }

    /// Current prop snapshot (the "previous props" of the next comparison).
    pub fn props(&self) -> &RenderProps {
        &self.props
    }

    /// Current channel lifecycle state.
    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    /// The render surface was created (or recreated). Starts the handshake
    /// and queues the initial full-content event behind it; returns what to
    /// transmit now.
    ///
    /// Events buffered before a teardown are never cancelled, so on
    /// recreation they flush ahead of the fresh content event. Any content
    /// they carry is superseded by it; the surface applies the batch in
    /// order and lands on the current snapshot.
    pub fn surface_created(&mut self) -> Vec<InboundEvent> {
        let mut transmit = self.channel.attach();
        let content = initial_content(&self.props, &self.renderer);
        transmit.extend(self.channel.queue(vec![content]));
        transmit
    }

    /// The render surface was torn down.
    pub fn surface_destroyed(&mut self) {
        self.channel.detach();
    }

    /// Upstream state changed. Diffs against the held snapshot, replaces it,
    /// and returns the inbound events to transmit now (events queue while
    /// the surface is not ready).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the new snapshot's piece sequence is
    /// unordered; the held snapshot is left unchanged in that case.
    pub fn props_changed(&mut self, next: RenderProps) -> Result<Vec<InboundEvent>, OrderError> {
        let events = generate_inbound_events(&self.props, &next, &self.renderer)?;
        self.props = next;
        Ok(self.channel.queue(events))
    }

    /// Process one raw payload received from the render surface.
    ///
    /// Decodes the batch and routes each event: `ready` drives the channel
    /// handshake (possibly flushing buffered events for transmission),
    /// everything else goes to the outbound handler against the current
    /// props. Undecodable events are logged and dropped; they never stop the
    /// rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedBatch`] only when the payload
    /// itself is not a JSON array.
    pub fn surface_payload(&mut self, payload: &str) -> Result<BridgeOutput, ProtocolError> {
        let mut output = BridgeOutput::default();
        for decoded in decode_outbound_batch(payload)? {
            match decoded {
                Ok(event) => match self.channel.receive(event) {
                    ChannelOutcome::Flush(buffered) => output.transmit.extend(buffered),
                    ChannelOutcome::Deliver(event) => {
                        output.actions.extend(self.handler.handle(&self.props, &event));
                    },
                    ChannelOutcome::Dropped => {},
                },
                Err(err) => {
                    tracing::error!(%err, "dropping undecodable outbound event");
                },
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use weft_core::{Narrow, Piece, PieceSequence, Renderer, UpdateStrategy};

    use super::*;
    use crate::props::TypingUser;

    struct TestRenderer;

    impl Renderer for TestRenderer {
        fn render(&self, piece: &Piece) -> String {
            match piece {
                Piece::Time { message_id, .. } => format!("time:{message_id}"),
                Piece::Header { message_id, .. } => format!("header:{message_id}"),
                Piece::Message { id, content, .. } => format!("msg:{id}:{content}"),
            }
        }
    }

    impl SurfaceRenderer for TestRenderer {
        fn render_typing(&self, users: &[TypingUser]) -> String {
            format!("typing:{}", users.len())
        }
    }

    fn props_with(ids: &[u64]) -> RenderProps {
        let pieces = PieceSequence::new(
            ids.iter()
                .map(|id| Piece::Message { id: *id, is_brief: false, content: format!("m{id}") })
                .collect(),
        )
        .unwrap();
        let mut props = RenderProps::empty(Narrow::Stream { name: "general".into() });
        props.pieces = pieces;
        props
    }

    fn bridge(ids: &[u64]) -> SurfaceBridge<TestRenderer> {
        SurfaceBridge::new(props_with(ids), SurfaceConfig::default(), TestRenderer)
    }

    #[test]
    fn creation_handshake_then_ready_flushes_initial_content() {
        let mut bridge = bridge(&[1, 2]);

        let transmit = bridge.surface_created();
        assert_eq!(transmit, vec![InboundEvent::Ready]);
        assert_eq!(bridge.channel_state(), ChannelState::AwaitingReady);

        let output = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();
        assert!(output.actions.is_empty());
        assert!(matches!(output.transmit.as_slice(), [InboundEvent::Content { .. }]));
        assert_eq!(bridge.channel_state(), ChannelState::Ready);
    }

    #[test]
    fn props_change_before_ready_buffers_and_flushes_later() {
        let mut bridge = bridge(&[1, 2]);
        let _ = bridge.surface_created();

        let transmit = bridge.props_changed(props_with(&[1, 2, 3])).unwrap();
        assert!(transmit.is_empty());

        let output = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();
        assert_eq!(output.transmit.len(), 2);
        assert!(matches!(output.transmit[0], InboundEvent::Content { .. }));
        assert!(matches!(
            &output.transmit[1],
            InboundEvent::EditSequence { strategy: UpdateStrategy::ScrollToBottomIfNearBottom, .. }
        ));
    }

    #[test]
    fn props_change_after_ready_transmits_immediately() {
        let mut bridge = bridge(&[1, 2]);
        let _ = bridge.surface_created();
        let _ = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();

        let transmit = bridge.props_changed(props_with(&[1, 2, 3])).unwrap();
        assert!(matches!(transmit.as_slice(), [InboundEvent::EditSequence { .. }]));
    }

    #[test]
    fn scroll_payload_produces_actions_against_current_props() {
        let mut bridge = bridge(&[10, 11, 12]);
        let _ = bridge.surface_created();
        let _ = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();

        let payload = r#"[{
            "type": "scroll",
            "offsetHeight": 5000.0, "innerHeight": 600.0, "scrollY": 100.0,
            "startMessageId": 10, "endMessageId": 12
        }]"#;
        let output = bridge.surface_payload(payload).unwrap();
        assert_eq!(output.actions, vec![
            SyncAction::FetchOlder { narrow: bridge.props().narrow.clone() },
            SyncAction::MarkRead { message_ids: vec![10, 11, 12] },
        ]);
    }

    #[test]
    fn unknown_events_are_dropped_without_poisoning_the_batch() {
        let mut bridge = bridge(&[1]);
        let _ = bridge.surface_created();
        let _ = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();

        let payload = r#"[
            {"type": "hologram"},
            {"type": "avatar", "fromUserId": 3}
        ]"#;
        let output = bridge.surface_payload(payload).unwrap();
        assert_eq!(output.actions, vec![SyncAction::ShowUserProfile { user_id: 3 }]);
    }

    #[test]
    fn malformed_batch_is_an_error() {
        let mut bridge = bridge(&[1]);
        assert!(bridge.surface_payload("not json").is_err());
    }

    #[test]
    fn recreation_resets_handshake_but_not_queued_events() {
        let mut bridge = bridge(&[1]);
        let _ = bridge.surface_created();
        let _ = bridge.props_changed(props_with(&[1, 2])).unwrap();

        bridge.surface_destroyed();
        let transmit = bridge.surface_created();
        assert_eq!(transmit, vec![InboundEvent::Ready]);

        // The old queue flushes first; the fresh content event comes last
        // and supersedes whatever the stale events would have drawn.
        let output = bridge.surface_payload(r#"[{"type":"ready"}]"#).unwrap();
        assert_eq!(output.transmit.len(), 3);
        assert!(matches!(output.transmit[0], InboundEvent::Content { .. }));
        assert!(matches!(output.transmit[1], InboundEvent::EditSequence { .. }));
        assert!(matches!(
            &output.transmit[2],
            InboundEvent::Content { content, .. } if content.contains("msg:2")
        ));
    }
}
