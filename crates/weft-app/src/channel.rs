//! Surface channel state machine.
//!
//! The render surface lives on the far side of an asynchronous FIFO message
//! channel and takes time to boot; events generated before it signals
//! readiness must be buffered, then flushed in original order. This module
//! makes that lifecycle an explicit state machine instead of ad hoc boolean
//! flags.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐  attach   ┌───────────────┐  outbound ready  ┌───────┐
//! │ Uninitialized │──────────>│ AwaitingReady │─────────────────>│ Ready │
//! └───────────────┘           └───────────────┘                  └───────┘
//!         ^                           │ detach                       │ detach
//!         └───────────────────────────┴───────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! - Queued events are never cancelled: everything buffered before the ready
//!   handshake is flushed once it completes, in queue order.
//! - Non-ready outbound events arriving before `Ready` are dropped (logged),
//!   never delivered out of lifecycle order.

use weft_proto::{InboundEvent, OutboundEvent};

/// Lifecycle state of the render-surface channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No surface attached.
    #[default]
    Uninitialized,
    /// Surface created, handshake sent, waiting for its `ready`.
    AwaitingReady,
    /// Handshake complete; events flow without buffering.
    Ready,
}

/// What to do with one received outbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelOutcome {
    /// Handshake completed: transmit these buffered inbound events, in order.
    Flush(Vec<InboundEvent>),
    /// Deliver this event to the outbound handler.
    Deliver(OutboundEvent),
    /// The event was consumed or dropped by the channel itself.
    Dropped,
}

/// State machine for the bidirectional surface channel.
///
/// Pure: owns no transport. The caller transmits whatever the methods
/// return.
#[derive(Debug, Clone, Default)]
pub struct SurfaceChannel {
    state: ChannelState,
    buffer: Vec<InboundEvent>,
}

impl SurfaceChannel {
    /// Channel with no surface attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// A surface was (re)created. Begins the handshake; returns the probe
    /// event to transmit.
    pub fn attach(&mut self) -> Vec<InboundEvent> {
        tracing::debug!(state = ?self.state, "surface attached, starting handshake");
        self.state = ChannelState::AwaitingReady;
        vec![InboundEvent::Ready]
    }

    /// The surface was torn down. Resets the lifecycle; buffered events
    /// survive and flush on the next handshake.
    pub fn detach(&mut self) {
        tracing::debug!(buffered = self.buffer.len(), "surface detached");
        self.state = ChannelState::Uninitialized;
    }

    /// Submit inbound events for transmission. Returns the events to send
    /// now (all of them when ready, none while the surface is not).
    pub fn queue(&mut self, events: Vec<InboundEvent>) -> Vec<InboundEvent> {
        match self.state {
            ChannelState::Ready => events,
            ChannelState::Uninitialized | ChannelState::AwaitingReady => {
                self.buffer.extend(events);
                Vec::new()
            },
        }
    }

    /// Process one outbound event from the surface.
    pub fn receive(&mut self, event: OutboundEvent) -> ChannelOutcome {
        match (self.state, event) {
            (ChannelState::AwaitingReady, OutboundEvent::Ready) => {
                tracing::debug!(buffered = self.buffer.len(), "surface ready, flushing");
                self.state = ChannelState::Ready;
                ChannelOutcome::Flush(std::mem::take(&mut self.buffer))
            },
            (ChannelState::AwaitingReady | ChannelState::Uninitialized, event) => {
                // The surface spoke before completing the handshake (or
                // before existing at all); its document state is unknown, so
                // the event cannot be acted on.
                tracing::warn!(state = ?self.state, ?event, "outbound event before ready, dropping");
                ChannelOutcome::Dropped
            },
            (ChannelState::Ready, OutboundEvent::Ready) => {
                tracing::debug!("duplicate ready after handshake, ignoring");
                ChannelOutcome::Dropped
            },
            (ChannelState::Ready, event) => ChannelOutcome::Deliver(event),
        }
    }
}
