//! Application layer of the message-list synchronization engine.
//!
//! Composes the pure core ([`weft_core`]) and the wire protocol
//! ([`weft_proto`]) into the state machines a hosting runtime drives:
//!
//! - [`generate_inbound_events`] diffs prop snapshots into inbound batches
//! - [`OutboundHandler`] turns surface telemetry into [`SyncAction`]s
//! - [`SurfaceChannel`] sequences the ready handshake and event buffering
//! - [`SurfaceBridge`] wires the three together behind one API
//!
//! Everything here is synchronous and transport-free; the runtime owns the
//! actual channel to the render surface and the execution of actions.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod channel;
mod generate;
mod handler;
mod props;

pub use action::SyncAction;
pub use bridge::{BridgeOutput, SurfaceBridge};
pub use channel::{ChannelOutcome, ChannelState, SurfaceChannel};
pub use generate::{SurfaceRenderer, generate_inbound_events, initial_content};
pub use handler::{DEFAULT_FETCH_THRESHOLD_PX, OutboundHandler, SurfaceConfig};
pub use props::{Fetching, RenderProps, TypingUser};
