//! Wire protocol for the render-surface channel.
//!
//! The core and the render surface exchange JSON-serializable tagged unions
//! over an opaque FIFO text channel (a `postMessage` analog). Inbound events
//! (core → surface) carry content edits and indicator updates; outbound
//! events (surface → core) carry scroll telemetry and interaction intents.
//! Byte-level framing belongs to the hosting platform; this crate owns only
//! the JSON batch layer.
//!
//! # Components
//!
//! - [`InboundEvent`]: instructions to the render surface
//! - [`OutboundEvent`]: telemetry and intents from the render surface
//! - [`encode_batch`]/[`decode_outbound_batch`]: JSON array framing

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod errors;
mod inbound;
mod outbound;

pub use batch::{decode_outbound_batch, encode_batch};
pub use errors::{ProtocolError, Result};
pub use inbound::InboundEvent;
pub use outbound::{LongPressTarget, OutboundEvent};
