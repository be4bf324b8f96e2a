//! Batch framing for the render-surface channel.
//!
//! Each prop update produces one ordered batch of inbound events, shipped as
//! a single JSON array so the surface applies them atomically and in order.
//! Outbound batches decode per element: one unrecognized event must not
//! poison the rest of the batch.

use serde_json::Value;

use crate::{
    errors::Result,
    inbound::InboundEvent,
    outbound::OutboundEvent,
};

/// Encode an ordered batch of inbound events as a JSON array.
pub fn encode_batch(events: &[InboundEvent]) -> Result<String> {
    Ok(serde_json::to_string(events)?)
}

/// Decode an outbound batch, element by element.
///
/// The outer array must parse; each element decodes independently so that an
/// unknown or malformed event surfaces as its own error alongside the
/// successfully decoded neighbors.
///
/// # Errors
///
/// [`ProtocolError::MalformedBatch`] when the payload is not a JSON array.
pub fn decode_outbound_batch(payload: &str) -> Result<Vec<Result<OutboundEvent>>> {
    let values: Vec<Value> = serde_json::from_str(payload)?;
    Ok(values.into_iter().map(OutboundEvent::from_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProtocolError;

    #[test]
    fn inbound_batch_round_trips() {
        let batch = vec![
            InboundEvent::Read { message_ids: vec![1, 3] },
            InboundEvent::Typing { content: String::new() },
        ];
        let json = encode_batch(&batch).unwrap();
        let back: Vec<InboundEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, batch);
    }

    #[test]
    fn one_unknown_event_does_not_poison_the_batch() {
        let payload = r#"[
            { "type": "ready" },
            { "type": "hologram", "x": 1 },
            { "type": "avatar", "fromUserId": 7 }
        ]"#;
        let events = decode_outbound_batch(payload).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Ok(OutboundEvent::Ready)));
        assert!(matches!(&events[1], Err(ProtocolError::UnknownEvent { kind }) if kind == "hologram"));
        assert!(matches!(events[2], Ok(OutboundEvent::Avatar { from_user_id: 7 })));
    }

    #[test]
    fn non_array_payload_is_malformed() {
        assert!(matches!(
            decode_outbound_batch(r#"{"type":"ready"}"#),
            Err(ProtocolError::MalformedBatch(_))
        ));
    }
}
