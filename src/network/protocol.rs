//! Wire codec for the named-event frames the chat backend speaks.
//!
//! Every frame is one JSON text message: `{"event": <name>, "data": {...}}`.
//! Exactly three event names are part of the contract.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::common::{ChatMessage, NetworkEvent};

pub const SEND_MESSAGE: &str = "send_message";
pub const RECEIVE_MESSAGE: &str = "receive_message";
pub const BOT_TYPING: &str = "bot_typing";

#[derive(Debug, Serialize)]
struct OutboundFrame<'a> {
    event: &'a str,
    data: OutboundPayload<'a>,
}

#[derive(Debug, Serialize)]
struct OutboundPayload<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    data: InboundPayload,
}

// Missing fields decode to empty strings and are rendered as-is; the
// backend payload is not validated.
#[derive(Debug, Default, Deserialize)]
struct InboundPayload {
    #[serde(default)]
    message: String,
    #[serde(default)]
    sender: String,
}

pub fn encode_send_message(text: &str) -> serde_json::Result<String> {
    serde_json::to_string(&OutboundFrame {
        event: SEND_MESSAGE,
        data: OutboundPayload { message: text },
    })
}

/// Decode one inbound text frame. Frames that are not JSON or carry an
/// event name outside the contract yield `None`.
pub fn decode_event(text: &str) -> Option<NetworkEvent> {
    let frame: InboundFrame = serde_json::from_str(text).ok()?;
    match frame.event.as_str() {
        RECEIVE_MESSAGE => Some(NetworkEvent::MessageReceived(ChatMessage {
            sender: frame.data.sender,
            text: frame.data.message,
            timestamp: Utc::now().timestamp(),
        })),
        BOT_TYPING => Some(NetworkEvent::BotTyping),
        _ => None,
    }
}

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;
