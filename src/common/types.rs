use serde::{Deserialize, Serialize};

/// Sender identifier for messages composed locally.
pub const LOCAL_SENDER: &str = "user";

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: i64,
}
