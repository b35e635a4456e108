use chrono::Utc;

use crate::common::types::LOCAL_SENDER;
use crate::common::{ChatMessage, NetworkEvent};

/// Whether the remote side is expected to be composing a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    Idle,
    Typing,
}

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub typing: TypingState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            typing: TypingState::Idle,
        }
    }

    /// Commit the current draft. Returns the text to emit, or `None` when
    /// the draft is empty after trimming; in that case nothing changes,
    /// the draft included.
    ///
    /// The appended message and the returned text keep the draft verbatim;
    /// trimming is only the emptiness check.
    pub fn submit(&mut self) -> Option<String> {
        if self.input_text.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input_text);
        self.messages.push(ChatMessage {
            sender: LOCAL_SENDER.to_string(),
            text: text.clone(),
            timestamp: Utc::now().timestamp(),
        });
        self.typing = TypingState::Typing;
        Some(text)
    }

    pub fn apply_event(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::MessageReceived(message) => {
                self.typing = TypingState::Idle;
                self.messages.push(message);
            }
            NetworkEvent::BotTyping => self.typing = TypingState::Typing,
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
