//! Conversation-history windowing.

use cicerone_domain::chat::{Message, MessageContent, Role};
use cicerone_domain::tour::ConversationTurn;

/// Keep only the most recent `max_turns` turns, order preserved.
///
/// Role values are normalized to exactly {user, assistant}: anything that
/// is not literally `"assistant"` becomes a user turn, so malformed roles
/// from the front-end cannot corrupt the upstream protocol.
pub fn window(history: &[ConversationTurn], max_turns: usize) -> Vec<Message> {
    let start = history.len().saturating_sub(max_turns);
    history[start..]
        .iter()
        .map(|turn| Message {
            role: if turn.role == "assistant" {
                Role::Assistant
            } else {
                Role::User
            },
            content: MessageContent::Text(turn.content.clone()),
        })
        .collect()
}
