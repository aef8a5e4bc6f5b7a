//! Chat messages sent to the language model.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One turn of a chat-completion conversation.
///
/// # Examples
///
/// ```
/// use storyloom_core::{Message, Role};
///
/// let message = Message::user("Theme: rainy_day");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Theme: rainy_day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Author of the turn
    pub role: Role,
    /// Plain text body
    pub content: String,
}

impl Message {
    /// A system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
