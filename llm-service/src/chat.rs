//! Role-tagged chat messages shared by both provider backends.

use serde::{Deserialize, Serialize};

/// Role of a single message in a chat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructional message that steers the model.
    System,
    /// Message authored by the caller.
    User,
    /// Message authored by the model.
    Assistant,
}

/// One role-tagged message. Serializes to the `{role, content}` shape both
/// the OpenAI chat API and Ollama `/api/chat` accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Builds a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Builds an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");

        let user = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(user["role"], "user");
        let asst = serde_json::to_value(ChatMessage::assistant("hello")).unwrap();
        assert_eq!(asst["role"], "assistant");
    }

    #[test]
    fn roundtrip_through_json() {
        let msg = ChatMessage::assistant("42");
        let back: ChatMessage =
            serde_json::from_str(&serde_json::to_string(&msg).unwrap()).unwrap();
        assert_eq!(back, msg);
    }
}
