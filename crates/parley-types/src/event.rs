//! Message event type.
//!
//! [`Message`] is the inbound chat message handed to the command
//! registry. The registry passes it through untouched; only matchers and
//! command actions look inside.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbound message received from a chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Channel / conversation identifier (e.g. a Slack channel ID).
    pub channel: String,

    /// Sender identifier within the channel.
    #[serde(alias = "userId")]
    pub user_id: String,

    /// Thread identifier when the message was posted inside a thread.
    #[serde(default, alias = "threadId")]
    pub thread_id: Option<String>,

    /// Message text content.
    pub text: String,

    /// When the message was received.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Arbitrary transport-specific metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Message {
    /// Create a top-level message stamped with the current time.
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            user_id: user_id.into(),
            thread_id: None,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Place the message inside a thread.
    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Key identifying the conversation: `"{channel}:{thread}"` inside a
    /// thread, `"{channel}:{user_id}"` otherwise.
    pub fn session_key(&self) -> String {
        match &self.thread_id {
            Some(thread) => format!("{}:{}", self.channel, thread),
            None => format!("{}:{}", self.channel, self.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_without_thread() {
        let msg = Message::new("C123", "U456", "ping");
        assert_eq!(msg.session_key(), "C123:U456");
    }

    #[test]
    fn session_key_with_thread() {
        let msg = Message::new("C123", "U456", "ping").with_thread("1700000000.000100");
        assert_eq!(msg.session_key(), "C123:1700000000.000100");
    }

    #[test]
    fn deserialize_minimal_camel_case() {
        let json = r#"{"channel": "C1", "userId": "U1", "text": "help"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.user_id, "U1");
        assert_eq!(msg.text, "help");
        assert!(msg.thread_id.is_none());
        assert!(msg.metadata.is_empty());
    }

    #[test]
    fn serde_preserves_metadata() {
        let mut msg = Message::new("C1", "U1", "reply hi");
        msg.metadata
            .insert("team".into(), serde_json::json!("T0001"));
        let json = serde_json::to_string(&msg).unwrap();
        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.text, "reply hi");
        assert_eq!(restored.metadata["team"], "T0001");
    }
}
