//! Transcript data model
//!
//! The transcript is the ordered, append-only history of a session. The
//! whole of it is sent to the chat service on every turn, so insertion
//! order is part of the request.

use crate::error::{BubbleChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard
    User,
    /// Returned by the chat service
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transcript entry
///
/// Content is never empty. It is otherwise stored exactly as given: user
/// input is trimmed by the session before it gets here, assistant replies
/// are kept as the service returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    content: String,
    role: Role,
}

impl Message {
    /// Creates a message, rejecting empty content
    ///
    /// # Errors
    ///
    /// Returns `BubbleChatError::EmptyMessage` when `content` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use bubblechat::session::{Message, Role};
    ///
    /// let msg = Message::new(Role::User, "Hello").unwrap();
    /// assert_eq!(msg.content(), "Hello");
    /// assert!(Message::new(Role::User, "").is_err());
    /// ```
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        if content.is_empty() {
            return Err(BubbleChatError::EmptyMessage.into());
        }
        Ok(Self { content, role })
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Result<Self> {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message
    pub fn assistant(content: impl Into<String>) -> Result<Self> {
        Self::new(Role::Assistant, content)
    }

    /// Message text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Message author
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Ordered, append-only conversation history
///
/// Entries cannot be removed or edited once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates messages in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Most recent message, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Pretty-printed JSON array of `{content, role}` objects
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BubbleChatError::from(e).into())
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_rejects_empty_content() {
        let err = Message::user("").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BubbleChatError>(),
            Some(BubbleChatError::EmptyMessage)
        ));
        assert!(Message::assistant("").is_err());
    }

    #[test]
    fn test_message_keeps_whitespace_only_content() {
        let msg = Message::assistant(" \n\t").unwrap();
        assert_eq!(msg.content(), " \n\t");
    }

    #[test]
    fn test_message_keeps_content_verbatim() {
        let msg = Message::assistant("  padded reply ").unwrap();
        assert_eq!(msg.content(), "  padded reply ");
        assert_eq!(msg.role(), Role::Assistant);
    }

    #[test]
    fn test_message_serializes_content_and_role() {
        let msg = Message::user("Hello").unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"content": "Hello", "role": "user"}));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Message::user("Hello").unwrap());
        transcript.push(Message::assistant("Hi there").unwrap());
        transcript.push(Message::user("How are you?").unwrap());

        assert_eq!(transcript.len(), 3);
        let contents: Vec<&str> = transcript.iter().map(Message::content).collect();
        assert_eq!(contents, vec!["Hello", "Hi there", "How are you?"]);
        assert_eq!(transcript.last().unwrap().content(), "How are you?");
    }

    #[test]
    fn test_transcript_borrowed_iteration() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Hello").unwrap());
        transcript.push(Message::assistant("Hi there").unwrap());

        let mut roles = Vec::new();
        for message in &transcript {
            roles.push(message.role());
        }
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[test]
    fn test_transcript_to_json() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("test").unwrap());

        let value: serde_json::Value = serde_json::from_str(&transcript.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"content": "test", "role": "user"}])
        );
    }

    #[test]
    fn test_empty_transcript_to_json() {
        assert_eq!(Transcript::new().to_json().unwrap(), "[]");
    }
}
