//! Conversation Messages
//!
//! The caller owns the history: every chat request carries the full ordered
//! list of messages and nothing is kept between requests.

use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// Role of a message sender
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Visitor input
    User,
    /// Model response
    Assistant,
}

impl Role {
    /// Speaker label used in flattened transcripts
    pub const fn speaker(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// `User: ...` / `Assistant: ...`
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.speaker(), self.content)
    }
}

/// Client-supplied conversation history
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Split into the prior history and the message being answered.
    ///
    /// Fails on an empty conversation, since there is nothing to answer.
    pub fn split_latest(&self) -> Result<(&[Message], &Message)> {
        self.messages
            .split_last()
            .map(|(latest, history)| (history, latest))
            .ok_or_else(|| AssistantError::InvalidRequest("conversation has no messages".into()))
    }

    /// Flatten every message except the latest into one line per message.
    pub fn transcript(&self) -> String {
        let history = self
            .messages
            .split_last()
            .map_or(&[][..], |(_, history)| history);

        history
            .iter()
            .map(Message::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Conversation {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("question {i}"))
                } else {
                    Message::assistant(format!("answer {i}"))
                }
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_transcript_excludes_latest_message() {
        for n in 1..8 {
            let conv = sample(n);
            let transcript = conv.transcript();
            let lines: Vec<&str> = if transcript.is_empty() {
                Vec::new()
            } else {
                transcript.lines().collect()
            };

            assert_eq!(lines.len(), n - 1);
            for (line, msg) in lines.iter().zip(conv.messages()) {
                assert_eq!(*line, msg.transcript_line());
            }
            assert!(!transcript.contains(&conv.last().unwrap().content));
        }
    }

    #[test]
    fn test_transcript_speaker_labels() {
        let conv: Conversation = vec![
            Message::user("What is 2+2?"),
            Message::assistant("4"),
            Message::user("And 3+3?"),
        ]
        .into();

        assert_eq!(conv.transcript(), "User: What is 2+2?\nAssistant: 4");
    }

    #[test]
    fn test_split_latest() {
        let conv = sample(3);
        let (history, latest) = conv.split_latest().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(latest.content, "question 2");

        assert!(Conversation::new().split_latest().is_err());
    }

    #[test]
    fn test_deserialize_from_array() {
        let conv: Conversation = serde_json::from_str(
            r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#,
        )
        .unwrap();
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages()[1].role, Role::Assistant);

        let bad = serde_json::from_str::<Conversation>(r#"[{"role":"system","content":"x"}]"#);
        assert!(bad.is_err());
    }
}
