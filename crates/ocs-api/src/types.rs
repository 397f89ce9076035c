//! Request and response bodies.
//!
//! Only the fields callers rely on are typed; everything else the service
//! sends is kept in `extra` so nothing is lost when results are re-serialized.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a chat-completion request or a session seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// A message as stored in a session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A conversation session on one experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub experiment: Option<serde_json::Value>,
    #[serde(default)]
    pub participant: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reply to an incoming API-channel message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageResponse {
    pub response: String,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
}

/// A configured bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Cursor-paginated list page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// OpenAI-compatible chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    /// Text of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_keeps_unknown_fields() {
        let json = serde_json::json!({
            "id": "4f1c",
            "team": {"name": "Demo", "slug": "demo"},
            "experiment": {"id": "e1", "name": "Coach"},
            "created_at": "2024-09-04T10:00:00Z",
        });
        let session: ExperimentSession = serde_json::from_value(json).unwrap();
        assert_eq!(session.id, "4f1c");
        assert!(session.messages.is_empty());
        assert!(session.extra.contains_key("team"));
        assert_eq!(session.experiment.unwrap()["name"], "Coach");
    }

    #[test]
    fn session_without_id_is_rejected() {
        let json = serde_json::json!({"url": "https://example.test/api/sessions/x/"});
        assert!(serde_json::from_value::<ExperimentSession>(json).is_err());
    }

    #[test]
    fn message_response_requires_response_field() {
        let ok: NewMessageResponse =
            serde_json::from_value(serde_json::json!({"response": "Hi!"})).unwrap();
        assert_eq!(ok.response, "Hi!");
        assert!(serde_json::from_value::<NewMessageResponse>(serde_json::json!({})).is_err());
    }

    #[test]
    fn chat_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn completion_content_is_first_choice() {
        let json = serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1725440000,
            "model": "gpt-4o",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "First"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}}
            ]
        });
        let completion: ChatCompletion = serde_json::from_value(json).unwrap();
        assert_eq!(completion.content(), Some("First"));
    }

    #[test]
    fn paginated_page_parses() {
        let json = serde_json::json!({
            "next": "https://example.test/api/experiments/?cursor=abc",
            "previous": null,
            "results": [{"id": "e1", "name": "Coach"}]
        });
        let page: Paginated<Experiment> = serde_json::from_value(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "Coach");
        assert!(page.previous.is_none());
    }
}
