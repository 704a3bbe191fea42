use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// Opaque model identifier, passed through unmodified.
    pub model: String,

    /// Conversation context, oldest first.
    pub messages: Vec<Message>,
}

impl ChatCompletionRequest {
    /// Builds a request carrying at most the last `window` messages of `history`.
    pub fn new(model: impl Into<String>, history: &[Message], window: usize) -> Self {
        let start = history.len().saturating_sub(window);
        Self {
            model: model.into(),
            messages: history[start..].to_vec(),
        }
    }
}

/// Parsed response body of the chat-completions endpoint.
///
/// Every field is optional on the wire; whether a reply can be found is
/// decided by [`ChatCompletion::reply_text`], not by deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Completion id assigned by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The model that actually served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Candidate completions.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Error object some providers return alongside a 200 status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ChoiceMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The message inside a [`Choice`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Provider error object, `{"error": {"message": ..., "code": ...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}

impl ChatCompletion {
    /// Returns `choices[0].message.content`, if the response has one.
    pub fn reply_text(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}
