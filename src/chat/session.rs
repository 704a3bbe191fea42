//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the
//! conversation and performs one request/response cycle per turn.

use crate::client::CompletionBackend;
use crate::error::{Error, Result};
use crate::types::{ChatCompletionRequest, Message};

/// Number of most recent messages sent with each request and shown by `/history`.
pub const HISTORY_WINDOW: usize = 10;

/// A chat session that manages conversation state and API interactions.
///
/// The full history is retained for the life of the process; only the last
/// [`HISTORY_WINDOW`] messages ever leave it.
pub struct ChatSession<B: CompletionBackend> {
    backend: B,
    model: String,
    messages: Vec<Message>,
}

impl<B: CompletionBackend> ChatSession<B> {
    /// Creates a new chat session talking to `backend` with `model`.
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Sends a user message and records the reply.
    ///
    /// The user message is appended before the request goes out and stays
    /// in history even if the request fails. The assistant reply is only
    /// appended on success.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the request fails, or a
    /// malformed-response error if the reply text is missing.
    pub async fn send(&mut self, user_input: &str) -> Result<String> {
        self.messages.push(Message::user(user_input));

        let request = self.request();
        let completion = self.backend.complete(&request).await?;

        let Some(reply) = completion.reply_text() else {
            let detail = completion
                .error
                .and_then(|err| err.message)
                .unwrap_or_else(|| "response has no choices[0].message.content".to_string());
            return Err(Error::malformed_response(detail));
        };
        let reply = reply.to_string();
        self.messages.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Builds the request the next turn would send.
    pub fn request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest::new(self.model.clone(), &self.messages, HISTORY_WINDOW)
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the whole conversation, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the last [`HISTORY_WINDOW`] messages.
    pub fn recent(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        &self.messages[start..]
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Returns the current model.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::types::{ChatCompletion, Choice, ChoiceMessage};

    /// Backend that answers from a queue and records every request.
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        replies: Mutex<VecDeque<Result<ChatCompletion>>>,
        pub(crate) requests: Mutex<Vec<ChatCompletionRequest>>,
    }

    impl FakeBackend {
        pub(crate) fn replying(replies: Vec<Result<ChatCompletion>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    pub(crate) fn completion(text: &str) -> ChatCompletion {
        ChatCompletion {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    role: Some("assistant".to_string()),
                    content: Some(text.to_string()),
                }),
                finish_reason: Some("stop".to_string()),
            }],
            ..ChatCompletion::default()
        }
    }

    #[async_trait::async_trait]
    impl CompletionBackend for FakeBackend {
        async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletion> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(completion("ok")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FakeBackend, completion};
    use super::*;
    use crate::types::{ApiErrorBody, ChatCompletion, MessageRole};

    #[test]
    fn new_session_empty() {
        let session = ChatSession::new(FakeBackend::default(), "a/model");
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.model(), "a/model");
        assert!(session.recent().is_empty());
    }

    #[tokio::test]
    async fn successful_turn_appends_both_messages() {
        let backend = FakeBackend::replying(vec![Ok(completion("Hello!"))]);
        let mut session = ChatSession::new(backend, "a/model");

        let reply = session.send("Hi").await.unwrap();
        assert_eq!(reply, "Hello!");
        assert_eq!(
            session.messages(),
            &[Message::user("Hi"), Message::assistant("Hello!")]
        );
    }

    #[tokio::test]
    async fn transport_failure_keeps_only_the_user_message() {
        let backend = FakeBackend::replying(vec![Err(Error::connection("refused", None))]);
        let mut session = ChatSession::new(backend, "a/model");

        let err = session.send("Hi").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(session.message_count(), 1);
        assert_eq!(session.messages()[0].role, MessageRole::User);
    }

    #[tokio::test]
    async fn missing_reply_text_is_malformed() {
        let backend = FakeBackend::replying(vec![
            Ok(ChatCompletion::default()),
            Ok(ChatCompletion {
                error: Some(ApiErrorBody {
                    message: Some("Provider returned error".to_string()),
                    code: None,
                }),
                ..ChatCompletion::default()
            }),
        ]);
        let mut session = ChatSession::new(backend, "a/model");

        let err = session.send("one").await.unwrap_err();
        assert!(err.is_malformed_response());
        let err = session.send("two").await.unwrap_err();
        assert!(err.to_string().contains("Provider returned error"));
        assert_eq!(session.message_count(), 2);
    }

    #[tokio::test]
    async fn requests_carry_at_most_ten_messages() {
        let mut session = ChatSession::new(FakeBackend::default(), "a/model");
        for i in 0..8 {
            session.send(&format!("q{i}")).await.unwrap();
        }
        assert_eq!(session.message_count(), 16);

        let requests = session.backend.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 8);
        for request in &requests {
            assert!(request.messages.len() <= HISTORY_WINDOW);
            assert_eq!(request.model, "a/model");
        }
        let last = requests.last().unwrap();
        assert_eq!(last.messages.len(), HISTORY_WINDOW);
        assert_eq!(last.messages.last().unwrap(), &Message::user("q7"));
        assert_eq!(last.messages[0], Message::assistant("ok"));
        assert_eq!(last.messages[1], Message::user("q3"));
    }

    #[tokio::test]
    async fn clear_session() {
        let mut session = ChatSession::new(FakeBackend::default(), "a/model");
        session.send("test").await.unwrap();
        assert_eq!(session.message_count(), 2);

        session.clear();
        assert_eq!(session.message_count(), 0);
        session.clear();
        assert_eq!(session.message_count(), 0);
    }

    #[tokio::test]
    async fn set_model_applies_to_next_request() {
        let mut session = ChatSession::new(FakeBackend::default(), "first/model");
        session.set_model("second/model");
        assert_eq!(session.model(), "second/model");

        session.send("hi").await.unwrap();
        let requests = session.backend.requests.lock().unwrap();
        assert_eq!(requests[0].model, "second/model");
    }
}
