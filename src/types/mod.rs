// Public modules
pub mod chat_completion;
pub mod message;

// Re-exports
pub use chat_completion::{
    ApiErrorBody, ChatCompletion, ChatCompletionRequest, Choice, ChoiceMessage,
};
pub use message::{Message, MessageRole};
