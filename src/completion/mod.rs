//! Chat-completion service client
//!
//! The pipeline talks to an OpenAI-compatible chat completion API through
//! the [`CompletionClient`] trait so tests (and local runs) can swap in a
//! scripted mock.

mod client;
mod mock;

pub use client::{
    ChatMessage, CompletionClient, CompletionRequest, OpenAiClient, ASSISTANT_PERSONA,
};
pub use mock::MockCompletionClient;
