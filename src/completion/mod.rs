//! Streaming chat completion client abstraction.

mod openai;

pub use openai::OpenAICompletion;

use crate::chat::ConversationTurn;
use crate::error::Result;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// A one-shot, pull-based stream of response fragments.
///
/// Ends when the upstream signals completion; any error item is terminal.
/// Dropping the stream cancels the upstream request.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Trait for streaming completion clients.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a streamed completion for the assembled prompt.
    ///
    /// Each call produces a fresh stream; streams are not restartable.
    async fn stream_complete(&self, prompt: &[ConversationTurn]) -> Result<FragmentStream>;
}

/// Drop empty and absent content deltas so no zero-length fragment is ever
/// emitted downstream. Errors pass through untouched.
pub(crate) fn filter_fragments<S>(stream: S) -> impl Stream<Item = Result<String>>
where
    S: Stream<Item = Result<Option<String>>>,
{
    stream.filter_map(|item| async move {
        match item {
            Ok(Some(content)) if !content.is_empty() => Some(Ok(content)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        }
    })
}
