//! OpenAI streaming completion implementation.

use super::{filter_fragments, CompletionClient, FragmentStream};
use crate::chat::{ConversationTurn, Role};
use crate::error::{LektorError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};

/// OpenAI-based streaming completion client.
pub struct OpenAICompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompletion {
    /// Create a new streaming completion client.
    pub fn new(model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            temperature,
        }
    }
}

fn to_request_message(turn: &ConversationTurn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(turn.content.clone())
            .build()
            .map_err(|e| LektorError::Completion(e.to_string()))?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(turn.content.clone())
            .build()
            .map_err(|e| LektorError::Completion(e.to_string()))?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(turn.content.clone())
            .build()
            .map_err(|e| LektorError::Completion(e.to_string()))?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl CompletionClient for OpenAICompletion {
    #[instrument(skip(self, prompt), fields(messages = prompt.len()))]
    async fn stream_complete(&self, prompt: &[ConversationTurn]) -> Result<FragmentStream> {
        let messages = prompt
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .stream(true)
            .build()
            .map_err(|e| LektorError::Completion(format!("Failed to build request: {}", e)))?;

        let stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| LektorError::OpenAI(format!("Completion API error: {}", e)))?;

        debug!("Completion stream opened");

        // Each chunk carries at most one content delta in its first choice.
        let deltas = stream.map(|chunk| match chunk {
            Ok(response) => Ok(response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)),
            Err(e) => Err(LektorError::OpenAI(format!("Stream error: {}", e))),
        });

        Ok(Box::pin(filter_fragments(deltas)))
    }
}
