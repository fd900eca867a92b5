//! The per-request retrieval-augmented chat pipeline.

use super::context::format_context;
use super::prompt::assemble;
use super::ConversationTurn;
use crate::completion::{CompletionClient, FragmentStream, OpenAICompletion};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{LektorError, Result};
use crate::vector_store::{MemoryVectorStore, PineconeStore, VectorStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Orchestrates one chat turn: embed the latest utterance, retrieve the
/// nearest reviews, fold them into the prompt, and stream the completion.
///
/// Holds no per-request state; a single pipeline serves concurrent requests.
pub struct ChatPipeline {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    completion: Arc<dyn CompletionClient>,
    system_instruction: String,
    top_k: usize,
}

impl ChatPipeline {
    /// Create a pipeline from explicit collaborators.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        completion: Arc<dyn CompletionClient>,
        system_instruction: String,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            completion,
            system_instruction,
            top_k,
        }
    }

    /// Create a pipeline wired to the configured providers.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let vector_store: Arc<dyn VectorStore> = match settings.vector_store.provider.as_str() {
            "pinecone" => Arc::new(PineconeStore::new(
                &settings.vector_store.index_host,
                &settings.vector_store.namespace,
            )?),
            "memory" => Arc::new(MemoryVectorStore::new()),
            other => {
                return Err(LektorError::Config(format!(
                    "Unknown vector store provider: {}",
                    other
                )))
            }
        };

        let completion: Arc<dyn CompletionClient> = Arc::new(OpenAICompletion::new(
            &settings.completion.model,
            settings.completion.temperature,
        ));

        let prompts = Prompts::load(&settings.prompts)?;

        Ok(Self::new(
            embedder,
            vector_store,
            completion,
            prompts.chat.system,
            settings.vector_store.top_k,
        ))
    }

    /// Run the pipeline for one conversation and return the fragment stream.
    ///
    /// Steps are strictly sequential; a failure in any step surfaces before
    /// the next upstream service is contacted and before any stream opens.
    #[instrument(skip(self, conversation), fields(turns = conversation.len()))]
    pub async fn respond(&self, conversation: &[ConversationTurn]) -> Result<FragmentStream> {
        let latest = conversation.last().ok_or_else(|| {
            LektorError::MalformedRequest("Conversation must contain at least one turn".to_string())
        })?;

        let query = latest.content.as_str();
        if query.trim().is_empty() {
            return Err(LektorError::MalformedRequest(
                "Latest turn has no content".to_string(),
            ));
        }

        let embedding = self.embedder.embed(query).await?;
        let items = self.vector_store.query(&embedding, self.top_k).await?;
        debug!("Retrieved {} reviews for the query", items.len());

        let context = format_context(&items);
        let prompt = assemble(&self.system_instruction, conversation, &context)?;

        self.completion.stream_complete(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::{review_item, CountingStore, MockCompletion, MockEmbedder};
    use crate::chat::Role;
    use futures::StreamExt;
    use std::sync::atomic::Ordering;

    const SYSTEM: &str = "You are a professor finder.";

    fn pipeline_with(
        embedder: MockEmbedder,
        store: Arc<CountingStore>,
        completion: Arc<MockCompletion>,
    ) -> ChatPipeline {
        ChatPipeline::new(
            Arc::new(embedder),
            store,
            completion,
            SYSTEM.to_string(),
            3,
        )
    }

    fn user_turn(content: &str) -> ConversationTurn {
        ConversationTurn::new(Role::User, content)
    }

    #[tokio::test]
    async fn test_end_to_end_prompt_and_stream() {
        let store = Arc::new(CountingStore::returning(vec![
            review_item("Dr. Ada", "Clear and patient", "Algorithms", 5.0),
            review_item("Dr. Bob", "Fast-paced but fair", "Algorithms", 4.0),
        ]));
        let completion = Arc::new(MockCompletion::emitting(vec!["The", " best", " professor"]));
        let pipeline = pipeline_with(
            MockEmbedder::returning(vec![1.0, 0.0]),
            Arc::clone(&store),
            Arc::clone(&completion),
        );

        let conversation = vec![user_turn("Who teaches algorithms well?")];
        let mut stream = pipeline.respond(&conversation).await.unwrap();

        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            reply.push_str(&fragment.unwrap());
        }
        assert_eq!(reply, "The best professor");

        let prompt = completion.received_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(prompt[0].role, Role::System);
        assert_eq!(prompt[0].content, SYSTEM);

        let last = prompt.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.starts_with("Who teaches algorithms well?"));
        assert!(last.content.contains("Dr. Ada"));
        assert!(last.content.contains("Clear and patient"));
        assert!(last.content.contains("Dr. Bob"));
        assert!(last.content.contains("Fast-paced but fair"));
    }

    #[tokio::test]
    async fn test_empty_conversation_fails_fast() {
        let store = Arc::new(CountingStore::returning(vec![]));
        let completion = Arc::new(MockCompletion::emitting(vec![]));
        let pipeline = pipeline_with(
            MockEmbedder::returning(vec![1.0]),
            Arc::clone(&store),
            Arc::clone(&completion),
        );

        let result = pipeline.respond(&[]).await;
        assert!(matches!(result, Err(LektorError::MalformedRequest(_))));
        assert_eq!(store.queries.load(Ordering::SeqCst), 0);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_downstream_services() {
        let store = Arc::new(CountingStore::returning(vec![]));
        let completion = Arc::new(MockCompletion::emitting(vec!["unused"]));
        let pipeline = pipeline_with(
            MockEmbedder::failing(),
            Arc::clone(&store),
            Arc::clone(&completion),
        );

        let result = pipeline.respond(&[user_turn("anything")]).await;
        assert!(matches!(result, Err(LektorError::Embedding(_))));
        assert_eq!(store.queries.load(Ordering::SeqCst), 0);
        assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_matches_still_streams_with_no_results_context() {
        let store = Arc::new(CountingStore::returning(vec![]));
        let completion = Arc::new(MockCompletion::emitting(vec!["Sorry"]));
        let pipeline = pipeline_with(
            MockEmbedder::returning(vec![1.0]),
            Arc::clone(&store),
            Arc::clone(&completion),
        );

        let mut stream = pipeline
            .respond(&[user_turn("Who teaches basket weaving?")])
            .await
            .unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), "Sorry");

        let prompt = completion.received_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt
            .last()
            .unwrap()
            .content
            .contains("No matching professor reviews were found."));
    }

    #[tokio::test]
    async fn test_dropping_stream_stops_pulls() {
        let store = Arc::new(CountingStore::returning(vec![]));
        let completion = Arc::new(MockCompletion::emitting(vec!["one", "two", "three"]));
        let pipeline = pipeline_with(
            MockEmbedder::returning(vec![1.0]),
            Arc::clone(&store),
            Arc::clone(&completion),
        );

        let mut stream = pipeline.respond(&[user_turn("query")]).await.unwrap();
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, "one");
        drop(stream);

        // Only the consumed fragment was ever pulled from upstream.
        assert_eq!(completion.pulls.load(Ordering::SeqCst), 1);
    }
}
