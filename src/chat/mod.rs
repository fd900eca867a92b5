//! Conversation types and the retrieval-augmented chat pipeline.

pub mod context;
pub mod pipeline;
pub mod prompt;

pub use pipeline::ChatPipeline;

use serde::{Deserialize, Serialize};

/// The speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
///
/// Turns are immutable once created; the pipeline only ever constructs new
/// ones for the outbound completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    /// Create a new turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
