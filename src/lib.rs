//! Lektor - Professor Finder Chat
//!
//! A retrieval-augmented chat assistant for finding the right professor.
//!
//! The name "Lektor" is the Scandinavian word for a senior lecturer.
//!
//! # Overview
//!
//! Each chat request carries the full conversation. Lektor embeds the latest
//! user utterance, retrieves the most similar professor reviews from a vector
//! index, folds them into the prompt, and streams the model's reply back to
//! the caller token by token.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and the fixed system instruction
//! - `chat` - Conversation types, context formatting, prompt assembly, and
//!   the per-request pipeline
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector index abstraction (remote index, in-memory)
//! - `completion` - Streaming chat completion abstraction
//! - `server` - The HTTP streaming endpoint
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use lektor::chat::{ChatPipeline, ConversationTurn, Role};
//! use lektor::config::Settings;
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = ChatPipeline::from_settings(&settings)?;
//!
//!     let conversation = vec![ConversationTurn::new(
//!         Role::User,
//!         "Who teaches algorithms well?",
//!     )];
//!
//!     let mut fragments = pipeline.respond(&conversation).await?;
//!     while let Some(fragment) = fragments.next().await {
//!         print!("{}", fragment?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod completion;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod server;
pub mod vector_store;

pub use error::{LektorError, Result};
