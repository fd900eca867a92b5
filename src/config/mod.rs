//! Configuration module for Lektor.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ChatPrompts, Prompts};
pub use settings::{
    CompletionSettings, EmbeddingSettings, GeneralSettings, PromptSettings, ServerSettings,
    Settings, VectorStoreSettings,
};
