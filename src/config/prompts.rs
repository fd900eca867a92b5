//! Prompt templates for Lektor.
//!
//! The system instruction is immutable configuration injected into the prompt
//! assembler, never shared mutable state.

use super::settings::PromptSettings;
use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub chat: ChatPrompts,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            chat: ChatPrompts::default(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from a custom TOML file if one is
    /// configured. Fields missing from the file keep their defaults.
    pub fn load(settings: &PromptSettings) -> crate::error::Result<Self> {
        match &settings.custom_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let prompts: Prompts = toml::from_str(&content)?;
                Ok(prompts)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Prompts for the professor-recommendation chat assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    pub system: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an intelligent assistant designed to help students find the best professors according to their specific needs and preferences. When a student asks about professors, you will:

1. Understand the Query: Analyze the student's question to determine their preferences (e.g., subject, teaching style, grading difficulty, etc.).

2. Retrieve Information: Use a Retrieval-Augmented Generation (RAG) model to search through a database of professor reviews, ratings, and relevant data.

3. Rank and Recommend: Select and rank the top 3 professors who best match the student's criteria. Provide a brief summary of each professor, highlighting their strengths and any relevant feedback from previous students.

4. Clarify and Assist: If the student's query is unclear or requires more detail, ask follow-up questions to ensure accurate recommendations.

5. Be Objective and Neutral: Base your recommendations solely on the data retrieved, and avoid any bias or assumptions not supported by the information available.

6. Provide Accurate and Relevant Information: Ensure that all recommendations are up-to-date and directly relevant to the student's query. If no suitable professors are found, suggest alternatives or ways to refine the search."#.to_string(),
        }
    }
}
