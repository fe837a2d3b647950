//! Prompt form model
//!
//! A prompt is assembled from five free-form sections. `FormState` holds the
//! raw text of each section and derives the rendered prompt:
//!
//! ```text
//! Role: {role}
//!
//! Task: {task}
//!
//! Context: {context}
//!
//! Reasoning: {reasoning}
//!
//! Output Format: {format}
//! ```
//!
//! Field text is interpolated verbatim, embedded newlines included.

pub mod catalog;

pub use catalog::{EXPERT_ROLES, TEMPLATES, TIPS, Template, find_template};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the five prompt sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field {
    #[default]
    Role,
    Task,
    Context,
    Reasoning,
    Format,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 5] = [Field::Role, Field::Task, Field::Context, Field::Reasoning, Field::Format];

    /// Key of this field in the form (and in persisted records)
    pub fn key(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::Task => "task",
            Self::Context => "context",
            Self::Reasoning => "reasoning",
            Self::Format => "format",
        }
    }

    /// Section label used in the rendered prompt
    pub fn label(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::Task => "Task",
            Self::Context => "Context",
            Self::Reasoning => "Reasoning",
            Self::Format => "Output Format",
        }
    }

    /// Short help line shown under the section title
    pub fn description(self) -> &'static str {
        match self {
            Self::Role => "Choose who the AI should act as",
            Self::Task => "Specify the main objective",
            Self::Context => "Add background information",
            Self::Reasoning => "Guide the thinking process",
            Self::Format => "Specify how you want the response structured",
        }
    }

    /// Example text shown while the section is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Role => "Select an expert role...",
            Self::Task => "e.g., Analyze this dataset and identify key trends, Write a compelling story",
            Self::Context => "Provide relevant background information, constraints, or domain knowledge",
            Self::Reasoning => "e.g., Think step by step, Show your work, Explain your methodology",
            Self::Format => "e.g., Table with headers, JSON structure, Bullet points, Executive summary",
        }
    }

    /// Parse a field key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Next field in display order (wraps)
    pub fn next(self) -> Self {
        match self {
            Self::Role => Self::Task,
            Self::Task => Self::Context,
            Self::Context => Self::Reasoning,
            Self::Reasoning => Self::Format,
            Self::Format => Self::Role,
        }
    }

    /// Previous field in display order (wraps)
    pub fn prev(self) -> Self {
        match self {
            Self::Role => Self::Format,
            Self::Task => Self::Role,
            Self::Context => Self::Task,
            Self::Reasoning => Self::Context,
            Self::Format => Self::Reasoning,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Current values of the five prompt sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub role: String,
    pub task: String,
    pub context: String,
    pub reasoning: String,
    pub format: String,
}

impl FormState {
    /// Build a form from its five section values
    pub fn new(
        role: impl Into<String>,
        task: impl Into<String>,
        context: impl Into<String>,
        reasoning: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            task: task.into(),
            context: context.into(),
            reasoning: reasoning.into(),
            format: format.into(),
        }
    }

    /// Get the value of a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Role => &self.role,
            Field::Task => &self.task,
            Field::Context => &self.context,
            Field::Reasoning => &self.reasoning,
            Field::Format => &self.format,
        }
    }

    /// Replace the value of exactly one field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        debug!(%field, len = value.len(), "FormState::set: called");
        match field {
            Field::Role => self.role = value,
            Field::Task => self.task = value,
            Field::Context => self.context = value,
            Field::Reasoning => self.reasoning = value,
            Field::Format => self.format = value,
        }
    }

    /// The rendered prompt, untrimmed (as shown in the live preview)
    pub fn render(&self) -> String {
        format!(
            "Role: {}\n\nTask: {}\n\nContext: {}\n\nReasoning: {}\n\nOutput Format: {}",
            self.role, self.task, self.context, self.reasoning, self.format
        )
    }

    /// The rendered prompt with surrounding whitespace removed
    ///
    /// This is the text that gets copied, exported and word-counted.
    pub fn render_trimmed(&self) -> String {
        self.render().trim().to_string()
    }

    /// True when no section has any non-whitespace content
    ///
    /// The section labels keep the rendered prompt itself from ever being blank.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }

    /// True iff every section has non-whitespace content
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).trim().is_empty())
    }

    /// Number of whitespace-separated words in the trimmed rendered prompt
    pub fn word_count(&self) -> usize {
        count_words(&self.render())
    }
}

/// Count whitespace-separated tokens in the trimmed text
///
/// An empty (or all-whitespace) text counts as one word: splitting an empty
/// string on whitespace yields a single empty token.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count().max(1)
}
