//! # Prompt Builder
//!
//! Combines the knowledge base text and the latest user question into the single
//! prompt sent to the completion service.

use super::assistant::*;
use serde::{Deserialize, Serialize};

/// The language and fixed phrases the assistant uses.
///
/// Every field has a default, so a partial `assistant:` block in `config.yml`
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantProfile {
    /// Optional organization name used in the role statement.
    pub organization: Option<String>,
    /// The human language answers must be written in.
    pub language: String,
    pub refusal: String,
    pub apology: String,
    pub greeting: String,
    pub title: String,
    pub subtitle: String,
    pub input_placeholder: String,
    pub empty_warning: String,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self {
            organization: None,
            language: DEFAULT_LANGUAGE.to_string(),
            refusal: DEFAULT_REFUSAL.to_string(),
            apology: DEFAULT_APOLOGY.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            input_placeholder: DEFAULT_INPUT_PLACEHOLDER.to_string(),
            empty_warning: DEFAULT_EMPTY_WARNING.to_string(),
        }
    }
}

impl AssistantProfile {
    /// The opening sentence of every prompt.
    pub fn role_statement(&self) -> String {
        match self.organization.as_deref().map(str::trim) {
            Some(org) if !org.is_empty() => {
                format!("You are a professional AI assistant for {org}.")
            }
            _ => ROLE_STATEMENT.to_string(),
        }
    }

    /// The ordered behavioral rules, without numbering.
    pub fn rules(&self) -> [String; 3] {
        [
            format!("Answer politely and professionally in {}.", self.language),
            CONTEXT_ONLY_RULE.to_string(),
            format!(
                "If the answer is not found in the documents, say: \"{}\" Do not make up an answer.",
                self.refusal
            ),
        ]
    }
}

/// Builds the completion prompt for one user turn.
///
/// Both `knowledge` and `question` are inserted verbatim. An empty knowledge base
/// is valid and yields an empty context section, which steers the model to the
/// refusal sentence for any factual question.
pub fn build_prompt(profile: &AssistantProfile, knowledge: &str, question: &str) -> String {
    let rules = profile
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{role}\n{TASK_STATEMENT}\n\n\
         {DOCUMENT_CONTEXT_HEADING}\n{knowledge}\n\n\
         {RULES_HEADING}\n{rules}\n\n\
         {USER_QUESTION_HEADING}\n{question}\n",
        role = profile.role_statement(),
    )
}
