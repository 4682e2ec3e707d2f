//! # Prompt Templates
//!
//! This module holds the assistant's fixed wording and the builder that turns
//! the knowledge base and a user question into one completion prompt.

pub mod assistant;
pub mod core;

pub use self::core::{build_prompt, AssistantProfile};
