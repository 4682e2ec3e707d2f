//! # askdocs
//!
//! Core of a document question-answering assistant: the knowledge base that holds
//! the concatenated text of every loaded document, the prompt builder that confines
//! the model to that text, the completion client, and the chat session state
//! machine that records each turn.

pub mod errors;
pub mod knowledge;
pub mod prompts;
pub mod providers;
pub mod session;

pub use errors::{CompletionError, CompletionErrorKind, SessionError};
pub use knowledge::KnowledgeBase;
pub use prompts::{build_prompt, AssistantProfile};
pub use session::{ChatMessage, ChatSession, ChatTranscript, Role, TurnState};
