//! # Chat Session
//!
//! The per-session transcript and the two-state turn controller that drives it.
//!
//! A session starts `Idle` with a one-message transcript (the assistant greeting).
//! Submitting a non-empty message appends it and moves the session to
//! `AwaitingCompletion`; finishing the turn appends exactly one assistant message,
//! the answer or the apology, and returns to `Idle`.

use crate::{
    errors::{CompletionError, SessionError},
    knowledge::KnowledgeBase,
    prompts::{build_prompt, AssistantProfile},
    providers::ai::AiProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An append-only list of messages. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChatTranscript(Vec<ChatMessage>);

impl ChatTranscript {
    fn with_greeting(greeting: &str) -> Self {
        Self(vec![ChatMessage::assistant(greeting)])
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.0.push(message);
        // Just pushed, so never empty.
        &self.0[self.0.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingCompletion,
}

/// One user's conversation: its transcript, its turn state, and the wording
/// used for the greeting and apology.
#[derive(Debug, Clone)]
pub struct ChatSession {
    profile: Arc<AssistantProfile>,
    transcript: ChatTranscript,
    state: TurnState,
}

impl ChatSession {
    pub fn new(profile: Arc<AssistantProfile>) -> Self {
        let transcript = ChatTranscript::with_greeting(&profile.greeting);
        Self {
            profile,
            transcript,
            state: TurnState::Idle,
        }
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Appends the user's message and returns the prompt for this turn.
    ///
    /// Whitespace-only input is rejected and leaves the session untouched, as
    /// does any input while a completion is in flight.
    pub fn begin_turn(
        &mut self,
        input: &str,
        knowledge: &KnowledgeBase,
    ) -> Result<String, SessionError> {
        if self.state == TurnState::AwaitingCompletion {
            return Err(SessionError::Busy);
        }
        if input.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.transcript.push(ChatMessage::user(input));
        self.state = TurnState::AwaitingCompletion;
        Ok(build_prompt(&self.profile, knowledge.text(), input))
    }

    /// Records the outcome of the pending completion and returns to `Idle`.
    ///
    /// A failure never reaches the transcript as-is; the apology is appended instead.
    pub fn finish_turn(
        &mut self,
        outcome: Result<String, CompletionError>,
    ) -> Result<&ChatMessage, SessionError> {
        if self.state != TurnState::AwaitingCompletion {
            return Err(SessionError::NoPendingTurn);
        }

        let content = match outcome {
            Ok(answer) => answer,
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Completion failed; replying with apology.");
                self.profile.apology.clone()
            }
        };

        self.state = TurnState::Idle;
        Ok(self.transcript.push(ChatMessage::assistant(content)))
    }

    /// Runs one full turn: append the question, make exactly one completion
    /// attempt, append the answer (or apology).
    #[instrument(skip_all, fields(question_len = question.len()))]
    pub async fn ask(
        &mut self,
        question: &str,
        knowledge: &KnowledgeBase,
        provider: &dyn AiProvider,
    ) -> Result<&ChatMessage, SessionError> {
        let prompt = self.begin_turn(question, knowledge)?;
        let outcome = provider.generate(&prompt).await;
        if outcome.is_ok() {
            info!("Completion succeeded.");
        }
        self.finish_turn(outcome)
    }
}
