use std::fmt;
use thiserror::Error;

/// Failure of a single completion round trip.
///
/// Every way a call to the text-generation service can fail collapses into one
/// of these variants. Callers never show the inner detail to end users; they
/// substitute the assistant's apology message instead.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to reach the AI provider: {0}")]
    Network(reqwest::Error),
    #[error("AI provider rejected the credential: {0}")]
    Auth(String),
    #[error("AI provider quota exceeded: {0}")]
    Quota(String),
    #[error("AI provider returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Malformed AI provider response: {0}")]
    Malformed(String),
}

/// The coarse category of a [`CompletionError`], suitable for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    Configuration,
    Network,
    Auth,
    Quota,
    Api,
    Malformed,
}

impl CompletionError {
    pub fn kind(&self) -> CompletionErrorKind {
        match self {
            CompletionError::ClientBuild(_) => CompletionErrorKind::Configuration,
            CompletionError::Network(_) => CompletionErrorKind::Network,
            CompletionError::Auth(_) => CompletionErrorKind::Auth,
            CompletionError::Quota(_) => CompletionErrorKind::Quota,
            CompletionError::Api { .. } => CompletionErrorKind::Api,
            CompletionError::Malformed(_) => CompletionErrorKind::Malformed,
        }
    }
}

impl fmt::Display for CompletionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompletionErrorKind::Configuration => "configuration",
            CompletionErrorKind::Network => "network",
            CompletionErrorKind::Auth => "auth",
            CompletionErrorKind::Quota => "quota",
            CompletionErrorKind::Api => "api",
            CompletionErrorKind::Malformed => "malformed",
        };
        f.write_str(name)
    }
}

/// Rejections from the chat session state machine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyInput,
    #[error("A completion is already in flight for this session")]
    Busy,
    #[error("No turn is awaiting completion")]
    NoPendingTurn,
}
