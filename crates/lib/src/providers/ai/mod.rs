pub mod gemini;

use crate::errors::CompletionError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The model used when the configuration does not name one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// A trait for interacting with a hosted text-generation service.
///
/// One call is one completion round trip: a prompt goes in, generated text or a
/// [`CompletionError`] comes out. Implementations do not retry.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response for a single, fully built prompt.
    async fn generate(&self, prompt: &str) -> Result<String, CompletionError>;
}

dyn_clone::clone_trait_object!(AiProvider);
