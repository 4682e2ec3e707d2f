//! # Knowledge Base
//!
//! The concatenated text of every loaded document, used verbatim as the
//! context of every question.

use serde::Serialize;

/// The combined document text and the number of files it was built from.
///
/// Built exactly once during startup and shared read-only (behind an `Arc`)
/// by every session afterwards. It is never recomputed while the process
/// runs; restart the process to pick up new documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeBase {
    text: String,
    file_count: usize,
}

impl KnowledgeBase {
    pub fn new(text: impl Into<String>, file_count: usize) -> Self {
        Self {
            text: text.into(),
            file_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of files that were opened and processed without error.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// True when no document was loaded; the assistant still answers, but
    /// only with the refusal sentence for factual questions.
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }
}
