//! # Assistant Wording
//!
//! Default phrases for the document assistant. The defaults reproduce the
//! original deployment, which answers in Bahasa Indonesia. All of them can be
//! overridden through the `assistant` section of the server configuration.

/// Role statement used when no organization name is configured.
pub const ROLE_STATEMENT: &str = "You are a professional AI assistant for an organization.";

/// Task statement that follows the role statement.
pub const TASK_STATEMENT: &str =
    "Your task is to answer the user's question BASED ON the document context below.";

/// Heading of the section that carries the knowledge base text.
pub const DOCUMENT_CONTEXT_HEADING: &str = "DOCUMENT CONTEXT:";

/// Heading of the ordered behavioral rules.
pub const RULES_HEADING: &str = "RULES:";

/// Heading of the section that carries the user's question.
pub const USER_QUESTION_HEADING: &str = "USER QUESTION:";

/// The rule restricting answers to the supplied context. Emitted verbatim.
pub const CONTEXT_ONLY_RULE: &str = "Use ONLY information from the \"DOCUMENT CONTEXT\" above.";

pub const DEFAULT_LANGUAGE: &str = "Bahasa Indonesia";

/// The exact sentence the model must answer with when the context lacks the answer.
pub const DEFAULT_REFUSAL: &str =
    "Mohon maaf, informasi tersebut tidak tersedia dalam dokumen internal kami.";

/// Shown in place of an answer when the completion call fails.
pub const DEFAULT_APOLOGY: &str = "Maaf, terjadi gangguan koneksi ke AI.";

/// The first message of every transcript.
pub const DEFAULT_GREETING: &str =
    "Halo! Saya siap membantu menjawab pertanyaan dari dokumen yang tersedia.";

// --- Presentation strings ---

pub const DEFAULT_TITLE: &str = "🤖 AI Assistant - Dokumen Internal";

pub const DEFAULT_SUBTITLE: &str =
    "Tanyakan apa saja terkait dokumen perencanaan/data yang tersimpan di sistem.";

pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Ketik pertanyaan Anda di sini...";

/// Banner shown when the document directory held no readable PDF at startup.
pub const DEFAULT_EMPTY_WARNING: &str =
    "⚠️ Belum ada dokumen di folder 'data/'. Silakan tambahkan dokumen PDF lalu jalankan ulang server.";
