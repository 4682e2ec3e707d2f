//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the startup
//! phase that builds it. The knowledge base is loaded here exactly once and then
//! shared read-only; each chat session owns its own transcript.

use crate::config::AppConfig;
use askdocs::{
    providers::ai::{gemini::GeminiProvider, AiProvider},
    AssistantProfile, ChatSession, KnowledgeBase,
};
use askdocs_pdf::load_all_documents;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// A handle to one session. The mutex is only held for short, non-awaiting
/// reads and transitions; a turn releases it while the completion is in flight.
pub type SessionHandle = Arc<Mutex<ChatSession>>;

/// Sessions idle longer than this are dropped by the next sweep.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

struct SessionSlot {
    handle: SessionHandle,
    last_active: Instant,
}

/// Registry of live chat sessions, one per browser session id.
///
/// The lock only guards registration and lookup; transcripts are never shared
/// between sessions. Creating a session also evicts sessions that have been
/// idle for longer than the store's time-to-live.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Creates a session that starts with the profile's greeting.
    pub async fn create(&self, profile: Arc<AssistantProfile>) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(ChatSession::new(profile)));

        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions);
        sessions.insert(
            id,
            SessionSlot {
                handle: handle.clone(),
                last_active: Instant::now(),
            },
        );
        (id, handle)
    }

    /// Looks a session up and marks it active.
    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(id)?;
        slot.last_active = Instant::now();
        Some(slot.handle.clone())
    }

    /// Ends a session, dropping its transcript. Returns false if it did not exist.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    // A handle still referenced elsewhere belongs to a running turn and is kept.
    fn sweep(&self, sessions: &mut HashMap<Uuid, SessionSlot>) {
        let before = sessions.len();
        sessions.retain(|_, slot| {
            slot.last_active.elapsed() < self.ttl || Arc::strong_count(&slot.handle) > 1
        });
        let expired = before - sessions.len();
        if expired > 0 {
            debug!(expired, "Dropped idle chat sessions.");
        }
    }
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; never recomputed. Restart the server to reload.
    pub knowledge: Arc<KnowledgeBase>,
    /// The completion client used for every turn.
    pub ai_provider: Arc<dyn AiProvider>,
    /// Wording and language of the assistant.
    pub profile: Arc<AssistantProfile>,
    /// The model name shown in the side panel.
    pub model_name: String,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        knowledge: KnowledgeBase,
        ai_provider: Arc<dyn AiProvider>,
        profile: AssistantProfile,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            knowledge: Arc::new(knowledge),
            ai_provider,
            profile: Arc::new(profile),
            model_name: model_name.into(),
            sessions: SessionStore::default(),
        }
    }

    /// Replaces the session store with one that expires idle sessions after `ttl`.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.sessions = SessionStore::new(ttl);
        self
    }
}

/// Loads the knowledge base from the configured document directory.
///
/// A directory-level failure is logged and yields an empty knowledge base, so
/// document problems never stop the server.
pub async fn load_knowledge_base(config: &AppConfig) -> anyhow::Result<KnowledgeBase> {
    let data_dir = config.data_dir.clone();
    info!("Preparing the knowledge base from '{}'...", data_dir.display());

    let knowledge = tokio::task::spawn_blocking(move || load_all_documents(&data_dir))
        .await?
        .unwrap_or_else(|e| {
            error!("Failed to load documents: {e}");
            KnowledgeBase::default()
        });

    if knowledge.is_empty() {
        warn!(
            "No documents loaded from '{}'. Questions will be answered without context.",
            config.data_dir.display()
        );
    } else {
        info!(
            file_count = knowledge.file_count(),
            "Knowledge base ready."
        );
    }
    Ok(knowledge)
}

/// Builds the shared application state from the configuration.
///
/// This is the startup initialization phase:
/// - It loads every document once into the knowledge base.
/// - It instantiates the Gemini completion client.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let knowledge = load_knowledge_base(&config).await?;

    let provider = GeminiProvider::new(config.api_url.clone(), config.api_key().to_string())?;
    info!(model = %config.model_name, "Initialized AI provider (Gemini).");

    Ok(AppState::new(
        knowledge,
        Arc::new(provider),
        config.assistant,
        config.model_name,
    )
    .with_session_ttl(config.session_ttl))
}
