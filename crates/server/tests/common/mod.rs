//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port with a mock completion
//! client and a chosen knowledge base, so API tests exercise the full stack
//! without network access.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use askdocs::{AssistantProfile, KnowledgeBase};
use askdocs_server::{router, state::AppState};
use askdocs_test_utils::MockAiProvider;
use axum::serve;
use reqwest::Client;
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

pub const MOCK_MODEL: &str = "mock-chat-model";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_ai: MockAiProvider,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server over one loaded document.
    pub async fn spawn() -> Result<Self> {
        let knowledge = KnowledgeBase::new("Jam kerja kantor adalah 08.00 - 16.00.\n", 1);
        Self::spawn_with(knowledge, MockAiProvider::new()).await
    }

    pub async fn spawn_with(knowledge: KnowledgeBase, mock_ai: MockAiProvider) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state = AppState::new(
            knowledge,
            Arc::new(mock_ai.clone()),
            AssistantProfile::default(),
            MOCK_MODEL,
        );
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_ai,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Starts a chat session and returns its id.
    pub async fn create_session(&self) -> Result<String> {
        let body: Value = self
            .client
            .post(self.url("/api/sessions"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body["session_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("response has no session_id: {body}"))
    }

    /// Posts one message to a session and returns the raw response.
    pub async fn post_message(&self, session_id: &str, content: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url(&format!("/api/sessions/{session_id}/messages")))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
