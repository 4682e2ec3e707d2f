//! # Session Store Tests
//!
//! Idle sessions are dropped when a new session is created; active ones stay.

use askdocs::AssistantProfile;
use askdocs_server::state::SessionStore;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_idle_sessions_expire_on_create() {
    let store = SessionStore::new(Duration::from_millis(100));
    let profile = Arc::new(AssistantProfile::default());

    let (idle, handle) = store.create(profile.clone()).await;
    drop(handle);
    tokio::time::sleep(Duration::from_millis(200)).await;

    let (fresh, _handle) = store.create(profile).await;

    assert_eq!(store.count().await, 1);
    assert!(store.get(&idle).await.is_none());
    assert!(store.get(&fresh).await.is_some());
}

#[tokio::test]
async fn test_lookup_keeps_session_alive() {
    let store = SessionStore::new(Duration::from_millis(300));
    let profile = Arc::new(AssistantProfile::default());

    let (id, handle) = store.create(profile.clone()).await;
    drop(handle);
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.get(&id).await.is_some());
    }

    store.create(profile).await;

    assert!(store.get(&id).await.is_some());
    assert_eq!(store.count().await, 2);
}

#[tokio::test]
async fn test_session_in_use_is_not_expired() {
    let store = SessionStore::new(Duration::from_millis(50));
    let profile = Arc::new(AssistantProfile::default());

    let (busy, held) = store.create(profile.clone()).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    store.create(profile).await;

    assert!(store.get(&busy).await.is_some());
    drop(held);
}
