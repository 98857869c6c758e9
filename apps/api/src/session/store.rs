//! Session Store — the only shared mutable structure in the service.
//!
//! A process-wide map from session id to per-session state. Inserts and
//! removals are atomic under the map lock; entries themselves are never
//! touched concurrently because every turn must win the per-session mutex
//! first (`try_lock` — a loser gets `SessionBusy`, never interleaving).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::models::Session;

pub type SessionHandle = Arc<Mutex<Session>>;

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    /// Base seed for per-session question selectors; mixed with the session
    /// id so distinct sessions draw distinct but reproducible sequences.
    base_seed: u64,
}

impl SessionStore {
    pub fn new(base_seed: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            base_seed,
        }
    }

    /// Creates a session and registers it. Returns the id and handle.
    pub async fn create(
        &self,
        user_id: String,
        session_type: String,
        target_role: Option<String>,
    ) -> (Uuid, SessionHandle) {
        // Seed derivation happens after the id exists, so build in two steps.
        let mut session = Session::new(user_id, session_type, target_role, 0);
        let id = session.session_id;
        session.selector = crate::interview::questions::QuestionSelector::new(
            self.base_seed ^ seed_from_id(id),
        );

        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        (id, handle)
    }

    /// Looks up a session. Unknown ids are a client error and never create
    /// an entry as a side effect.
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::SessionNotFound(id))
    }

    /// Removes a session, refusing further turns against it. The returned
    /// handle keeps the profile alive for the completing synthesis call.
    pub async fn remove(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| AppError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn seed_from_id(id: Uuid) -> u64 {
    let bytes = id.as_bytes();
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_returns_same_session() {
        let store = SessionStore::new(0);
        let (id, _) = store
            .create("u1".into(), "resume_builder".into(), None)
            .await;
        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.session_id, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_and_creates_nothing() {
        let store = SessionStore::new(0);
        let missing = Uuid::new_v4();
        match store.get(missing).await {
            Err(AppError::SessionNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
        assert_eq!(store.len().await, 0, "lookup must not create an entry");
    }

    #[tokio::test]
    async fn test_remove_refuses_subsequent_lookups() {
        let store = SessionStore::new(0);
        let (id, _) = store
            .create("u1".into(), "resume_builder".into(), None)
            .await;
        store.remove(id).await.unwrap();
        assert!(matches!(
            store.get(id).await,
            Err(AppError::SessionNotFound(_))
        ));
        assert!(matches!(
            store.remove(id).await,
            Err(AppError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_second_concurrent_turn_observes_busy_lock() {
        let store = SessionStore::new(0);
        let (id, _) = store
            .create("u1".into(), "resume_builder".into(), None)
            .await;
        let handle = store.get(id).await.unwrap();
        let in_flight = handle.try_lock().expect("first turn acquires the session");
        assert!(
            handle.try_lock().is_err(),
            "a turn already in flight must block a second acquisition"
        );
        drop(in_flight);
        assert!(handle.try_lock().is_ok());
    }

    #[tokio::test]
    async fn test_distinct_sessions_are_independent() {
        let store = SessionStore::new(7);
        let (a, _) = store
            .create("u1".into(), "resume_builder".into(), None)
            .await;
        let (b, _) = store
            .create("u2".into(), "resume_builder".into(), None)
            .await;
        assert_ne!(a, b);
        let ha = store.get(a).await.unwrap();
        let hb = store.get(b).await.unwrap();
        // Locking one session never blocks the other
        let _ga = ha.try_lock().unwrap();
        assert!(hb.try_lock().is_ok());
    }
}
