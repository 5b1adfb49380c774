use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::wizard::controller::WizardSession;

/// In-memory registry of wizard sessions. Nothing survives a restart.
///
/// The lock is only ever held for a synchronous mutation; callers must not
/// await anything inside `with_session`.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, WizardSession>>>,
    idle_limit: Duration,
}

impl SessionStore {
    pub fn new(idle_minutes: u32) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_limit: Duration::minutes(i64::from(idle_minutes)),
        }
    }

    /// Creates a fresh session, sweeping idle ones first.
    pub async fn create(&self) -> WizardSession {
        let mut sessions = self.sessions.write().await;

        if let Some(cutoff) = Utc::now().checked_sub_signed(self.idle_limit) {
            let before = sessions.len();
            sessions.retain(|_, s| s.last_touched() >= cutoff);
            let swept = before - sessions.len();
            if swept > 0 {
                info!("Dropped {swept} idle wizard session(s)");
            }
        }

        let session = WizardSession::new(Uuid::new_v4());
        sessions.insert(session.id(), session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<WizardSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the session under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut WizardSession) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        Ok(f(session))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::types::Field;

    #[tokio::test]
    async fn test_create_and_mutate() {
        let store = SessionStore::new(120);
        let id = store.create().await.id();

        store
            .with_session(id, |s| s.edit_field(Field::Name, "Jane"))
            .await
            .unwrap();

        assert_eq!(store.get(id).await.unwrap().form().name, "Jane");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(120);
        assert!(matches!(
            store.get(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new(120);
        let id = store.create().await.id();
        store.remove(id).await.unwrap();
        assert!(store.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn test_idle_sessions_swept_on_create() {
        let store = SessionStore::new(0);
        store.create().await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.create().await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_longest_idle_limit_keeps_sessions() {
        let store = SessionStore::new(crate::config::MAX_SESSION_IDLE_MINUTES);
        store.create().await;
        store.create().await;
        assert_eq!(store.len().await, 2);
    }
}
