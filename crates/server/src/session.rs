//! Guided-session management
//!
//! In-memory sessions for the guided loan-application flow. Sessions
//! expire on inactivity and a background task sweeps them out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;

use loan_advisor_core::Language;
use loan_advisor_guidance::ConversationState;

use crate::ServerError;

/// One guided conversation session
pub struct Session {
    pub id: String,
    pub language: Language,
    /// Conversation state, mutated only through the controller
    pub state: Mutex<ConversationState>,
    pub created_at: Instant,
    last_activity: RwLock<Instant>,
}

impl Session {
    pub fn new(id: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            language,
            state: Mutex::new(ConversationState::new(language)),
            created_at: Instant::now(),
            last_activity: RwLock::new(Instant::now()),
        }
    }

    /// Update last activity
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Check if session is expired
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl SessionManager {
    pub fn new(max_sessions: usize) -> Self {
        Self::with_config(
            max_sessions,
            Duration::from_secs(3_600),
            Duration::from_secs(300),
        )
    }

    pub fn with_config(
        max_sessions: usize,
        session_timeout: Duration,
        cleanup_interval: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            session_timeout,
            cleanup_interval,
        }
    }

    /// Start a background task that periodically sweeps expired sessions
    ///
    /// Returns a shutdown sender used to stop the task.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let before = manager.count();
                        manager.cleanup_expired();
                        let after = manager.count();
                        if before != after {
                            tracing::info!(
                                removed = before - after,
                                remaining = after,
                                "session cleanup sweep"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Create a new session in the given language
    pub fn create(&self, language: Language) -> Result<Arc<Session>, ServerError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);

            if sessions.len() >= self.max_sessions {
                return Err(ServerError::Internal("max sessions reached".to_string()));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(&id, language));
        sessions.insert(id.clone(), session.clone());

        tracing::info!(session_id = %id, language = language.code(), "created session");

        Ok(session)
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session
    pub fn remove(&self, id: &str) {
        if self.sessions.write().remove(id).is_some() {
            tracing::info!(session_id = %id, "removed session");
        }
    }

    /// Active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Sweep expired sessions
    pub fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions);
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) {
        let timeout = self.session_timeout;
        sessions.retain(|id, session| {
            let expired = session.is_expired(timeout);
            if expired {
                tracing::info!(session_id = %id, "expired session");
            }
            !expired
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let manager = SessionManager::new(10);
        let session = manager.create(Language::English).unwrap();

        assert!(!session.is_expired(Duration::from_secs(60)));
        assert!(session.state.lock().loan_type.is_none());
    }

    #[test]
    fn test_session_get_and_remove() {
        let manager = SessionManager::new(10);
        let session = manager.create(Language::Hindi).unwrap();
        let id = session.id.clone();

        assert!(manager.get(&id).is_some());
        manager.remove(&id);
        assert!(manager.get(&id).is_none());
    }

    #[test]
    fn test_capacity_enforced() {
        let manager = SessionManager::new(2);
        manager.create(Language::English).unwrap();
        manager.create(Language::English).unwrap();
        assert!(manager.create(Language::English).is_err());
    }

    #[test]
    fn test_expired_sessions_swept() {
        let manager =
            SessionManager::with_config(10, Duration::from_millis(0), Duration::from_secs(1));
        let session = manager.create(Language::English).unwrap();
        let id = session.id.clone();

        std::thread::sleep(Duration::from_millis(5));
        manager.cleanup_expired();
        assert!(manager.get(&id).is_none());
    }
}
