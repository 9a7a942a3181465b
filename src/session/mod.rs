//! Per-visitor session registry.
//!
//! Every browser gets its own [`TaskStore`], found through a random id kept
//! in a cookie. Sessions live in memory only and are dropped after sitting
//! idle for the configured timeout.

pub mod cookie;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::model::TaskStore;
use crate::storage::config::SessionConfig;

/// Everything one visitor owns
#[derive(Debug, Default)]
pub struct SessionState {
    pub tasks: TaskStore,
}

/// Shared handle to a session.
///
/// Holding the lock across a request's mutation and projection keeps two
/// concurrent requests of the same visitor from losing each other's writes.
pub type SessionHandle = Arc<tokio::sync::Mutex<SessionState>>;

/// Upper bound on how often the whole map is scanned for idle sessions
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    state: SessionHandle,
    last_seen: Instant,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<String, Entry>,
    last_sweep: Option<Instant>,
}

/// Result of looking up a session id
pub struct Resolved {
    pub id: String,
    pub state: SessionHandle,
    /// True when no usable session existed and a fresh one was made
    pub created: bool,
}

pub struct SessionRegistry {
    sessions: Mutex<Sessions>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Duration::from_secs(config.idle_timeout_secs),
            config.max_sessions,
        )
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Look up `id`, or start a new empty session.
    ///
    /// Unknown or expired ids are never adopted; the caller gets a new id
    /// and must send it back to the client.
    pub fn resolve(&self, id: Option<&str>) -> Resolved {
        self.resolve_at(id, Instant::now())
    }

    fn resolve_at(&self, id: Option<&str>, now: Instant) -> Resolved {
        let mut guard = self.lock();
        let sessions = &mut *guard;

        let sweep_due = sessions
            .last_sweep
            .map_or(true, |at| now.saturating_duration_since(at) >= self.sweep_interval());
        if sweep_due {
            self.sweep(&mut sessions.entries, now);
            sessions.last_sweep = Some(now);
        }

        if let Some(id) = id {
            if let Some(entry) = sessions.entries.get_mut(id) {
                if !self.is_expired(entry, now) {
                    entry.last_seen = now;
                    return Resolved {
                        id: id.to_string(),
                        state: Arc::clone(&entry.state),
                        created: false,
                    };
                }
                sessions.entries.remove(id);
            }
        }

        let entries = &mut sessions.entries;
        if entries.len() >= self.max_sessions {
            self.sweep(entries, now);
        }
        if entries.len() >= self.max_sessions {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
                tracing::debug!(session = %key, "evicted least recently used session");
            }
        }

        let id = Uuid::new_v4().to_string();
        let state = SessionHandle::default();
        entries.insert(
            id.clone(),
            Entry {
                state: Arc::clone(&state),
                last_seen: now,
            },
        );
        tracing::debug!(session = %id, "created session");

        Resolved {
            id,
            state,
            created: true,
        }
    }

    fn sweep_interval(&self) -> Duration {
        self.idle_timeout.min(SWEEP_INTERVAL)
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) > self.idle_timeout
    }

    fn sweep(&self, entries: &mut HashMap<String, Entry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, e| !self.is_expired(e, now));
        if entries.len() < before {
            tracing::debug!(expired = before - entries.len(), "dropped idle sessions");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sessions> {
        // A panic while holding the map lock cannot leave it half-updated
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
