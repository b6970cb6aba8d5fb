// src/usage/store.rs — Session storage
//
// The map lock is held only for lookups and inserts; counter mutation
// happens under the per-session mutex so unrelated sessions never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use super::session::Session;

/// Shared, individually locked session record.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Keyed session storage. The in-memory implementation is the only one today;
/// the trait keeps the governor independent of where sessions live.
pub trait SessionStore: Send + Sync {
    fn get(&self, token: &str) -> Option<SessionHandle>;

    /// Insert `session` unless its token is already present. Returns the
    /// handle that is stored afterwards.
    fn insert_if_absent(&self, session: Session) -> SessionHandle;

    fn remove(&self, token: &str) -> Option<SessionHandle>;

    /// Tokens of every stored session, in no particular order.
    fn tokens(&self) -> Vec<String>;

    fn len(&self) -> usize {
        self.tokens().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock a session, recovering the data if another holder panicked.
pub fn lock(handle: &SessionHandle) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, token: &str) -> Option<SessionHandle> {
        let map = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.get(token).cloned()
    }

    fn insert_if_absent(&self, session: Session) -> SessionHandle {
        let mut map = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(session.token.clone())
            .or_insert_with(|| Arc::new(Mutex::new(session)))
            .clone()
    }

    fn remove(&self, token: &str) -> Option<SessionHandle> {
        let mut map = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.remove(token)
    }

    fn tokens(&self) -> Vec<String> {
        let map = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
