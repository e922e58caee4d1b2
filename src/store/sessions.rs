use std::collections::HashMap;
use std::future::{ready, Future};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng as _};

type SessionState = HashMap<String, String>;

/// Server-side session store: an ephemeral map from session key to session
/// state, shared by all workers. Deleting an entry invalidates every copy of
/// the matching cookie, and nothing survives a process restart. The cookie
/// itself only carries the signed key.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl MemorySessionStore {
    pub fn new() -> MemorySessionStore {
        MemorySessionStore::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SessionState>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SessionState>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 64 alphanumeric characters, as recommended for session id entropy.
fn fresh_key() -> SessionKey {
    let value: String = std::iter::repeat(())
        .map(|()| char::from(OsRng.sample(Alphanumeric)))
        .take(64)
        .collect();

    value
        .try_into()
        .expect("a 64 character key is within the cookie size limit")
}

impl SessionStore for MemorySessionStore {
    fn load(
        &self,
        session_key: &SessionKey,
    ) -> impl Future<Output = Result<Option<SessionState>, LoadError>> {
        ready(Ok(self.read().get(session_key.as_ref()).cloned()))
    }

    fn save(
        &self,
        session_state: SessionState,
        _ttl: &Duration,
    ) -> impl Future<Output = Result<SessionKey, SaveError>> {
        let session_key = fresh_key();
        self.write()
            .insert(session_key.as_ref().to_owned(), session_state);
        ready(Ok(session_key))
    }

    fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        _ttl: &Duration,
    ) -> impl Future<Output = Result<SessionKey, UpdateError>> {
        self.write()
            .insert(session_key.as_ref().to_owned(), session_state);
        ready(Ok(session_key))
    }

    // Sessions last for the browser session; TTLs are not tracked.
    fn update_ttl(
        &self,
        _session_key: &SessionKey,
        _ttl: &Duration,
    ) -> impl Future<Output = Result<(), anyhow::Error>> {
        ready(Ok(()))
    }

    fn delete(&self, session_key: &SessionKey) -> impl Future<Output = Result<(), anyhow::Error>> {
        self.write().remove(session_key.as_ref());
        ready(Ok(()))
    }
}
