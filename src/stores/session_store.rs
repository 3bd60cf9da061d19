use crate::core::error::SessionError;
use crate::models::enrollment::FormVariant;
use crate::models::role::UserRole;
use crate::utils::ids::{is_valid_session_id, new_session_id};
use crate::utils::time::is_expired;
use crate::wizard::controller::Wizard;
use dashmap::DashMap;

/// Per-tab console state: the role switch and the enrollment wizard.
#[derive(Debug, Clone)]
pub struct UiSession {
    pub id: String,
    pub role: UserRole,
    pub wizard: Wizard,
    pub last_seen: i64,
}

/// In-memory store of open UI sessions
pub struct SessionStore {
    sessions: DashMap<String, UiSession>,
    capacity: usize,
    form_variant: FormVariant,
    iris_online: bool,
}

impl SessionStore {
    pub fn new(capacity: usize, form_variant: FormVariant, iris_online: bool) -> Self {
        Self {
            sessions: DashMap::with_capacity(capacity.min(1024)),
            capacity,
            form_variant,
            iris_online,
        }
    }

    /// Open a new session with the default role and a fresh wizard
    pub fn create(&self, now: i64) -> Result<UiSession, SessionError> {
        if self.sessions.len() >= self.capacity {
            return Err(SessionError::CapacityReached(self.sessions.len()));
        }

        let session = UiSession {
            id: new_session_id(),
            role: UserRole::default(),
            wizard: self.new_wizard(),
            last_seen: now,
        };
        self.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    pub fn new_wizard(&self) -> Wizard {
        Wizard::new(self.form_variant, self.iris_online)
    }

    /// Run `f` against a session, refreshing its last-seen time
    pub fn with_session<T>(
        &self,
        id: &str,
        now: i64,
        f: impl FnOnce(&mut UiSession) -> T,
    ) -> Result<T, SessionError> {
        if !is_valid_session_id(id) {
            return Err(SessionError::NotFound(id.to_string()));
        }

        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        entry.last_seen = now;
        Ok(f(entry.value_mut()))
    }

    pub fn get(&self, id: &str) -> Option<UiSession> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Drop sessions idle for longer than `idle_timeout` seconds.
    /// Returns the number removed.
    pub fn sweep_idle(&self, idle_timeout: i64, now: i64) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !is_expired(session.last_seen, idle_timeout, now));
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
