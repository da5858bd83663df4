use crate::core::session::state::{Identity, SessionSnapshot};
use tokio::sync::watch;
use tracing::debug;

/// Single-writer store for the session snapshot
///
/// The session manager is the only writer; route guards and display code
/// subscribe and re-evaluate on every published snapshot. Readers never
/// mutate.
pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Create a new store in the unresolved state
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionSnapshot::unresolved());
        Self { tx }
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Mark the session present with the given identity
    pub(crate) fn set_present(&self, identity: Identity) {
        debug!("Session resolved: present ({})", identity.email);
        self.tx.send_replace(SessionSnapshot::present(identity));
    }

    /// Mark the session absent
    pub(crate) fn set_absent(&self) {
        debug!("Session resolved: absent");
        self.tx.send_replace(SessionSnapshot::absent());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::state::SessionStatus;

    fn test_identity() -> Identity {
        Identity {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            name: None,
            roles: Vec::new(),
        }
    }

    #[test]
    fn test_store_starts_unresolved() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot().status, SessionStatus::Unresolved);
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set_present(test_identity());
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_authenticated());

        store.set_absent();
        rx.changed().await.unwrap();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.status, SessionStatus::Absent);
        assert!(snapshot.identity.is_none());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = SessionStore::new();
        let before = store.snapshot();
        store.set_present(test_identity());

        // The earlier snapshot is unaffected by later mutations
        assert_eq!(before.status, SessionStatus::Unresolved);
        assert_eq!(store.snapshot().status, SessionStatus::Present);
    }
}
