use serde::{Deserialize, Serialize};

/// Minimal user record returned by the backend on successful
/// authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub id: String,
    /// Email address used to authenticate
    pub email: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
    /// Roles granted to the user
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    /// Check whether the identity carries at least one of the given roles
    pub fn has_any_role(&self, roles: &[String]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }
}

/// Session readiness and presence
///
/// `Unresolved` exists only between process start and the completion of
/// the bootstrap probe. Once resolved, the status moves only between
/// `Absent` and `Present` through explicit login/logout actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The bootstrap probe has not resolved yet
    Unresolved,
    /// Checked, no authenticated user
    Absent,
    /// Checked, a user is authenticated
    Present,
}

/// Immutable view of the session published on every mutation
///
/// Invariant: `identity` is `Some` exactly when `status` is `Present`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current readiness and presence
    pub status: SessionStatus,
    /// Authenticated identity, if any
    pub identity: Option<Identity>,
}

impl SessionSnapshot {
    /// Initial snapshot before the bootstrap probe resolves
    pub fn unresolved() -> Self {
        Self {
            status: SessionStatus::Unresolved,
            identity: None,
        }
    }

    /// Snapshot for a resolved session with no authenticated user
    pub fn absent() -> Self {
        Self {
            status: SessionStatus::Absent,
            identity: None,
        }
    }

    /// Snapshot for a resolved session with an authenticated user
    pub fn present(identity: Identity) -> Self {
        Self {
            status: SessionStatus::Present,
            identity: Some(identity),
        }
    }

    /// Check if the bootstrap probe has resolved
    pub fn is_resolved(&self) -> bool {
        !matches!(self.status, SessionStatus::Unresolved)
    }

    /// Check if a user is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Present)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::unresolved()
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Unresolved => write!(f, "Unresolved"),
            SessionStatus::Absent => write!(f, "Absent"),
            SessionStatus::Present => write!(f, "Present"),
        }
    }
}
