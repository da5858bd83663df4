use crate::core::session::state::SessionSnapshot;
use tokio::sync::watch;

/// Login entry point for unauthenticated redirects
pub const LOGIN_PATH: &str = "/login";
/// Target for authenticated users missing a required role
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Outcome of a route-guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The bootstrap probe has not resolved; render nothing yet
    Pending,
    /// Access granted
    Allow,
    /// Access denied; redirect, remembering the requested location
    Redirect {
        /// Redirect target
        to: String,
        /// Originally requested location, for post-login return
        from: String,
    },
}

impl GuardDecision {
    fn redirect(to: &str, from: &str) -> Self {
        Self::Redirect {
            to: to.to_string(),
            from: from.to_string(),
        }
    }
}

impl std::fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardDecision::Pending => write!(f, "Pending"),
            GuardDecision::Allow => write!(f, "Allow"),
            GuardDecision::Redirect { to, from } => {
                write!(f, "Redirect to {} (from {})", to, from)
            }
        }
    }
}

/// Decide whether a protected location may render for the given session
/// snapshot
///
/// While unresolved the answer is always `Pending` - no protected content
/// and no redirect, so an unauthenticated flash is impossible.
pub fn evaluate(snapshot: &SessionSnapshot, requested: &str) -> GuardDecision {
    if !snapshot.is_resolved() {
        return GuardDecision::Pending;
    }

    if snapshot.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::redirect(LOGIN_PATH, requested)
    }
}

/// Like `evaluate`, additionally requiring at least one of the given
/// roles
///
/// An empty role list behaves exactly like `evaluate`.
pub fn evaluate_with_roles(
    snapshot: &SessionSnapshot,
    requested: &str,
    required_roles: &[String],
) -> GuardDecision {
    match evaluate(snapshot, requested) {
        GuardDecision::Allow if !required_roles.is_empty() => match &snapshot.identity {
            Some(identity) if identity.has_any_role(required_roles) => GuardDecision::Allow,
            _ => GuardDecision::redirect(UNAUTHORIZED_PATH, requested),
        },
        decision => decision,
    }
}

/// Guard bound to a session subscription
///
/// Wraps a snapshot receiver so consumers can block until the session
/// resolves and re-check on every published snapshot.
pub struct RouteGuard {
    rx: watch::Receiver<SessionSnapshot>,
}

impl RouteGuard {
    /// Create a guard from a session subscription
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self { rx }
    }

    /// Check the requested location against the current snapshot
    pub fn check(&self, requested: &str) -> GuardDecision {
        evaluate(&self.rx.borrow(), requested)
    }

    /// Check the requested location, requiring at least one of the roles
    pub fn check_with_roles(&self, requested: &str, required_roles: &[String]) -> GuardDecision {
        evaluate_with_roles(&self.rx.borrow(), requested, required_roles)
    }

    /// Suspend until the session resolves, returning the resolved
    /// snapshot
    pub async fn wait_until_resolved(&mut self) -> SessionSnapshot {
        loop {
            let snapshot = self.rx.borrow_and_update().clone();
            if snapshot.is_resolved() {
                return snapshot;
            }

            // A closed channel means the manager is gone; surface the
            // last snapshot rather than hanging
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}
