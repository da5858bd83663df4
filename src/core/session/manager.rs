use crate::core::session::state::SessionSnapshot;
use crate::core::session::store::SessionStore;
use crate::domain::error::{FintrackError, FintrackResult};
use crate::infrastructure::credentials::CredentialStore;
use crate::infrastructure::http::{ApiClient, ApiError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";
const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed";

/// Session manager - single source of truth for "who is logged in"
///
/// All four mutations of the session value go through this type; route
/// guards and display code only read published snapshots.
pub struct SessionManager {
    client: ApiClient,
    credentials: Arc<CredentialStore>,
    store: SessionStore,
    login_in_flight: AtomicBool,
    register_in_flight: AtomicBool,
}

impl SessionManager {
    /// Create a new session manager in the unresolved state
    pub fn new(client: ApiClient, credentials: Arc<CredentialStore>) -> Self {
        Self {
            client,
            credentials,
            store: SessionStore::new(),
            login_in_flight: AtomicBool::new(false),
            register_in_flight: AtomicBool::new(false),
        }
    }

    /// Subscribe to session snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.store.subscribe()
    }

    /// Get the current session snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    /// Probe the backend for an existing session
    ///
    /// Invoked once at process start. Any failure collapses to an absent
    /// session; the readiness flag always resolves unless the token is
    /// cancelled first, in which case no state is mutated.
    pub async fn bootstrap(&self, cancel: &CancellationToken) {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Bootstrap probe cancelled before completion");
                return;
            }
            result = self.client.current_identity() => result,
        };

        match result {
            Ok(identity) => {
                info!("Existing session found for {}", identity.email);
                self.store.set_present(identity);
            }
            Err(e) => {
                debug!("Bootstrap probe found no session: {}", e);
                self.store.set_absent();
            }
        }
    }

    /// Authenticate with email and password
    ///
    /// A call while another login is in flight is a no-op. Failures carry
    /// the server-supplied message for display.
    pub async fn login(&self, email: &str, password: &str) -> FintrackResult<()> {
        if self.login_in_flight.swap(true, Ordering::SeqCst) {
            debug!("Login already in flight, ignoring");
            return Ok(());
        }

        let result = self.client.login(email, password).await;
        self.login_in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(identity) => {
                info!("Logged in as {}", identity.email);
                self.store.set_present(identity);
                Ok(())
            }
            Err(ApiError::Status { message, .. }) => Err(FintrackError::Authentication {
                message: message.unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string()),
            }),
            Err(ApiError::Transport(e)) => Err(FintrackError::Transport(e)),
        }
    }

    /// Create a new account with email and password
    ///
    /// Same contract as `login`, against the registration endpoint.
    pub async fn register(&self, email: &str, password: &str) -> FintrackResult<()> {
        if self.register_in_flight.swap(true, Ordering::SeqCst) {
            debug!("Registration already in flight, ignoring");
            return Ok(());
        }

        let result = self.client.register(email, password).await;
        self.register_in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(identity) => {
                info!("Registered as {}", identity.email);
                self.store.set_present(identity);
                Ok(())
            }
            Err(ApiError::Status { message, .. }) => Err(FintrackError::Registration {
                message: message.unwrap_or_else(|| REGISTER_FALLBACK_MESSAGE.to_string()),
            }),
            Err(ApiError::Transport(e)) => Err(FintrackError::Transport(e)),
        }
    }

    /// End the session
    ///
    /// The remote call is best-effort; the local session and the stored
    /// credential clear no matter what, so the user never stays trapped
    /// in an authenticated state with a dead session.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!("Logout request failed, clearing local session anyway: {}", e);
        }

        if let Err(e) = self.credentials.clear() {
            warn!("Failed to clear stored credential: {}", e);
        }

        info!("Logged out");
        self.store.set_absent();
    }
}
