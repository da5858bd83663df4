use crate::core::session::state::Identity;
use crate::domain::config::ServerConfig;
use crate::domain::error::FintrackResult;
use crate::infrastructure::credentials::CredentialStore;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Auth endpoint paths on the finance backend
pub const ME_PATH: &str = "/api/auth/me";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// API request errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}")]
    Status {
        status: StatusCode,
        /// Server-supplied error message, if the body carried one
        message: Option<String>,
    },
}

/// Credential payload for login and registration
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success shape shared by all auth endpoints
#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: Identity,
}

/// Error body shape emitted by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the finance backend auth endpoints
///
/// Every request carries a JSON content type and the stored credential
/// cookie. Successful login/register responses replace the stored cookie
/// with whatever the server sets.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl ApiClient {
    /// Create a new API client for the given server configuration
    pub fn new(config: &ServerConfig, credentials: Arc<CredentialStore>) -> FintrackResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Probe the identity-check endpoint with the stored credential
    pub async fn current_identity(&self) -> Result<Identity, ApiError> {
        let request = self.prepare(self.http.get(self.url(ME_PATH)));
        let response = request.send().await?;
        self.parse_identity(response).await
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        self.authenticate(LOGIN_PATH, email, password).await
    }

    /// Create a new account with email and password
    pub async fn register(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        self.authenticate(REGISTER_PATH, email, password).await
    }

    /// Invalidate the server-side session
    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self.prepare(self.http.post(self.url(LOGOUT_PATH)));
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: response.status(),
                message: None,
            })
        }
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, ApiError> {
        let request = self
            .prepare(self.http.post(self.url(path)))
            .json(&CredentialsRequest { email, password });
        let response = request.send().await?;

        if response.status().is_success() {
            self.capture_cookie(&response);
        }
        self.parse_identity(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, "application/json");
        match self.credentials.cookie() {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    /// Persist the session cookie set by the server
    fn capture_cookie(&self, response: &Response) {
        let pairs: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(|pair| pair.trim().to_string())
            .filter(|pair| !pair.is_empty())
            .collect();

        if pairs.is_empty() {
            return;
        }

        let cookie = pairs.join("; ");
        debug!("Captured session cookie from response");
        if let Err(e) = self.credentials.store(cookie) {
            // Persistence failure only costs the session on the next run
            warn!("Failed to persist session cookie: {}", e);
        }
    }

    async fn parse_identity(&self, response: Response) -> Result<Identity, ApiError> {
        let status = response.status();

        if status.is_success() {
            let body: AuthResponse = response.json().await?;
            return Ok(body.user);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .map(|body| body.message);

        Err(ApiError::Status { status, message })
    }
}
