//! Fintrack Library
//!
//! Client library for the Fintrack personal finance backend providing
//! cookie-session lifecycle management and route-guard decisions.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::guard::{evaluate, evaluate_with_roles, GuardDecision, RouteGuard};
pub use crate::core::session::{
    Identity, SessionManager, SessionSnapshot, SessionStatus, SessionStore,
};
pub use crate::domain::config::FintrackConfig;
pub use crate::domain::error::{FintrackError, FintrackResult};
pub use crate::infrastructure::credentials::CredentialStore;
pub use crate::infrastructure::http::ApiClient;
