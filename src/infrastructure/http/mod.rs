// HTTP module - Backend API client
pub mod client;

pub use client::{ApiClient, ApiError};
