// Domain module - Errors and configuration types
pub mod config;
pub mod error;
