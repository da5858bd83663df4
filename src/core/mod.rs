// Core module - Session lifecycle and route guarding
pub mod guard;
pub mod session;
