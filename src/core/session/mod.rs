// Session module - Session lifecycle management
pub mod manager;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use state::{Identity, SessionSnapshot, SessionStatus};
pub use store::SessionStore;
