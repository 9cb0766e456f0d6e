//! Session State Store: the single source of truth for who is logged in.

pub mod state;
pub mod store;

pub use state::{Session, SessionPhase};
pub use store::SessionStore;
