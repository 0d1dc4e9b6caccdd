//! Domain traits - Abstractions for infrastructure implementations

pub mod session;
pub mod store;

pub use session::ChatSession;
pub use store::JokeStore;
