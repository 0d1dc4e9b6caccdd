//! Domain entities - Core business objects with no external dependencies

pub mod channel;
pub mod event;
pub mod joke;
pub mod state;
pub mod user;

pub use channel::{Channel, ConversationKind};
pub use event::{EventKind, InboundEvent};
pub use joke::Joke;
pub use state::BotState;
pub use user::User;
