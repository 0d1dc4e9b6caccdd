//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (Joke, Channel, User, InboundEvent)
//! - Traits: Abstractions for infrastructure (ChatSession, JokeStore)

pub mod entities;
pub mod traits;
