//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Startup sequence (identity, first-run check)
//! - Errors: Domain-specific errors
//! - Messaging: Event filters and the message router

pub mod errors;
pub mod services;
pub mod messaging;
