//! Message handling - Event filtering and routing

pub mod filter;
pub mod router;

pub use filter::{Addressing, Rejection};
pub use router::{MessageRouter, RouteOutcome};
