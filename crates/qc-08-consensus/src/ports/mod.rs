//! Ports layer (Hexagonal Architecture)
//!
//! Inbound: what collaborators may ask of the validator.
//! Outbound: what the validator needs from its environment.

mod inbound;
mod outbound;

pub use inbound::*;
pub use outbound::*;
