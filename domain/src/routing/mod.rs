//! Routing domain
//!
//! [`decision::RoutingDecision`] and the boundary parser that turns a
//! reasoning reply into one.

pub mod decision;
pub mod parsing;

pub use decision::RoutingDecision;
pub use parsing::parse_routing_reply;
