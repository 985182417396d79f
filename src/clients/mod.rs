//! Boundary contracts with the collaborators that own transport and registries.
//!
//! The engine never talks to the network itself. It consumes these traits,
//! which the [`store`](crate::store) module implements in memory and a real
//! HTTP client would implement against the delivery API.

pub mod error;
pub mod link_resolver;

pub use error::*;
pub use link_resolver::*;
