//! Schema cache: storage boundary, warm-up and cache-backed providers.
//!
//! Warming writes the locale graph and every content type of a space so a
//! later process can hydrate entries without asking the backend for schemas.

pub mod error;
pub mod provider;
pub mod store;
pub mod warmer;

pub use error::*;
pub use provider::*;
pub use store::*;
pub use warmer::*;
