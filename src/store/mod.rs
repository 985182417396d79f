//! In-memory delivery backend.
//!
//! A [`StoreActor`] owns hydrated resources, content types and locale graphs;
//! [`StoreClient`] implements the resolver and provider contracts on top of
//! it. Useful for tests, demos and for serving pre-fetched content.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::*;
pub use client::*;
pub use error::*;
