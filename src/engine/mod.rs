//! # Resolution Engine
//!
//! Localized field access, lazy link resolution and wire serialization for
//! hydrated resources.
//!
//! # Main Components
//!
//! - [`Entry`] - A hydrated entry or asset with typed, localized field reads
//! - [`LinkCache`] - Per-entry, grow-only, single-flight cache of resolved links
//! - [`Hydrator`] - Builds entries from raw payloads using the schema providers
//! - [`EntryError`] - Everything a read or serialization can fail with
//!
//! # Testing
//!
//! See [`mock`] for a resolver stub that counts calls.

pub mod cache;
pub mod entry;
pub mod error;
pub mod hydrate;
mod json;
pub mod mock;

pub use cache::LinkCache;
pub use entry::{Entry, EntryBuilder, FieldOptions, RawFields, Resolved};
pub use error::EntryError;
pub use hydrate::Hydrator;
