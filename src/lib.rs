//! # Delivery Resolver
//!
//! > **Localized resources and lazy link resolution for a headless CMS
//! > delivery API.**
//!
//! Delivery payloads carry entries whose fields are stored per locale and
//! whose links point at other entries and assets by id. This crate hydrates
//! those payloads against their content types, reads fields through a
//! locale fallback chain, and exchanges links for the resources they point
//! at, fetching each target at most once per entry.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Plain serde types: system properties, links, content types and fields,
//! locales and the validated [`LocaleGraph`](model::LocaleGraph), decoded
//! field values and API dates.
//!
//! ### 2. The Engine ([`engine`], [`localized`])
//! - **Role**: Field reads, the fallback walk, link resolution and JSON
//!   serialization.
//! - **Key items**: [`Entry`](engine::Entry), [`Hydrator`](engine::Hydrator),
//!   [`LocalizedResource`](localized::LocalizedResource).
//!
//! ### 3. The Boundary ([`clients`])
//! The engine never fetches anything itself. It consumes
//! [`LinkResolver`](clients::LinkResolver) and the schema provider traits.
//! [`MockResolver`](engine::mock::MockResolver) stands in for them in tests.
//!
//! ### 4. The Backend ([`store`], [`cache`], [`query`])
//! An actor-backed in-memory content store implementing the boundary
//! traits, a schema cache with warm-up, and the delivery query builder.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`DeliverySystem`](lifecycle::DeliverySystem) starts the store, wires the
//! hydrator to it and shuts it down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cache;
pub mod clients;
pub mod engine;
pub mod lifecycle;
pub mod localized;
pub mod model;
pub mod query;
pub mod store;
