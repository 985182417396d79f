//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber for the whole
//! delivery system. Levels are taken from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: actor startup, shutdown and final sizes
//! - **Field reads**: one span per [`Entry::get_field`](crate::engine::Entry::get_field)
//!   carrying `entry_id`, `locale` and `as_id`
//! - **Link resolution**: cache hits and misses with `link_type` and `link_id`
//! - **Dropped links**: a `WARN` for every missing member of a link array
//!
//! ## Usage Examples
//!
//! ```bash
//! # Store lifecycle and cache warm-up only
//! RUST_LOG=info cargo run
//!
//! # Every field read and link cache decision
//! RUST_LOG=debug cargo run
//!
//! # Only the engine
//! RUST_LOG=delivery_resolver::engine=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a link field read looks like:
//!
//! ```text
//! DEBUG get_field{entry_id=nyancat locale=Some("tlh") as_id=false}: Link cache miss link_type=Entry link_id=happycat
//! DEBUG get_field{entry_id=nyancat locale=Some("tlh") as_id=false}: Link cache hit link_type=Entry link_id=happycat
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
