//! Wiring and observability for a running delivery system.

pub mod delivery_system;
pub mod tracing;

pub use delivery_system::DeliverySystem;
