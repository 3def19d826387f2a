//! kt-core: stable foundation for kafka-topology.
//!
//! Contains:
//! - ids (node/edge identifiers and the one place their string format lives)
//! - error (shared error types)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{KtError, KtResult};
pub use ids::*;
