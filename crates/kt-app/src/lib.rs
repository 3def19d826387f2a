//! Shared application service layer for kafka-topology.
//!
//! Loads topic declarations from a source, builds the topology graph and
//! lays it out, reporting which contexts loaded and which were skipped.

pub mod config_service;
pub mod error;
pub mod topology_service;

pub use config_service::load_layout_config;
pub use error::{AppError, AppResult};
pub use topology_service::{
    ContextSummary, FailureSummary, LoadOptions, LoadReport, LoadStatus, TopologyView,
    list_contexts, load_from_dir, load_topology, validate_contracts,
};
