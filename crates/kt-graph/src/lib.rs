//! kt-graph: topology model and graph construction for kafka-topology.
//!
//! Provides:
//! - Validated input records (`Topic`, `ContextTopics`)
//! - Core graph data structures (`Node`, `Edge`, `Graph`)
//! - `GraphBuilder` turning one or many contexts into a single graph
//! - Per-node adjacency index for linear-time edge queries
//!
//! # Example
//!
//! ```
//! use kt_graph::{build_graph, ContextTopics, Topic};
//!
//! let orders = Topic::new("orders")
//!     .with_producers(["checkout"])
//!     .with_consumers(["billing", "shipping"]);
//! let graph = build_graph(&[ContextTopics::new("shop", vec![orders])]).unwrap();
//!
//! assert_eq!(graph.nodes().len(), 4);
//! assert_eq!(graph.edges().len(), 3);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod topic;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{GraphBuilder, IdScope, build_graph};
pub use error::GraphError;
pub use graph::{Edge, EdgeKind, Graph, Node, NodeKind};
pub use indexing::Adjacency;
pub use topic::{ContextTopics, DEFAULT_PARTITIONS, Topic};
