//! Layout error types.

use kt_core::{EdgeId, NodeId};
use kt_graph::GraphError;
use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The graph holds an edge to a node it doesn't contain. The builder
    /// never produces this, so it signals a corrupted graph.
    #[error("Edge {edge} refers to non-existent node {node}")]
    DanglingEdge { edge: EdgeId, node: NodeId },

    #[error("Invalid graph: {0}")]
    Graph(GraphError),

    #[error("Invalid layout config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl From<GraphError> for LayoutError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DanglingEdge { edge, node } => LayoutError::DanglingEdge { edge, node },
            other => LayoutError::Graph(other),
        }
    }
}
