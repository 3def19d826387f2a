//! Graph-specific error types.

use kt_core::{EdgeId, KtError, NodeId};
use thiserror::Error;

/// Graph invariant violations.
///
/// Any of these coming out of `GraphBuilder::build` means the input broke a
/// caller contract (duplicate topic or context names); coming out of
/// `Adjacency::from_graph` for a hand-made graph it means the graph is corrupt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share the same id.
    #[error("Duplicate node id {id}")]
    DuplicateNode { id: NodeId },

    /// An edge endpoint names a node that doesn't exist.
    #[error("Edge {edge} refers to non-existent node {node}")]
    DanglingEdge { edge: EdgeId, node: NodeId },

    /// An edge connects the wrong kinds of node for its role.
    #[error("Edge {edge}: {node} should be a {expected} node")]
    WrongEndpointKind {
        edge: EdgeId,
        node: NodeId,
        expected: &'static str,
    },

    /// An edge id doesn't match the id derived from its role and endpoints.
    #[error("Edge id {edge} should be {expected}")]
    EdgeIdMismatch { edge: EdgeId, expected: EdgeId },

    /// Two edges share the same id.
    #[error("Duplicate edge id {edge}")]
    DuplicateEdge { edge: EdgeId },

    /// A service node that no edge touches.
    #[error("Service {node} is not referenced by any topic")]
    OrphanService { node: NodeId },
}

impl From<GraphError> for KtError {
    fn from(err: GraphError) -> Self {
        KtError::Invariant {
            what: err.to_string(),
        }
    }
}
