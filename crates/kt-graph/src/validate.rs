//! Graph validation logic.

use std::collections::{HashMap, HashSet};

use kt_core::{EdgeId, NodeId, consume_edge_id, produce_edge_id};

use crate::error::GraphError;
use crate::graph::{Edge, EdgeKind, Node, NodeKind};

/// Validate the graph structure: unique ids, edge endpoints exist and have the
/// right kind, edge ids match their role, every service is referenced.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> Result<(), GraphError> {
    let mut kinds: HashMap<&NodeId, &NodeKind> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if kinds.insert(&node.id, &node.kind).is_some() {
            return Err(GraphError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    let mut edge_ids: HashSet<&EdgeId> = HashSet::with_capacity(edges.len());
    let mut referenced: HashSet<&NodeId> = HashSet::new();

    for edge in edges {
        if !edge_ids.insert(&edge.id) {
            return Err(GraphError::DuplicateEdge {
                edge: edge.id.clone(),
            });
        }

        for endpoint in [&edge.source, &edge.target] {
            if !kinds.contains_key(endpoint) {
                return Err(GraphError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }

        let service = edge.service();
        if !matches!(kinds[service], NodeKind::Service) {
            return Err(GraphError::WrongEndpointKind {
                edge: edge.id.clone(),
                node: service.clone(),
                expected: "service",
            });
        }
        let topic = edge.topic();
        if !matches!(kinds[topic], NodeKind::Topic { .. }) {
            return Err(GraphError::WrongEndpointKind {
                edge: edge.id.clone(),
                node: topic.clone(),
                expected: "topic",
            });
        }

        let expected = match edge.kind {
            EdgeKind::Produces => produce_edge_id(&edge.source, &edge.target),
            EdgeKind::Consumes => consume_edge_id(&edge.source, &edge.target),
        };
        if edge.id != expected {
            return Err(GraphError::EdgeIdMismatch {
                edge: edge.id.clone(),
                expected,
            });
        }

        referenced.insert(service);
    }

    for node in nodes.iter().filter(|n| n.is_service()) {
        if !referenced.contains(&node.id) {
            return Err(GraphError::OrphanService {
                node: node.id.clone(),
            });
        }
    }

    Ok(())
}
