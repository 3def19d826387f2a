//! Per-node adjacency index.
//!
//! Maps node ids to contiguous indices (graph order) and keeps compact
//! incoming/outgoing edge lists so edge queries are `O(degree)` instead of a
//! scan over every edge.

use std::collections::HashMap;

use kt_core::{KtError, KtResult, NodeId};

use crate::error::GraphError;
use crate::graph::{Edge, EdgeKind, Graph};

/// Adjacency index built once per graph.
///
/// Edge lists hold indices into `graph.edges()`, in edge order.
#[derive(Debug, Clone)]
pub struct Adjacency {
    /// NodeId -> index into `graph.nodes()`.
    node_to_idx: HashMap<NodeId, usize>,

    /// Node i's outgoing edges are out_edges[out_offsets[i]..out_offsets[i+1]].
    out_offsets: Vec<usize>,
    out_edges: Vec<usize>,

    /// Same layout for incoming edges.
    in_offsets: Vec<usize>,
    in_edges: Vec<usize>,
}

impl Adjacency {
    /// Build the index, failing on duplicate node ids or edges whose
    /// endpoints are missing from the graph.
    pub fn from_graph(graph: &Graph) -> Result<Self, GraphError> {
        let nodes = graph.nodes();
        let edges = graph.edges();

        let mut node_to_idx = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_to_idx.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut endpoints = Vec::with_capacity(edges.len());
        for edge in edges {
            let source = lookup(&node_to_idx, edge, &edge.source)?;
            let target = lookup(&node_to_idx, edge, &edge.target)?;
            endpoints.push((source, target));
        }

        let (out_offsets, out_edges) =
            Self::build_lists(nodes.len(), endpoints.iter().map(|&(s, _)| s));
        let (in_offsets, in_edges) =
            Self::build_lists(nodes.len(), endpoints.iter().map(|&(_, t)| t));

        Ok(Self {
            node_to_idx,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        })
    }

    /// Counting sort of edge indices by owning node: offsets + flat list.
    fn build_lists(
        node_count: usize,
        owners: impl Iterator<Item = usize> + Clone,
    ) -> (Vec<usize>, Vec<usize>) {
        let mut offsets = vec![0; node_count + 1];
        for owner in owners.clone() {
            offsets[owner + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut flat = vec![0; offsets[node_count]];
        for (edge_idx, owner) in owners.enumerate() {
            flat[cursor[owner]] = edge_idx;
            cursor[owner] += 1;
        }

        (offsets, flat)
    }

    /// Number of nodes in the index.
    pub fn node_count(&self) -> usize {
        self.node_to_idx.len()
    }

    /// Get the contiguous index for a node id.
    pub fn node_idx(&self, id: &str) -> KtResult<usize> {
        self.node_to_idx
            .get(id)
            .copied()
            .ok_or_else(|| KtError::NotFound {
                what: "Node",
                id: id.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_to_idx.contains_key(id)
    }

    /// Indices of edges leaving node `idx` (empty if out of bounds).
    pub fn outgoing(&self, idx: usize) -> &[usize] {
        Self::slice(&self.out_offsets, &self.out_edges, idx)
    }

    /// Indices of edges entering node `idx` (empty if out of bounds).
    pub fn incoming(&self, idx: usize) -> &[usize] {
        Self::slice(&self.in_offsets, &self.in_edges, idx)
    }

    fn slice<'s>(offsets: &[usize], flat: &'s [usize], idx: usize) -> &'s [usize] {
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }

    /// Does node `idx` have an outgoing edge of `kind`?
    pub fn has_outgoing(&self, graph: &Graph, idx: usize, kind: EdgeKind) -> bool {
        self.outgoing(idx)
            .iter()
            .any(|&e| graph.edges()[e].kind == kind)
    }

    /// Does node `idx` have an incoming edge of `kind`?
    pub fn has_incoming(&self, graph: &Graph, idx: usize, kind: EdgeKind) -> bool {
        self.incoming(idx)
            .iter()
            .any(|&e| graph.edges()[e].kind == kind)
    }
}

fn lookup(
    node_to_idx: &HashMap<NodeId, usize>,
    edge: &Edge,
    endpoint: &NodeId,
) -> Result<usize, GraphError> {
    node_to_idx
        .get(endpoint)
        .copied()
        .ok_or_else(|| GraphError::DanglingEdge {
            edge: edge.id.clone(),
            node: endpoint.clone(),
        })
}
