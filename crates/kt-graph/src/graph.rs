//! Core graph data structures.

use kt_core::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

use crate::topic::DEFAULT_PARTITIONS;

/// What a node stands for.
///
/// Serialized inline into the node as `"type": "topic" | "service"`; topic
/// nodes also carry their partition count and compaction flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Topic {
        #[serde(default = "default_partitions")]
        partitions: u32,
        #[serde(default, rename = "logCompaction")]
        log_compaction: bool,
    },
    Service,
}

fn default_partitions() -> u32 {
    DEFAULT_PARTITIONS
}

/// Role of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// service -> topic
    Produces,
    /// topic -> service
    Consumes,
}

/// A topic or service in the topology graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Unprefixed entity name.
    pub label: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Node {
    pub fn is_topic(&self) -> bool {
        matches!(self.kind, NodeKind::Topic { .. })
    }

    pub fn is_service(&self) -> bool {
        matches!(self.kind, NodeKind::Service)
    }

    /// Partition count of a topic node, `None` for services.
    pub fn partitions(&self) -> Option<u32> {
        match self.kind {
            NodeKind::Topic { partitions, .. } => Some(partitions),
            NodeKind::Service => None,
        }
    }
}

/// A directed produce/consume relation between a service and a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Edge {
    /// The service end of the edge, whichever direction it points.
    pub fn service(&self) -> &NodeId {
        match self.kind {
            EdgeKind::Produces => &self.source,
            EdgeKind::Consumes => &self.target,
        }
    }

    /// The topic end of the edge, whichever direction it points.
    pub fn topic(&self) -> &NodeId {
        match self.kind {
            EdgeKind::Produces => &self.target,
            EdgeKind::Consumes => &self.source,
        }
    }
}

/// The topology graph: nodes in declaration order followed by edges.
///
/// Topic nodes come first (context order, then topic order), then service
/// nodes in first-seen order. The graph is a plain value: rebuilding from the
/// same input yields an equal graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Graph {
    /// Assemble a graph from parts without checking any invariant.
    ///
    /// Use [`Graph::validate`] or [`crate::Adjacency::from_graph`] before
    /// trusting a graph that didn't come out of [`crate::GraphBuilder`].
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by id (linear scan; use an `Adjacency` for repeated lookups).
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn topics(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_topic())
    }

    pub fn services(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_service())
    }

    /// Distinct context names in first-seen node order.
    pub fn contexts(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for ctx in self.nodes.iter().filter_map(|n| n.context.as_deref()) {
            if !out.contains(&ctx) {
                out.push(ctx);
            }
        }
        out
    }

    /// Check every structural invariant of the graph.
    pub fn validate(&self) -> Result<(), crate::GraphError> {
        crate::validate::validate_structure(&self.nodes, &self.edges)
    }
}
