//! Service classification by edge role.

use kt_graph::{Adjacency, EdgeKind, Graph};
use serde::{Deserialize, Serialize};

/// Where a service sits in the pub/sub flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Produces to at least one topic, consumes none.
    Producer,
    /// Consumes from at least one topic, produces none.
    Consumer,
    /// Both produces and consumes.
    Mixed,
    /// Neither. The builder never emits such a service, but hand-made graphs can.
    Isolated,
}

/// Service nodes partitioned by role.
///
/// Each list holds indices into `graph.nodes()` in graph order, which is what
/// makes row assignment stable across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub producers: Vec<usize>,
    pub consumers: Vec<usize>,
    pub mixed: Vec<usize>,
    pub isolated: Vec<usize>,
    roles: Vec<Option<ServiceRole>>,
}

impl Classification {
    /// Classify every service node in one pass over the adjacency index.
    pub fn classify(graph: &Graph, adjacency: &Adjacency) -> Self {
        let mut out = Self {
            roles: vec![None; graph.nodes().len()],
            ..Self::default()
        };

        for (idx, node) in graph.nodes().iter().enumerate() {
            if !node.is_service() {
                continue;
            }
            let produces = adjacency.has_outgoing(graph, idx, EdgeKind::Produces);
            let consumes = adjacency.has_incoming(graph, idx, EdgeKind::Consumes);
            let role = match (produces, consumes) {
                (true, true) => ServiceRole::Mixed,
                (true, false) => ServiceRole::Producer,
                (false, true) => ServiceRole::Consumer,
                (false, false) => ServiceRole::Isolated,
            };
            out.list_mut(role).push(idx);
            out.roles[idx] = Some(role);
        }

        out
    }

    fn list_mut(&mut self, role: ServiceRole) -> &mut Vec<usize> {
        match role {
            ServiceRole::Producer => &mut self.producers,
            ServiceRole::Consumer => &mut self.consumers,
            ServiceRole::Mixed => &mut self.mixed,
            ServiceRole::Isolated => &mut self.isolated,
        }
    }

    pub fn list(&self, role: ServiceRole) -> &[usize] {
        match role {
            ServiceRole::Producer => &self.producers,
            ServiceRole::Consumer => &self.consumers,
            ServiceRole::Mixed => &self.mixed,
            ServiceRole::Isolated => &self.isolated,
        }
    }

    /// Role of node `idx`; `None` for topics and out-of-range indices.
    pub fn role(&self, idx: usize) -> Option<ServiceRole> {
        self.roles.get(idx).copied().flatten()
    }

    /// Total number of classified service nodes.
    pub fn service_count(&self) -> usize {
        self.producers.len() + self.consumers.len() + self.mixed.len() + self.isolated.len()
    }
}
