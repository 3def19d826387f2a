//! Style hints attached to positioned nodes and edges.
//!
//! These name categories, not visuals: the renderer decides what a "mixed"
//! service or a dashed stroke looks like. The only concrete value handed out
//! is the per-context palette color, so every renderer colors contexts the
//! same way.

use std::collections::HashMap;

use kt_graph::{EdgeKind, Graph, Node, NodeKind};
use serde::{Deserialize, Serialize};

use crate::classify::ServiceRole;

/// Visual category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Topic,
    Producer,
    Consumer,
    Mixed,
    Isolated,
}

impl From<ServiceRole> for NodeCategory {
    fn from(role: ServiceRole) -> Self {
        match role {
            ServiceRole::Producer => NodeCategory::Producer,
            ServiceRole::Consumer => NodeCategory::Consumer,
            ServiceRole::Mixed => NodeCategory::Mixed,
            ServiceRole::Isolated => NodeCategory::Isolated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleHints {
    pub category: NodeCategory,
    /// Partition badge; set for topics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_badge: Option<u32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub compacted: bool,
    /// Palette slot of the node's context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_slot: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_color: Option<String>,
}

impl StyleHints {
    pub fn for_node(node: &Node, category: NodeCategory, palette: &ContextPalette<'_>) -> Self {
        let (partition_badge, compacted) = match node.kind {
            NodeKind::Topic {
                partitions,
                log_compaction,
            } => (Some(partitions.max(1)), log_compaction),
            NodeKind::Service => (None, false),
        };
        let context = node.context.as_deref();
        Self {
            category,
            partition_badge,
            compacted,
            context_slot: context.and_then(|c| palette.slot(c)),
            context_color: context.and_then(|c| palette.color(c)).map(String::from),
        }
    }
}

/// Stroke of an edge: produces edges are solid, consumes edges dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStroke {
    Solid,
    Dashed,
}

impl From<EdgeKind> for EdgeStroke {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Produces => EdgeStroke::Solid,
            EdgeKind::Consumes => EdgeStroke::Dashed,
        }
    }
}

/// Stable context -> palette slot assignment, first-seen order of context names.
#[derive(Debug, Clone)]
pub struct ContextPalette<'c> {
    colors: &'c [String],
    slots: HashMap<String, usize>,
}

impl<'c> ContextPalette<'c> {
    pub fn new(graph: &Graph, colors: &'c [String]) -> Self {
        let slots = graph
            .contexts()
            .into_iter()
            .enumerate()
            .map(|(i, ctx)| (ctx.to_string(), i))
            .collect();
        Self { colors, slots }
    }

    /// Slot of a context, counting contexts in first-seen order.
    pub fn slot(&self, context: &str) -> Option<usize> {
        self.slots.get(context).copied()
    }

    /// Palette color of a context; wraps when there are more contexts than colors.
    pub fn color(&self, context: &str) -> Option<&'c str> {
        if self.colors.is_empty() {
            return None;
        }
        let slot = self.slot(context)?;
        Some(self.colors[slot % self.colors.len()].as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
