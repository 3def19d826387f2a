//! Three-column layered layout.
//!
//! Columns, left to right:
//! 0. producer-only services, then mixed services below them
//! 1. topics
//! 2. consumer-only services
//!
//! Rows within a column follow `graph.nodes()` order. Services that neither
//! produce nor consume go in an overflow row under the tallest column.

use kt_graph::{Adjacency, Edge, Graph, Node, NodeKind};
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, ServiceRole};
use crate::config::LayoutConfig;
use crate::error::LayoutResult;
use crate::style::{ContextPalette, EdgeStroke, NodeCategory, StyleHints};

const PRODUCER_COLUMN: f32 = 0.0;
const TOPIC_COLUMN: f32 = 1.0;
const CONSUMER_COLUMN: f32 = 2.0;

/// A graph node with its position and style hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: Node,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: StyleHints,
}

/// An edge with its stroke hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledEdge {
    #[serde(flatten)]
    pub edge: Edge,
    pub stroke: EdgeStroke,
}

/// Everything a renderer needs: positioned nodes, styled edges, bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<StyledEdge>,
    pub width: f32,
    pub height: f32,
}

impl Diagram {
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }
}

/// Position every node of `graph`.
///
/// Fails before placing anything if an edge names a node that isn't in the
/// graph, or if `config` is unusable.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> LayoutResult<Vec<PositionedNode>> {
    config.validate()?;
    let adjacency = Adjacency::from_graph(graph)?;
    let classes = Classification::classify(graph, &adjacency);
    let palette = ContextPalette::new(graph, &config.context_palette);

    let producer_rows = classes.producers.len();
    let topic_rows = graph.topics().count();
    let overflow_row = topic_rows
        .max(producer_rows + classes.mixed.len())
        .max(classes.consumers.len());

    let mut next = RowCounters::default();
    let mut positioned = Vec::with_capacity(graph.nodes().len());

    for (idx, node) in graph.nodes().iter().enumerate() {
        let (category, column, row) = match node.kind {
            NodeKind::Topic { .. } => (NodeCategory::Topic, TOPIC_COLUMN, next.take(Slot::Topic)),
            NodeKind::Service => match classes.role(idx).unwrap_or(ServiceRole::Isolated) {
                ServiceRole::Producer => (
                    NodeCategory::Producer,
                    PRODUCER_COLUMN,
                    next.take(Slot::Producer),
                ),
                ServiceRole::Mixed => (
                    NodeCategory::Mixed,
                    PRODUCER_COLUMN,
                    producer_rows + next.take(Slot::Mixed),
                ),
                ServiceRole::Consumer => (
                    NodeCategory::Consumer,
                    CONSUMER_COLUMN,
                    next.take(Slot::Consumer),
                ),
                ServiceRole::Isolated => {
                    let i = next.take(Slot::Isolated);
                    (NodeCategory::Isolated, i as f32, overflow_row)
                }
            },
        };

        positioned.push(PositionedNode {
            x: column * config.column_spacing,
            y: config.start_y + row as f32 * config.row_spacing,
            width: config.node_width,
            height: config.node_height,
            style: StyleHints::for_node(node, category, &palette),
            node: node.clone(),
        });
    }

    Ok(positioned)
}

/// Lay out `graph` and attach edge strokes and diagram bounds.
pub fn layout_diagram(graph: &Graph, config: &LayoutConfig) -> LayoutResult<Diagram> {
    let nodes = layout(graph, config)?;
    let edges = graph
        .edges()
        .iter()
        .map(|edge| StyledEdge {
            stroke: EdgeStroke::from(edge.kind),
            edge: edge.clone(),
        })
        .collect();

    let width = nodes
        .iter()
        .map(|n| n.x + n.width)
        .fold(0.0_f32, f32::max);
    let height = nodes
        .iter()
        .map(|n| n.y + n.height)
        .fold(0.0_f32, f32::max);

    Ok(Diagram {
        nodes,
        edges,
        width,
        height,
    })
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Topic,
    Producer,
    Mixed,
    Consumer,
    Isolated,
}

/// Next free row per category.
#[derive(Debug, Default)]
struct RowCounters([usize; 5]);

impl RowCounters {
    fn take(&mut self, slot: Slot) -> usize {
        let counter = &mut self.0[slot as usize];
        let row = *counter;
        *counter += 1;
        row
    }
}
