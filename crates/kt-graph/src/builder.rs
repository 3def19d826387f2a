//! Graph construction from context topic declarations.

use std::collections::HashSet;

use kt_core::{EdgeId, KtResult, Namespace, NodeId, consume_edge_id, produce_edge_id};

use crate::graph::{Edge, EdgeKind, Graph, Node, NodeKind};
use crate::topic::{ContextTopics, Topic};
use crate::validate;

/// How node ids are scoped to their context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScope {
    /// Flat ids for zero or one context, namespaced ids otherwise.
    #[default]
    Auto,
    /// Bare entity names. Only collision-free for a single context.
    Flat,
    /// `<context>:<name>` for every node of a non-empty context.
    Namespaced,
}

/// Builder that turns context topic declarations into a `Graph`.
///
/// Add contexts in the order they should appear, then call `build()`.
/// Contexts are never merged, even when two share a name.
#[derive(Debug, Default)]
pub struct GraphBuilder<'a> {
    scope: IdScope,
    contexts: Vec<&'a ContextTopics>,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: IdScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn add_context(&mut self, context: &'a ContextTopics) -> &mut Self {
        self.contexts.push(context);
        self
    }

    pub fn add_contexts<I>(&mut self, contexts: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a ContextTopics>,
    {
        self.contexts.extend(contexts);
        self
    }

    fn namespace(&self, context: &'a ContextTopics) -> Namespace<'a> {
        let flat = match self.scope {
            IdScope::Auto => self.contexts.len() <= 1,
            IdScope::Flat => true,
            IdScope::Namespaced => false,
        };
        if flat {
            Namespace::flat()
        } else {
            Namespace::context(&context.context)
        }
    }

    /// Build the graph and check its invariants.
    ///
    /// Fails only when the input breaks the caller contract: a topic name
    /// repeated within a context, or two contexts whose ids collide.
    pub fn build(&self) -> KtResult<Graph> {
        let mut nodes = Vec::new();
        let mut services = Vec::new();

        for &ctx in &self.contexts {
            let ns = self.namespace(ctx);
            let context = context_label(ctx);
            let mut seen: HashSet<NodeId> = HashSet::new();

            for topic in &ctx.topics {
                nodes.push(topic_node(ns.node_id(&topic.name), topic, context.clone()));
                for name in topic.services() {
                    let id = ns.node_id(name);
                    if seen.insert(id.clone()) {
                        services.push(Node {
                            id,
                            label: name.to_string(),
                            kind: NodeKind::Service,
                            context: context.clone(),
                        });
                    }
                }
            }
        }
        nodes.extend(services);

        let edges = self.build_edges();

        validate::validate_structure(&nodes, &edges)?;

        Ok(Graph { nodes, edges })
    }

    /// Second pass: one edge per producer and consumer entry.
    ///
    /// A service listed twice for the same topic yields the same edge id
    /// twice; only the first is kept.
    fn build_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut seen: HashSet<EdgeId> = HashSet::new();

        for &ctx in &self.contexts {
            let ns = self.namespace(ctx);
            let context = context_label(ctx);

            for topic in &ctx.topics {
                let topic_id = ns.node_id(&topic.name);

                for name in &topic.producers {
                    let service_id = ns.node_id(name);
                    let id = produce_edge_id(&service_id, &topic_id);
                    if seen.insert(id.clone()) {
                        edges.push(Edge {
                            id,
                            source: service_id,
                            target: topic_id.clone(),
                            kind: EdgeKind::Produces,
                            context: context.clone(),
                        });
                    }
                }

                for name in &topic.consumers {
                    let service_id = ns.node_id(name);
                    let id = consume_edge_id(&topic_id, &service_id);
                    if seen.insert(id.clone()) {
                        edges.push(Edge {
                            id,
                            source: topic_id.clone(),
                            target: service_id,
                            kind: EdgeKind::Consumes,
                            context: context.clone(),
                        });
                    }
                }
            }
        }

        edges
    }
}

fn context_label(ctx: &ContextTopics) -> Option<String> {
    (!ctx.context.is_empty()).then(|| ctx.context.clone())
}

fn topic_node(id: NodeId, topic: &Topic, context: Option<String>) -> Node {
    Node {
        id,
        label: topic.name.clone(),
        kind: NodeKind::Topic {
            partitions: topic.partitions,
            log_compaction: topic.log_compaction,
        },
        context,
    }
}

/// Build a graph from contexts with automatic id scoping.
pub fn build_graph(contexts: &[ContextTopics]) -> KtResult<Graph> {
    let mut builder = GraphBuilder::new();
    builder.add_contexts(contexts);
    builder.build()
}
