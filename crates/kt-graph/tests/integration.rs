//! Integration tests for kt-graph.

use kt_graph::{
    Adjacency, ContextTopics, EdgeKind, GraphBuilder, IdScope, NodeKind, Topic, build_graph,
};

fn test_context() -> ContextTopics {
    ContextTopics::new(
        "test",
        vec![
            Topic::new("topic1")
                .with_producers(["serviceA", "serviceB"])
                .with_consumers(["serviceC"]),
            Topic::new("topic2")
                .with_producers(["serviceE"])
                .with_consumers(["serviceA", "serviceF"]),
        ],
    )
}

#[test]
fn two_topic_scenario_nodes() {
    let graph = build_graph(&[test_context()]).unwrap();

    for id in ["topic1", "topic2"] {
        let node = graph.node(id).unwrap();
        assert!(node.is_topic(), "{id} should be a topic");
    }
    for id in ["serviceA", "serviceB", "serviceC", "serviceE", "serviceF"] {
        let node = graph.node(id).unwrap();
        assert_eq!(node.kind, NodeKind::Service, "{id} should be a service");
    }
    assert_eq!(graph.nodes().len(), 7);
}

#[test]
fn two_topic_scenario_edges() {
    let graph = build_graph(&[test_context()]).unwrap();

    let expected = [
        ("produce:serviceA->topic1", EdgeKind::Produces),
        ("produce:serviceB->topic1", EdgeKind::Produces),
        ("consume:topic1->serviceC", EdgeKind::Consumes),
        ("produce:serviceE->topic2", EdgeKind::Produces),
        ("consume:topic2->serviceA", EdgeKind::Consumes),
        ("consume:topic2->serviceF", EdgeKind::Consumes),
    ];
    for (id, kind) in expected {
        let edge = graph.edge(id).unwrap_or_else(|| panic!("missing edge {id}"));
        assert_eq!(edge.kind, kind);
    }
    assert_eq!(graph.edges().len(), expected.len());
}

#[test]
fn edges_point_the_right_way() {
    let graph = build_graph(&[test_context()]).unwrap();
    for edge in graph.edges() {
        let source = graph.node(edge.source.as_str()).unwrap();
        let target = graph.node(edge.target.as_str()).unwrap();
        match edge.kind {
            EdgeKind::Produces => assert!(source.is_service() && target.is_topic()),
            EdgeKind::Consumes => assert!(source.is_topic() && target.is_service()),
        }
    }
}

#[test]
fn topic_without_clients_adds_no_edges_or_services() {
    let ctx = ContextTopics::new("solo", vec![Topic::new("quiet").with_partitions(12)]);
    let graph = build_graph(&[ctx]).unwrap();
    assert_eq!(graph.nodes().len(), 1);
    assert!(graph.edges().is_empty());
    assert_eq!(graph.services().count(), 0);
}

#[test]
fn multi_context_ids_are_namespaced() {
    let other = ContextTopics::new(
        "payments",
        vec![Topic::new("topic1").with_producers(["serviceA"])],
    );
    let graph = build_graph(&[test_context(), other]).unwrap();

    assert!(graph.node("test:topic1").is_some());
    assert!(graph.node("payments:topic1").is_some());
    assert!(graph.node("test:serviceA").is_some());
    assert!(graph.node("payments:serviceA").is_some());
    assert!(graph.edge("produce:payments:serviceA->payments:topic1").is_some());
    assert_eq!(graph.contexts(), vec!["test", "payments"]);
    graph.validate().unwrap();
}

#[test]
fn rebuild_is_deterministic() {
    let contexts = [test_context()];
    let first = build_graph(&contexts).unwrap();
    let second = build_graph(&contexts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn forced_scope_overrides_auto() {
    let ctx = test_context();
    let mut builder = GraphBuilder::new().scope(IdScope::Namespaced);
    builder.add_context(&ctx);
    let graph = builder.build().unwrap();
    assert!(graph.node("test:serviceF").is_some());

    let a = ContextTopics::new("a", vec![Topic::new("x")]);
    let b = ContextTopics::new("b", vec![Topic::new("y")]);
    let mut builder = GraphBuilder::new().scope(IdScope::Flat);
    builder.add_contexts([&a, &b]);
    let graph = builder.build().unwrap();
    assert!(graph.node("x").is_some());
    assert!(graph.node("y").is_some());
}

#[test]
fn adjacency_over_built_graph() {
    let graph = build_graph(&[test_context()]).unwrap();
    let adj = Adjacency::from_graph(&graph).unwrap();
    let a = adj.node_idx("serviceA").unwrap();
    assert!(adj.has_outgoing(&graph, a, EdgeKind::Produces));
    assert!(adj.has_incoming(&graph, a, EdgeKind::Consumes));
}

#[test]
fn graph_json_shape() {
    let graph = build_graph(&[test_context()]).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][0]["id"], "topic1");
    assert_eq!(json["nodes"][0]["type"], "topic");
    assert_eq!(json["nodes"][0]["partitions"], 1);
    assert_eq!(json["edges"][0]["type"], "produces");
    assert_eq!(json["edges"][0]["source"], "serviceA");

    let back: kt_graph::Graph = serde_json::from_value(json).unwrap();
    assert_eq!(back, graph);
}
