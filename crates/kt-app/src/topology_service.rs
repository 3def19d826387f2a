//! Load, build and lay out the topology.

use std::path::Path;

use chrono::{DateTime, Utc};
use kt_graph::{ContextTopics, Graph, GraphBuilder, IdScope, build_graph};
use kt_layout::{Diagram, LayoutConfig, layout_diagram};
use kt_source::{DirectorySource, LoadedContext, ScanReport, TopicSource, collect_contexts};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// What to load and how to build it.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Context names to keep. Empty keeps every context.
    pub contexts: Vec<String>,
    pub scope: IdScope,
    pub layout: LayoutConfig,
}

/// Overall outcome of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadStatus {
    /// Every discovered context loaded.
    Ok,
    /// Some contexts were skipped; the graph covers the rest.
    Partial { failed: usize },
    /// Nothing was discovered.
    Empty,
}

/// Counts for one loaded context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    pub name: String,
    pub topics: usize,
    pub services: usize,
    pub edges: usize,
    pub warnings: usize,
}

impl ContextSummary {
    /// Counts come from building the context on its own, so they follow the
    /// same dedup rules as the full graph.
    fn from_loaded(loaded: &LoadedContext) -> AppResult<Self> {
        let graph = build_graph(std::slice::from_ref(&loaded.topics))?;
        Ok(Self {
            name: loaded.topics.context.clone(),
            topics: graph.topics().count(),
            services: graph.services().count(),
            edges: graph.edges().len(),
            warnings: loaded.warnings.len(),
        })
    }
}

/// A context that was skipped, with a printable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    pub context: String,
    pub message: String,
}

/// Which contexts went into the graph and which did not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub status: LoadStatus,
    pub loaded_at: DateTime<Utc>,
    pub contexts: Vec<ContextSummary>,
    pub failures: Vec<FailureSummary>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn from_scan(scan: &ScanReport) -> AppResult<Self> {
        let status = if !scan.failures.is_empty() {
            LoadStatus::Partial {
                failed: scan.failures.len(),
            }
        } else if scan.contexts.is_empty() {
            LoadStatus::Empty
        } else {
            LoadStatus::Ok
        };

        Ok(Self {
            status,
            loaded_at: Utc::now(),
            contexts: scan
                .contexts
                .iter()
                .map(ContextSummary::from_loaded)
                .collect::<AppResult<_>>()?,
            failures: scan
                .failures
                .iter()
                .map(|f| FailureSummary {
                    context: f.context.clone(),
                    message: f.to_string(),
                })
                .collect(),
            warnings: scan.warnings().map(ToString::to_string).collect(),
        })
    }

    pub fn is_ok(&self) -> bool {
        self.status == LoadStatus::Ok
    }
}

/// The built graph, its layout and the load report.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyView {
    pub graph: Graph,
    pub diagram: Diagram,
    pub report: LoadReport,
}

/// Fetch every context from `source` and apply the context filter.
fn scan(source: &dyn TopicSource, filter: &[String]) -> AppResult<ScanReport> {
    debug!(source = %source.describe(), "scanning contracts");
    let mut scan = collect_contexts(source.fetch()?);
    if filter.is_empty() {
        return Ok(scan);
    }

    for name in filter {
        let known = scan.contexts.iter().any(|c| &c.topics.context == name)
            || scan.failures.iter().any(|f| &f.context == name);
        if !known {
            return Err(AppError::ContextNotFound(name.clone()));
        }
    }
    scan.contexts.retain(|c| filter.contains(&c.topics.context));
    scan.failures.retain(|f| filter.contains(&f.context));
    Ok(scan)
}

fn build(topics: &[ContextTopics], scope: IdScope) -> AppResult<Graph> {
    let mut builder = GraphBuilder::new().scope(scope);
    builder.add_contexts(topics);
    Ok(builder.build()?)
}

/// Load every context from `source`, then build and lay out the graph.
///
/// Contexts that fail to load are listed in the report and left out of the
/// graph. An error is returned only when the source itself is unusable, a
/// filtered context doesn't exist, or the surviving contexts don't form a
/// valid graph.
pub fn load_topology(source: &dyn TopicSource, options: &LoadOptions) -> AppResult<TopologyView> {
    let scan = scan(source, &options.contexts)?;
    let graph = build(&scan.topics(), options.scope)?;
    let diagram = layout_diagram(&graph, &options.layout)?;
    let report = LoadReport::from_scan(&scan)?;

    info!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        status = ?report.status,
        "topology loaded"
    );

    Ok(TopologyView {
        graph,
        diagram,
        report,
    })
}

/// `load_topology` over `<root>/<context>/topics.yaml`.
pub fn load_from_dir(root: &Path, options: &LoadOptions) -> AppResult<TopologyView> {
    load_topology(&DirectorySource::new(root), options)
}

/// Per-context counts without building the combined graph.
pub fn list_contexts(source: &dyn TopicSource) -> AppResult<LoadReport> {
    LoadReport::from_scan(&scan(source, &[])?)
}

/// Check that every context loads and that together they form a valid graph.
pub fn validate_contracts(source: &dyn TopicSource) -> AppResult<LoadReport> {
    let scan = scan(source, &[])?;
    let report = LoadReport::from_scan(&scan)?;
    if !scan.failures.is_empty() {
        let names: Vec<&str> = scan.failures.iter().map(|f| f.context.as_str()).collect();
        return Err(AppError::Validation(format!(
            "{} context(s) failed to load: {}",
            names.len(),
            names.join(", ")
        )));
    }
    build(&scan.topics(), IdScope::Auto)?;
    Ok(report)
}
