use clap::{Parser, Subcommand, ValueEnum};
use kt_app::{AppError, AppResult, LoadOptions, LoadReport, LoadStatus, TopologyView};
use kt_graph::IdScope;
use kt_source::DirectorySource;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kt-cli")]
#[command(about = "Kafka topology - build topic/service graphs from topics.yaml contracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every context loads and the graph is consistent
    Validate {
        /// Contracts root holding <context>/topics.yaml
        root: PathBuf,
    },
    /// List contexts with topic, service and edge counts
    Contexts {
        /// Contracts root holding <context>/topics.yaml
        root: PathBuf,
    },
    /// Print the topology graph as JSON
    Graph {
        /// Contracts root holding <context>/topics.yaml
        root: PathBuf,
        /// Only include these contexts (repeatable)
        #[arg(long = "context")]
        contexts: Vec<String>,
        /// How node ids are scoped to their context
        #[arg(long, value_enum, default_value_t = Scope::Auto)]
        scope: Scope,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the positioned diagram as JSON
    Layout {
        /// Contracts root holding <context>/topics.yaml
        root: PathBuf,
        /// Only include these contexts (repeatable)
        #[arg(long = "context")]
        contexts: Vec<String>,
        /// How node ids are scoped to their context
        #[arg(long, value_enum, default_value_t = Scope::Auto)]
        scope: Scope,
        /// Layout config YAML file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scope {
    Auto,
    Flat,
    Namespaced,
}

impl From<Scope> for IdScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Auto => IdScope::Auto,
            Scope::Flat => IdScope::Flat,
            Scope::Namespaced => IdScope::Namespaced,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { root } => cmd_validate(&root),
        Commands::Contexts { root } => cmd_contexts(&root),
        Commands::Graph {
            root,
            contexts,
            scope,
            output,
        } => {
            let options = LoadOptions {
                contexts,
                scope: scope.into(),
                ..LoadOptions::default()
            };
            let view = kt_app::load_from_dir(&root, &options)?;
            report_status(&view);
            write_json(&view.graph, output.as_deref())
        }
        Commands::Layout {
            root,
            contexts,
            scope,
            config,
            output,
        } => {
            let layout = match config {
                Some(path) => kt_app::load_layout_config(&path)?,
                None => Default::default(),
            };
            let options = LoadOptions {
                contexts,
                scope: scope.into(),
                layout,
            };
            let view = kt_app::load_from_dir(&root, &options)?;
            report_status(&view);
            write_json(&view.diagram, output.as_deref())
        }
    }
}

fn cmd_validate(root: &Path) -> AppResult<()> {
    println!("Validating contracts: {}", root.display());
    let source = DirectorySource::new(root);
    match kt_app::validate_contracts(&source) {
        Ok(report) => {
            print_contexts(&report);
            if report.status == LoadStatus::Empty {
                println!("No contexts found");
            } else {
                println!("✓ Contracts are valid");
            }
            Ok(())
        }
        Err(AppError::Validation(message)) => {
            // Show every failure, not only the summary
            let report = kt_app::list_contexts(&source)?;
            print_contexts(&report);
            Err(AppError::Validation(message))
        }
        Err(e) => Err(e),
    }
}

fn cmd_contexts(root: &Path) -> AppResult<()> {
    let report = kt_app::list_contexts(&DirectorySource::new(root))?;
    if report.status == LoadStatus::Empty {
        println!("No contexts found in {}", root.display());
    } else {
        print_contexts(&report);
    }
    Ok(())
}

fn print_contexts(report: &LoadReport) {
    for ctx in &report.contexts {
        println!(
            "  ✓ {} ({} topics, {} services, {} edges)",
            ctx.name, ctx.topics, ctx.services, ctx.edges
        );
    }
    for failure in &report.failures {
        println!("  ✗ {}", failure.message);
    }
    for warning in &report.warnings {
        println!("  ! {}", warning);
    }
}

fn report_status(view: &TopologyView) {
    if let LoadStatus::Partial { failed } = view.report.status {
        warn!(failed, "some contexts were skipped; output covers the rest");
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
