//! kt-layout: deterministic layered layout for topic graphs.
//!
//! Pub/sub topologies have a fixed three-tier shape, so instead of a general
//! graph layout this crate places nodes in three columns:
//! producers | topics | consumers.
//!
//! - `classify`: producer-only / consumer-only / mixed / isolated services
//! - `layered`: column and row assignment, `PositionedNode`, `Diagram`
//! - `style`: category, partition badge and context color hints
//! - `config`: spacing and palette parameters

pub mod classify;
pub mod config;
pub mod error;
pub mod layered;
pub mod style;

pub use classify::{Classification, ServiceRole};
pub use config::LayoutConfig;
pub use error::{LayoutError, LayoutResult};
pub use layered::{Diagram, PositionedNode, StyledEdge, layout, layout_diagram};
pub use style::{ContextPalette, EdgeStroke, NodeCategory, StyleHints};
