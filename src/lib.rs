//! Cloudsketch - declarative cloud infrastructure diagrams
//!
//! This library turns a topology description (nodes, nested clusters, labeled
//! edges) into a laid-out diagram via an external Graphviz engine.
//!
//! # Example
//!
//! ```rust
//! use cloudsketch::{Diagram, DiagramConfig, Renderer};
//!
//! # fn main() -> Result<(), cloudsketch::DiagramError> {
//! let mut d = Diagram::open("Web Tier", DiagramConfig::default())?;
//! let lb = d.node("aws.network.elb", "Load Balancer")?;
//! let web = d.cluster("Service", |d| d.node("aws.compute.fargate", "Web"))?;
//! d.edge(lb).label("HTTP").to(web)?;
//!
//! let blueprint = d.finalize()?;
//! let dot = Renderer::new().dot_source(&blueprint);
//! assert!(dot.contains("digraph"));
//! assert!(dot.contains("Load Balancer"));
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod graph;
pub mod registry;
pub mod render;
pub mod theme;

pub use compose::{Edge, Endpoints, Link};
pub use graph::{
    Arrow, Blueprint, Cluster, ClusterHandle, Diagram, DiagramConfig, Direction, EdgeData,
    EdgeHandle, GraphError, LineStyle, Node, NodeHandle, OutputFormat,
};
pub use registry::{Catalog, NodeShape, NodeTemplate, RegistryError, ResourceType};
pub use render::{RenderError, Renderer};
pub use theme::{Theme, ThemeError};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur anywhere in the diagram pipeline
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Error during diagram construction
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Error during resource catalog use
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Error during rendering
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Error loading a theme
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Render a finalized blueprint with the default renderer
///
/// Uses the `dot` engine, the current directory for output, and the default
/// theme. Construct a [`Renderer`] directly for anything else.
pub fn render(blueprint: &Blueprint) -> Result<PathBuf, DiagramError> {
    Ok(Renderer::new().render(blueprint)?)
}
