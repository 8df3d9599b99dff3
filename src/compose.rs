//! Chainable authoring surface over the graph model
//!
//! This layer performs no validation of its own; every call delegates to
//! [`Diagram`]. It exists so a topology reads as a linear script:
//!
//! ```
//! use cloudsketch::{Diagram, DiagramConfig};
//!
//! # fn main() -> Result<(), cloudsketch::GraphError> {
//! let mut d = Diagram::open("Tiny", DiagramConfig::default())?;
//! let lb = d.node("aws.network.elb", "Load Balancer")?;
//! let web = d.cluster("Service", |d| d.node("aws.compute.fargate", "Web"))?;
//! d.edge(lb).label("HTTP").to(web)?;
//! let blueprint = d.finalize()?;
//! assert_eq!(blueprint.edges().len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::graph::{Arrow, Diagram, EdgeHandle, GraphError, LineStyle, NodeHandle};

/// Edge attributes: optional label, line style, optional color override
///
/// Built with chained calls, mirroring how an edge is annotated inline in a
/// topology script.
#[derive(Debug, Clone, Default)]
pub struct Edge {
    pub label: Option<String>,
    pub style: LineStyle,
    pub color: Option<String>,
}

impl Edge {
    /// Create an unlabeled solid edge
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edge label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the line style
    pub fn style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Use a dashed line
    pub fn dashed(self) -> Self {
        self.style(LineStyle::Dashed)
    }

    /// Use a dotted line
    pub fn dotted(self) -> Self {
        self.style(LineStyle::Dotted)
    }

    /// Use a bold line
    pub fn bold(self) -> Self {
        self.style(LineStyle::Bold)
    }

    /// Override the line color (raw DOT color value)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Conversion of edge-endpoint arguments into a handle list
///
/// Implemented for single handles and for collections, so `edge(a).to(b)`
/// and `edge(a).to([b, c, d])` both read naturally.
pub trait Endpoints {
    fn endpoints(self) -> Vec<NodeHandle>;
}

impl Endpoints for NodeHandle {
    fn endpoints(self) -> Vec<NodeHandle> {
        vec![self]
    }
}

impl<const N: usize> Endpoints for [NodeHandle; N] {
    fn endpoints(self) -> Vec<NodeHandle> {
        self.to_vec()
    }
}

impl Endpoints for &[NodeHandle] {
    fn endpoints(self) -> Vec<NodeHandle> {
        self.to_vec()
    }
}

impl Endpoints for Vec<NodeHandle> {
    fn endpoints(self) -> Vec<NodeHandle> {
        self
    }
}

/// A pending connection: source endpoints plus accumulated attributes,
/// waiting for a destination
#[derive(Debug)]
pub struct Link<'a> {
    diagram: &'a mut Diagram,
    from: Vec<NodeHandle>,
    attrs: Edge,
}

impl<'a> Link<'a> {
    /// Set the edge label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.attrs = self.attrs.label(label);
        self
    }

    /// Set the line style
    pub fn style(mut self, style: LineStyle) -> Self {
        self.attrs = self.attrs.style(style);
        self
    }

    /// Use a dashed line
    pub fn dashed(mut self) -> Self {
        self.attrs = self.attrs.dashed();
        self
    }

    /// Use a dotted line
    pub fn dotted(mut self) -> Self {
        self.attrs = self.attrs.dotted();
        self
    }

    /// Use a bold line
    pub fn bold(mut self) -> Self {
        self.attrs = self.attrs.bold();
        self
    }

    /// Override the line color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.attrs = self.attrs.color(color);
        self
    }

    /// Replace all accumulated attributes at once
    pub fn attrs(mut self, attrs: Edge) -> Self {
        self.attrs = attrs;
        self
    }

    /// Connect to the destination endpoints with a directed edge
    pub fn to(self, to: impl Endpoints) -> Result<Vec<EdgeHandle>, GraphError> {
        self.diagram
            .connect(&self.from, &to.endpoints(), Arrow::Forward, self.attrs)
    }

    /// Connect to the destination endpoints with an undirected edge
    pub fn with(self, to: impl Endpoints) -> Result<Vec<EdgeHandle>, GraphError> {
        self.diagram
            .connect(&self.from, &to.endpoints(), Arrow::Undirected, self.attrs)
    }
}

impl Diagram {
    /// Start a connection from the given endpoints
    pub fn edge(&mut self, from: impl Endpoints) -> Link<'_> {
        Link {
            diagram: self,
            from: from.endpoints(),
            attrs: Edge::new(),
        }
    }

    /// Run `body` inside a named cluster scope
    ///
    /// The scope is closed on every exit path, including when `body` errors,
    /// so the cluster tree stays balanced without the caller pairing
    /// `open_cluster`/`close_cluster` by hand.
    pub fn cluster<T>(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut Diagram) -> Result<T, GraphError>,
    ) -> Result<T, GraphError> {
        self.open_cluster(name);
        let result = body(self);
        let closed = self.close_cluster();
        match result {
            Ok(value) => {
                closed?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }
}
