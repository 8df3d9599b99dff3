//! In-memory graph model: one diagram session with nodes, nested cluster
//! scopes, and edges
//!
//! A [`Diagram`] is an explicit session object: all declaration calls take it
//! by `&mut` and all state lives inside it. A process-wide guard enforces the
//! one-active-session lifecycle; the guard is released on [`Diagram::finalize`]
//! and on drop, so an abandoned session does not wedge the process.

pub mod config;
pub mod error;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::compose::Edge;
use crate::registry::{Catalog, NodeTemplate, ResourceType};

pub use config::{DiagramConfig, Direction, OutputFormat};
pub use error::GraphError;

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);
static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque handle to a declared node, usable as an edge endpoint
///
/// Handles are branded with their session id: using one in a different
/// session fails with [`GraphError::DanglingEndpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle {
    session: u64,
    index: usize,
}

/// Opaque handle to a declared cluster scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterHandle {
    index: usize,
}

impl ClusterHandle {
    /// Index of the cluster in the finalized blueprint's cluster table
    pub fn index(self) -> usize {
        self.index
    }
}

/// Opaque handle to a declared edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeHandle {
    index: usize,
}

impl EdgeHandle {
    /// Index of the edge in the finalized blueprint's edge table
    pub fn index(self) -> usize {
        self.index
    }
}

/// Edge directionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrow {
    /// Directed edge with an arrowhead at the destination
    #[default]
    Forward,
    /// Undirected edge, drawn without arrowheads
    Undirected,
}

/// Edge line style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// The DOT style attribute value
    pub fn as_dot(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::Bold => "bold",
        }
    }
}

/// A declared node: resource identity, resolved template, display label,
/// and owning cluster (None for the graph root)
#[derive(Debug, Clone)]
pub struct Node {
    pub resource: ResourceType,
    pub template: NodeTemplate,
    pub label: String,
    pub cluster: Option<usize>,
}

/// A declared cluster scope; `parent` is None for top-level clusters
#[derive(Debug, Clone)]
pub struct Cluster {
    pub name: String,
    pub parent: Option<usize>,
}

/// A declared edge between two node indices
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub from: usize,
    pub to: usize,
    pub arrow: Arrow,
    pub attrs: Edge,
}

/// One diagram construction session
#[derive(Debug)]
pub struct Diagram {
    id: u64,
    title: String,
    config: DiagramConfig,
    catalog: Catalog,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<EdgeData>,
    stack: Vec<usize>,
}

impl Diagram {
    /// Begin a session with the built-in resource catalog
    ///
    /// Fails with [`GraphError::SessionAlreadyActive`] while another session
    /// is under construction in this process.
    pub fn open(title: impl Into<String>, config: DiagramConfig) -> Result<Self, GraphError> {
        Self::open_with_catalog(title, config, Catalog::builtin())
    }

    /// Begin a session with a caller-supplied resource catalog
    pub fn open_with_catalog(
        title: impl Into<String>,
        config: DiagramConfig,
        catalog: Catalog,
    ) -> Result<Self, GraphError> {
        if SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GraphError::SessionAlreadyActive);
        }

        Ok(Self {
            id: SESSION_COUNTER.fetch_add(1, Ordering::Relaxed),
            title: title.into(),
            config,
            catalog,
            nodes: Vec::new(),
            clusters: Vec::new(),
            edges: Vec::new(),
            stack: Vec::new(),
        })
    }

    /// The diagram title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The session configuration
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Push a new cluster scope; its parent is the innermost open scope
    /// (or the graph root if none is open)
    pub fn open_cluster(&mut self, name: impl Into<String>) -> ClusterHandle {
        let parent = self.stack.last().copied();
        let index = self.clusters.len();
        self.clusters.push(Cluster {
            name: name.into(),
            parent,
        });
        self.stack.push(index);
        ClusterHandle { index }
    }

    /// Pop the innermost cluster scope, sealing it
    pub fn close_cluster(&mut self) -> Result<(), GraphError> {
        self.stack.pop().map(|_| ()).ok_or(GraphError::NoOpenCluster)
    }

    /// Declare a node from a dotted resource path, e.g. `"aws.network.vpc"`
    ///
    /// The template is resolved eagerly, so an unknown resource type fails
    /// here rather than at render time. The node is owned by the innermost
    /// open cluster scope.
    pub fn node(&mut self, resource: &str, label: &str) -> Result<NodeHandle, GraphError> {
        let resource: ResourceType = resource.parse()?;
        self.node_typed(resource, label)
    }

    /// Declare a node from an explicit resource type
    pub fn node_typed(
        &mut self,
        resource: ResourceType,
        label: &str,
    ) -> Result<NodeHandle, GraphError> {
        let template = self.catalog.resolve(&resource)?.clone();
        let index = self.nodes.len();
        self.nodes.push(Node {
            resource,
            template,
            label: label.to_string(),
            cluster: self.stack.last().copied(),
        });
        Ok(NodeHandle {
            session: self.id,
            index,
        })
    }

    /// Connect every `from` endpoint to every `to` endpoint
    ///
    /// Cartesian expansion: one edge per (from, to) pair, in declaration
    /// order. All endpoints are validated before any edge is recorded.
    pub fn connect(
        &mut self,
        from: &[NodeHandle],
        to: &[NodeHandle],
        arrow: Arrow,
        attrs: Edge,
    ) -> Result<Vec<EdgeHandle>, GraphError> {
        for handle in from.iter().chain(to.iter()) {
            self.check_endpoint(handle)?;
        }

        let mut handles = Vec::with_capacity(from.len() * to.len());
        for f in from {
            for t in to {
                let index = self.edges.len();
                self.edges.push(EdgeData {
                    from: f.index,
                    to: t.index,
                    arrow,
                    attrs: attrs.clone(),
                });
                handles.push(EdgeHandle { index });
            }
        }
        Ok(handles)
    }

    /// Close the session and produce an immutable renderable graph
    ///
    /// Fails with [`GraphError::UnbalancedClusters`] if any cluster scope is
    /// still open, naming the offending scopes.
    pub fn finalize(mut self) -> Result<Blueprint, GraphError> {
        if !self.stack.is_empty() {
            let open = self
                .stack
                .iter()
                .map(|&i| self.clusters[i].name.clone())
                .collect();
            return Err(GraphError::unbalanced(open));
        }

        Ok(Blueprint {
            title: std::mem::take(&mut self.title),
            config: std::mem::take(&mut self.config),
            nodes: std::mem::take(&mut self.nodes),
            clusters: std::mem::take(&mut self.clusters),
            edges: std::mem::take(&mut self.edges),
        })
    }

    fn check_endpoint(&self, handle: &NodeHandle) -> Result<(), GraphError> {
        if handle.session != self.id || handle.index >= self.nodes.len() {
            return Err(GraphError::DanglingEndpoint);
        }
        Ok(())
    }
}

impl Drop for Diagram {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::Release);
    }
}

/// A finalized, immutable graph ready for rendering
#[derive(Debug)]
pub struct Blueprint {
    title: String,
    config: DiagramConfig,
    nodes: Vec<Node>,
    clusters: Vec<Cluster>,
    edges: Vec<EdgeData>,
}

impl Blueprint {
    /// The diagram title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The session configuration the diagram was built with
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// All declared nodes, in declaration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All declared clusters, in declaration order
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// All declared edges, in declaration order
    pub fn edges(&self) -> &[EdgeData] {
        &self.edges
    }

    /// Nodes owned directly by the given cluster (None for the graph root)
    pub fn cluster_nodes(
        &self,
        parent: Option<usize>,
    ) -> impl Iterator<Item = (usize, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.cluster == parent)
    }

    /// Clusters whose immediate parent is the given cluster (None for the
    /// graph root)
    pub fn cluster_children(
        &self,
        parent: Option<usize>,
    ) -> impl Iterator<Item = (usize, &Cluster)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter(move |(_, cluster)| cluster.parent == parent)
    }

    /// Output file stem: the configured filename, or a slug of the title
    pub fn output_stem(&self) -> String {
        match &self.config.filename {
            Some(filename) => filename.clone(),
            None => slugify(&self.title),
        }
    }
}

/// Lowercase a title into a filename stem
pub(crate) fn slugify(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if slug.is_empty() {
        "diagram".to_string()
    } else {
        slug
    }
}
