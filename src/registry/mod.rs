//! Resource registry mapping (provider, category, resource) triples to
//! visual node templates
//!
//! The registry is a pure lookup table: resolving a triple never mutates it,
//! and adding a new provider, category, or resource type touches no other
//! component.

pub mod catalog;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors that can occur during registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The triple is not registered in the catalog
    #[error("unknown resource type: {0}")]
    UnknownResourceType(ResourceType),

    /// The triple is already registered
    #[error("duplicate resource type: {0}")]
    DuplicateResourceType(ResourceType),

    /// A dotted resource path that does not split into three segments
    #[error("malformed resource path '{path}': expected provider.category.resource")]
    MalformedPath { path: String },
}

/// Identity of a resource kind: (provider, category, resource)
///
/// Parseable from a dotted path such as `"aws.network.vpc"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceType {
    pub provider: String,
    pub category: String,
    pub resource: String,
}

impl ResourceType {
    /// Create a resource type from its three components
    pub fn new(
        provider: impl Into<String>,
        category: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            category: category.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.provider, self.category, self.resource)
    }
}

impl FromStr for ResourceType {
    type Err = RegistryError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut parts = path.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(provider), Some(category), Some(resource), None)
                if !provider.is_empty() && !category.is_empty() && !resource.is_empty() =>
            {
                Ok(Self::new(provider, category, resource))
            }
            _ => Err(RegistryError::MalformedPath {
                path: path.to_string(),
            }),
        }
    }
}

/// Graphviz node shape used to draw a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Box,
    Ellipse,
    Cylinder,
    Folder,
    Octagon,
    Note,
    Component,
}

impl NodeShape {
    /// The DOT shape attribute value
    pub fn as_dot(self) -> &'static str {
        match self {
            NodeShape::Box => "box",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Folder => "folder",
            NodeShape::Octagon => "octagon",
            NodeShape::Note => "note",
            NodeShape::Component => "component",
        }
    }
}

/// Fixed visual template for a resource type
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    /// Shape drawn by the layout engine
    pub shape: NodeShape,
    /// Symbolic fill token resolved through the active theme
    pub fill: String,
    /// Icon artwork slug, e.g. `aws/compute/ec2`
    pub icon: String,
}

impl NodeTemplate {
    /// Create a new template
    pub fn new(shape: NodeShape, fill: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            shape,
            fill: fill.into(),
            icon: icon.into(),
        }
    }
}

/// Registry of resource types and their visual templates
#[derive(Debug, Default)]
pub struct Catalog {
    templates: HashMap<ResourceType, NodeTemplate>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog preloaded with the built-in providers
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog::install(&mut catalog);
        catalog
    }

    /// Register a template for a resource type
    pub fn register(
        &mut self,
        resource: ResourceType,
        template: NodeTemplate,
    ) -> Result<(), RegistryError> {
        if self.templates.contains_key(&resource) {
            return Err(RegistryError::DuplicateResourceType(resource));
        }
        self.templates.insert(resource, template);
        Ok(())
    }

    /// Look up the template for a resource type
    pub fn resolve(&self, resource: &ResourceType) -> Result<&NodeTemplate, RegistryError> {
        self.templates
            .get(resource)
            .ok_or_else(|| RegistryError::UnknownResourceType(resource.clone()))
    }

    /// Check whether a resource type is registered
    pub fn contains(&self, resource: &ResourceType) -> bool {
        self.templates.contains_key(resource)
    }

    /// Number of registered resource types
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_path() {
        let ty: ResourceType = "aws.network.vpc".parse().expect("Should parse");
        assert_eq!(ty, ResourceType::new("aws", "network", "vpc"));
        assert_eq!(ty.to_string(), "aws.network.vpc");
    }

    #[test]
    fn test_parse_malformed_path() {
        for path in ["aws.network", "aws.network.vpc.extra", "", "aws..vpc"] {
            let result = path.parse::<ResourceType>();
            assert!(
                matches!(result, Err(RegistryError::MalformedPath { .. })),
                "path '{}' should be rejected",
                path
            );
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut catalog = Catalog::new();
        let ty = ResourceType::new("aws", "compute", "ec2");
        catalog
            .register(ty.clone(), NodeTemplate::new(NodeShape::Box, "compute", "aws/compute/ec2"))
            .expect("Should register");

        let template = catalog.resolve(&ty).expect("Should resolve");
        assert_eq!(template.shape, NodeShape::Box);
        assert_eq!(template.fill, "compute");
    }

    #[test]
    fn test_resolve_unknown_type() {
        let catalog = Catalog::builtin();
        let ty = ResourceType::new("aws", "compute", "mainframe");
        let result = catalog.resolve(&ty);
        assert!(matches!(result, Err(RegistryError::UnknownResourceType(_))));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut catalog = Catalog::new();
        let ty = ResourceType::new("gcp", "compute", "gce");
        let template = NodeTemplate::new(NodeShape::Box, "compute", "gcp/compute/gce");
        catalog.register(ty.clone(), template.clone()).expect("First register should succeed");
        let result = catalog.register(ty, template);
        assert!(matches!(result, Err(RegistryError::DuplicateResourceType(_))));
    }

    #[test]
    fn test_extension_does_not_disturb_builtins() {
        let mut catalog = Catalog::builtin();
        let before = catalog.len();
        catalog
            .register(
                ResourceType::new("azure", "compute", "vm"),
                NodeTemplate::new(NodeShape::Box, "compute", "azure/compute/vm"),
            )
            .expect("Should register new provider");
        assert_eq!(catalog.len(), before + 1);
        assert!(catalog.contains(&ResourceType::new("aws", "storage", "s3")));
    }
}
