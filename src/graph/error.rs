//! Error types for diagram construction

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that can occur while building a diagram
#[derive(Debug, Error)]
pub enum GraphError {
    /// A second session was opened while one is still under construction
    #[error("a diagram session is already active in this process")]
    SessionAlreadyActive,

    /// `close_cluster` was called with no open cluster scope
    #[error("no cluster scope is open")]
    NoOpenCluster,

    /// Finalize was called with cluster scopes still open
    #[error("unbalanced cluster scopes at finalize; still open: {}", open.join(", "))]
    UnbalancedClusters { open: Vec<String> },

    /// An edge endpoint does not belong to this session
    #[error("dangling edge endpoint: node handle does not belong to this session")]
    DanglingEndpoint,

    /// Resource type lookup or parse failure
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GraphError {
    /// Create an unbalanced-clusters error naming the still-open scopes,
    /// innermost last
    pub fn unbalanced(open: Vec<String>) -> Self {
        Self::UnbalancedClusters { open }
    }
}
