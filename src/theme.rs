//! Theme system for node and cluster coloring
//!
//! This module provides symbolic color tokens that are resolved to concrete
//! values via TOML theme files. Node templates carry category tokens
//! (`compute`, `database`, ...) rather than hex values, so a diagram can be
//! re-rendered under a different palette without touching the topology.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A theme mapping symbolic color tokens to concrete values
#[derive(Debug, Clone)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette - one strong color per resource category, muted chrome,
/// pastel cluster fills cycled by nesting depth
const DEFAULT_PALETTE: &str = r##"
[colors]
# Resource categories
compute = "#ed7100"
database = "#c925d1"
network = "#8c4fff"
storage = "#7aa116"
security = "#dd344c"
integration = "#e7157b"
management = "#b0084d"
engagement = "#d6246d"
general = "#232f3e"
client = "#5a6b86"
ci = "#2088ff"

# Chrome
text = "#2d3436"
edge = "#7b8894"
outline = "#aeb6be"
node-text = "#ffffff"

# Cluster fills by nesting depth
cluster-0 = "#e5f5fd"
cluster-1 = "#ebf3e7"
cluster-2 = "#ece8f6"
cluster-3 = "#fdf7e3"
"##;

/// Number of depth-cycled cluster fill tokens in the default palette
const CLUSTER_FILL_CYCLE: usize = 4;

impl Theme {
    /// Load theme from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load theme from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this theme.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to the default palette
    ///
    /// Fallback order:
    /// 1. Check this theme for the exact token
    /// 2. Check the default palette for the exact token
    /// 3. Use a category default (cluster-* tokens get the depth-0 fill,
    ///    anything else a neutral slate)
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        if token.starts_with("cluster") {
            return "#e5f5fd".to_string();
        }

        "#5f6b7a".to_string()
    }

    /// Fill color for a cluster at the given nesting depth
    ///
    /// Depths beyond the palette cycle wrap around, matching how deeply
    /// nested groups alternate their backgrounds.
    pub fn cluster_fill(&self, depth: usize) -> String {
        self.resolve_or_default(&format!("cluster-{}", depth % CLUSTER_FILL_CYCLE))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert!(theme.colors.contains_key("compute"));
        assert!(theme.colors.contains_key("database"));
        assert!(theme.colors.contains_key("edge"));
        assert!(theme.colors.contains_key("cluster-0"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let theme = Theme::default();
        assert_eq!(theme.resolve("compute"), Some("#ed7100"));
        assert_eq!(theme.resolve("network"), Some("#8c4fff"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let theme = Theme::default();
        assert_eq!(theme.resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_or_default_fallback() {
        // Empty theme should fall back to defaults
        let empty = Theme {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        assert_eq!(empty.resolve_or_default("compute"), "#ed7100");
    }

    #[test]
    fn test_resolve_or_default_category_fallback() {
        let empty = Theme {
            name: None,
            description: None,
            colors: HashMap::new(),
        };
        // Unknown cluster token still gets a cluster fill
        assert_eq!(empty.resolve_or_default("cluster-99"), "#e5f5fd");
        // Unknown category gets the neutral slate
        assert_eq!(empty.resolve_or_default("analytics"), "#5f6b7a");
    }

    #[test]
    fn test_cluster_fill_cycles_by_depth() {
        let theme = Theme::default();
        assert_eq!(theme.cluster_fill(0), "#e5f5fd");
        assert_eq!(theme.cluster_fill(1), "#ebf3e7");
        assert_eq!(theme.cluster_fill(4), theme.cluster_fill(0));
        assert_eq!(theme.cluster_fill(7), theme.cluster_fill(3));
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Mono"
description = "Grayscale palette"

[colors]
compute = "#444444"
"##;
        let theme = Theme::from_str(toml_str).expect("Should parse");
        assert_eq!(theme.name, Some("Mono".to_string()));
        assert_eq!(theme.description, Some("Grayscale palette".to_string()));
        assert_eq!(theme.resolve("compute"), Some("#444444"));
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let toml_str = r##"
[colors]
storage = "#111111"
"##;
        let theme = Theme::from_str(toml_str).expect("Should parse");
        assert_eq!(theme.name, None);
        assert_eq!(theme.resolve("storage"), Some("#111111"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Theme::from_str(invalid);
        assert!(result.is_err());
    }
}
