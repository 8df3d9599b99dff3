//! Render pipeline: DOT serialization and layout engine invocation
//!
//! The pipeline hands the serialized graph to an external Graphviz engine
//! over stdin, captures the rendered image from stdout, and only writes the
//! output file once the engine has succeeded. Engine failures are surfaced
//! verbatim; rendering is one-shot and never retried.

pub mod dot;

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::graph::Blueprint;
use crate::theme::Theme;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    /// The layout engine binary is not installed or not on PATH
    #[error("layout engine '{engine}' not found on PATH")]
    MissingRenderer { engine: String },

    /// The layout engine exited with a failure status; stderr is attached
    /// verbatim
    #[error("layout engine '{engine}' failed ({status}): {stderr}")]
    RendererFailed {
        engine: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The layout engine process could not be driven
    #[error("failed to invoke layout engine '{engine}': {source}")]
    Spawn {
        engine: String,
        source: std::io::Error,
    },

    /// The output file could not be written
    #[error("failed to write output file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Renders finalized blueprints through an external layout engine
#[derive(Debug, Clone)]
pub struct Renderer {
    engine: String,
    out_dir: PathBuf,
    theme: Theme,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            engine: "dot".to_string(),
            out_dir: PathBuf::from("."),
            theme: Theme::default(),
        }
    }
}

impl Renderer {
    /// Create a renderer with the default engine (`dot`), the current
    /// directory for output, and the default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout engine program name or path
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the output directory
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Set the theme used for node and cluster colors
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The serialized graph description for a blueprint
    pub fn dot_source(&self, blueprint: &Blueprint) -> String {
        dot::serialize(blueprint, &self.theme)
    }

    /// Render a blueprint to an image file
    ///
    /// Returns the path of the produced file. On failure no output file is
    /// written or modified; on success an existing file at the path is
    /// overwritten.
    pub fn render(&self, blueprint: &Blueprint) -> Result<PathBuf, RenderError> {
        let source = self.dot_source(blueprint);
        let format = blueprint.config().format;

        let mut child = Command::new(&self.engine)
            .arg(format!("-T{}", format.extension()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    RenderError::MissingRenderer {
                        engine: self.engine.clone(),
                    }
                } else {
                    RenderError::Spawn {
                        engine: self.engine.clone(),
                        source,
                    }
                }
            })?;

        // A failing engine may exit before draining stdin; its exit status is
        // the primary failure signal, so the write result is checked after.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(|source| RenderError::Spawn {
            engine: self.engine.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RenderError::RendererFailed {
                engine: self.engine.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        write_result.map_err(|source| RenderError::Spawn {
            engine: self.engine.clone(),
            source,
        })?;

        let path = self
            .out_dir
            .join(format!("{}.{}", blueprint.output_stem(), format.extension()));
        std::fs::write(&path, &output.stdout).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renderer() {
        let renderer = Renderer::new();
        assert_eq!(renderer.engine, "dot");
        assert_eq!(renderer.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_builder_pattern() {
        let renderer = Renderer::new()
            .with_engine("neato")
            .with_out_dir("/tmp/diagrams");
        assert_eq!(renderer.engine, "neato");
        assert_eq!(renderer.out_dir, PathBuf::from("/tmp/diagrams"));
    }
}
