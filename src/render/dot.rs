//! DOT serialization of a finalized blueprint
//!
//! Produces the textual graph description consumed by the external layout
//! engine: graph attributes, the cluster tree as nested subgraphs, node
//! statements, and a flat edge list. Serialization is deterministic: the
//! same blueprint always yields byte-identical output.

use crate::graph::{Arrow, Blueprint, LineStyle};
use crate::theme::Theme;

/// Escape special characters for DOT string values
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Sanitize a string to be a valid DOT identifier
pub fn sanitize(input: &str) -> String {
    let id: String = input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if id.is_empty() {
        "G".to_string()
    } else {
        id
    }
}

/// Indentation-tracking line writer
struct DotWriter {
    out: String,
    indent: usize,
}

impl DotWriter {
    fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
            indent: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn kv(&mut self, key: &str, value: &str) {
        self.line(&format!("{}=\"{}\";", key, escape(value)));
    }

    fn open(&mut self, header: &str) {
        self.line(header);
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent -= 1;
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Format a bracketed attribute list body
fn attr_list(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, escape(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialize a blueprint into the layout engine's input format
pub fn serialize(blueprint: &Blueprint, theme: &Theme) -> String {
    let config = blueprint.config();
    let mut w = DotWriter::new();

    w.open(&format!("digraph {} {{", sanitize(blueprint.title())));
    w.kv("label", blueprint.title());
    w.kv("labelloc", "t");
    w.kv("fontsize", &config.font_size.to_string());
    w.kv("fontcolor", &theme.resolve_or_default("text"));
    w.kv("bgcolor", &config.background);
    w.kv("rankdir", config.direction.as_rankdir());
    w.kv("pad", &config.pad.to_string());
    w.kv("nodesep", &config.nodesep.to_string());
    w.kv("ranksep", &config.ranksep.to_string());
    w.kv("splines", "ortho");
    w.blank();

    let node_defaults = [
        ("style", "filled".to_string()),
        ("fontcolor", theme.resolve_or_default("node-text")),
    ];
    w.line(&format!("node [{}];", attr_list(&node_defaults)));
    let edge_color = theme.resolve_or_default("edge");
    let edge_defaults = [
        ("color", edge_color.clone()),
        ("fontcolor", edge_color),
    ];
    w.line(&format!("edge [{}];", attr_list(&edge_defaults)));
    w.blank();

    emit_scope(&mut w, blueprint, theme, None, 0);

    if !blueprint.edges().is_empty() {
        w.blank();
        for edge in blueprint.edges() {
            let mut attrs: Vec<(&str, String)> = Vec::new();
            if let Some(label) = &edge.attrs.label {
                attrs.push(("label", label.clone()));
            }
            if edge.attrs.style != LineStyle::Solid {
                attrs.push(("style", edge.attrs.style.as_dot().to_string()));
            }
            if let Some(color) = &edge.attrs.color {
                attrs.push(("color", color.clone()));
            }
            if edge.arrow == Arrow::Undirected {
                attrs.push(("dir", "none".to_string()));
            }

            if attrs.is_empty() {
                w.line(&format!("n{} -> n{};", edge.from, edge.to));
            } else {
                w.line(&format!("n{} -> n{} [{}];", edge.from, edge.to, attr_list(&attrs)));
            }
        }
    }

    w.close();
    w.finish()
}

/// Emit the nodes and child clusters owned by one scope, depth-first
fn emit_scope(
    w: &mut DotWriter,
    blueprint: &Blueprint,
    theme: &Theme,
    parent: Option<usize>,
    depth: usize,
) {
    for (index, node) in blueprint.cluster_nodes(parent) {
        let attrs = [
            ("label", node.label.clone()),
            ("shape", node.template.shape.as_dot().to_string()),
            ("fillcolor", theme.resolve_or_default(&node.template.fill)),
        ];
        w.line(&format!("n{} [{}];", index, attr_list(&attrs)));
    }

    for (index, cluster) in blueprint.cluster_children(parent) {
        w.open(&format!("subgraph cluster_{} {{", index));
        w.kv("label", &cluster.name);
        w.kv("labeljust", "l");
        w.kv("style", "rounded");
        w.kv("pencolor", &theme.resolve_or_default("outline"));
        w.kv("fontsize", "12");
        w.kv("bgcolor", &theme.cluster_fill(depth));
        emit_scope(w, blueprint, theme, Some(index), depth + 1);
        w.close();
    }
}
