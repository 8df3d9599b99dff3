//! Integration tests for DOT serialization of finalized diagrams

use cloudsketch::{Diagram, DiagramConfig, Renderer};
use pretty_assertions::assert_eq;
use serial_test::serial;

/// The end-to-end structural scenario: one cluster with one member, one
/// top-level node, one directed labeled edge
fn scenario() -> cloudsketch::Blueprint {
    let mut d = Diagram::open("T", DiagramConfig::default()).expect("Should open");
    d.open_cluster("Net");
    let vpc = d.node("aws.network.vpc", "vpc").expect("Should declare");
    d.close_cluster().expect("Should close");
    let web = d.node("aws.compute.ec2", "web").expect("Should declare");
    d.edge(vpc).label("routes").to(web).expect("Should connect");
    d.finalize().expect("Should finalize")
}

#[test]
#[serial]
fn test_scenario_structure() {
    let bp = scenario();
    assert_eq!(bp.clusters().len(), 1);
    assert_eq!(bp.clusters()[0].name, "Net");
    assert_eq!(bp.nodes().len(), 2);
    assert_eq!(bp.nodes()[0].cluster, Some(0));
    assert_eq!(bp.nodes()[1].cluster, None);
    assert_eq!(bp.edges().len(), 1);
    assert_eq!(bp.edges()[0].attrs.label.as_deref(), Some("routes"));
}

#[test]
#[serial]
fn test_scenario_dot_snapshot() {
    let dot = Renderer::new().dot_source(&scenario());
    insta::assert_snapshot!(dot, @r###"
digraph T {
  label="T";
  labelloc="t";
  fontsize="15";
  fontcolor="#2d3436";
  bgcolor="white";
  rankdir="TB";
  pad="0.5";
  nodesep="0.6";
  ranksep="0.75";
  splines="ortho";

  node [style="filled", fontcolor="#ffffff"];
  edge [color="#7b8894", fontcolor="#7b8894"];

  n1 [label="web", shape="box", fillcolor="#ed7100"];
  subgraph cluster_0 {
    label="Net";
    labeljust="l";
    style="rounded";
    pencolor="#aeb6be";
    fontsize="12";
    bgcolor="#e5f5fd";
    n0 [label="vpc", shape="ellipse", fillcolor="#8c4fff"];
  }

  n0 -> n1 [label="routes"];
}
"###);
}

#[test]
#[serial]
fn test_serialization_is_deterministic() {
    let bp = scenario();
    let renderer = Renderer::new();
    let first = renderer.dot_source(&bp);
    let second = renderer.dot_source(&bp);
    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_direction_and_format_flow_into_output() {
    use cloudsketch::{Direction, OutputFormat};

    let config = DiagramConfig::new()
        .with_direction(Direction::LeftToRight)
        .with_format(OutputFormat::Svg)
        .with_font_size(20);
    let mut d = Diagram::open("Wide", config).expect("Should open");
    d.node("aws.storage.s3", "Bucket").expect("Should declare");
    let bp = d.finalize().expect("Should finalize");

    let dot = Renderer::new().dot_source(&bp);
    assert!(dot.contains(r#"rankdir="LR""#));
    assert!(dot.contains(r#"fontsize="20""#));
    assert_eq!(bp.config().format, OutputFormat::Svg);
}

#[test]
#[serial]
fn test_special_characters_in_labels() {
    let mut d = Diagram::open("Quotes \"and\" breaks", DiagramConfig::default())
        .expect("Should open");
    d.node("aws.storage.s3", "Line\nBreak").expect("Should declare");
    let bp = d.finalize().expect("Should finalize");

    let dot = Renderer::new().dot_source(&bp);
    assert!(dot.contains(r#"label="Quotes \"and\" breaks";"#));
    assert!(dot.contains(r#"label="Line\nBreak""#));
    // The graph identifier itself stays alphanumeric
    assert!(dot.starts_with("digraph Quotes__and__breaks {"));
}
