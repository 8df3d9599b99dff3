//! Integration tests for the render pipeline, driven through stand-in
//! layout engines so they run without Graphviz installed

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use cloudsketch::{Blueprint, Diagram, DiagramConfig, OutputFormat, RenderError, Renderer};
use serial_test::serial;

fn write_engine(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).expect("Should write engine script");
    let mut perms = fs::metadata(&path).expect("Should stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Should chmod script");
    path
}

fn small_blueprint(format: OutputFormat) -> Blueprint {
    let config = DiagramConfig::new().with_filename("tiny").with_format(format);
    let mut d = Diagram::open("Tiny", config).expect("Should open");
    let a = d.node("aws.compute.ec2", "A").expect("Should declare");
    let b = d.node("aws.storage.s3", "B").expect("Should declare");
    d.edge(a).label("writes").to(b).expect("Should connect");
    d.finalize().expect("Should finalize")
}

#[test]
#[serial]
fn test_render_writes_engine_output() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    // Echoes stdin back, standing in for a successful engine run
    let engine = write_engine(dir.path(), "fake-dot", "#!/bin/sh\ncat\n");

    let bp = small_blueprint(OutputFormat::Svg);
    let renderer = Renderer::new()
        .with_engine(engine.to_string_lossy().into_owned())
        .with_out_dir(dir.path());

    let path = renderer.render(&bp).expect("Should render");
    assert_eq!(path, dir.path().join("tiny.svg"));

    let written = fs::read_to_string(&path).expect("Should read output");
    assert_eq!(written, renderer.dot_source(&bp));
}

#[test]
#[serial]
fn test_render_overwrites_existing_output() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let engine = write_engine(dir.path(), "fake-dot", "#!/bin/sh\ncat\n");

    let bp = small_blueprint(OutputFormat::Png);
    let target = dir.path().join("tiny.png");
    fs::write(&target, "stale content").expect("Should seed file");

    let renderer = Renderer::new()
        .with_engine(engine.to_string_lossy().into_owned())
        .with_out_dir(dir.path());
    let path = renderer.render(&bp).expect("Should render");
    assert_eq!(path, target);

    let written = fs::read_to_string(&target).expect("Should read output");
    assert!(written.starts_with("digraph"));
}

#[test]
#[serial]
fn test_failed_engine_surfaces_stderr_verbatim() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let engine = write_engine(
        dir.path(),
        "broken-dot",
        "#!/bin/sh\necho 'syntax error in line 3' >&2\nexit 3\n",
    );

    let bp = small_blueprint(OutputFormat::Png);
    let renderer = Renderer::new()
        .with_engine(engine.to_string_lossy().into_owned())
        .with_out_dir(dir.path());

    match renderer.render(&bp) {
        Err(RenderError::RendererFailed { status, stderr, .. }) => {
            assert_eq!(status.code(), Some(3));
            assert_eq!(stderr, "syntax error in line 3");
        }
        other => panic!("expected RendererFailed, got {:?}", other),
    }

    // No partial output on failure
    assert!(!dir.path().join("tiny.png").exists());
}

#[test]
#[serial]
fn test_missing_engine() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let bp = small_blueprint(OutputFormat::Png);
    let renderer = Renderer::new()
        .with_engine("cloudsketch-no-such-engine")
        .with_out_dir(dir.path());

    match renderer.render(&bp) {
        Err(RenderError::MissingRenderer { engine }) => {
            assert_eq!(engine, "cloudsketch-no-such-engine");
        }
        other => panic!("expected MissingRenderer, got {:?}", other),
    }
    assert!(!dir.path().join("tiny.png").exists());
}

#[test]
#[serial]
fn test_render_is_structurally_idempotent() {
    let dir = tempfile::tempdir().expect("Should create tempdir");
    let engine = write_engine(dir.path(), "fake-dot", "#!/bin/sh\ncat\n");

    let bp = small_blueprint(OutputFormat::Svg);
    let renderer = Renderer::new()
        .with_engine(engine.to_string_lossy().into_owned())
        .with_out_dir(dir.path());

    let first_path = renderer.render(&bp).expect("Should render");
    let first = fs::read(&first_path).expect("Should read output");
    let second_path = renderer.render(&bp).expect("Should render again");
    let second = fs::read(&second_path).expect("Should read output");

    assert_eq!(first_path, second_path);
    assert_eq!(first, second);
}
