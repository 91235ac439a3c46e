//! Builder assembly of trees with pre-wired sinks.

use logtree::{Level, LogTreeBuilder};

#[test]
fn empty_builder_yields_working_tree() {
    let tree = LogTreeBuilder::new().build().unwrap();
    // Routes to nothing, but logging is still valid.
    tree.get("app").info("no sinks");
}

#[test]
fn builder_file_sink_honors_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");

    let tree = LogTreeBuilder::new()
        .with_file("app", &path, Level::Warning)
        .build()
        .unwrap();

    let logger = tree.get("app");
    logger.info("below threshold");
    logger.error("above threshold");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("below threshold"));
    assert!(contents.contains("above threshold"));
}

#[test]
fn builder_subscribes_at_given_path_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");

    let tree = LogTreeBuilder::new()
        .with_file("app", &path, Level::Any)
        .build()
        .unwrap();

    tree.get("app").info("routed");
    tree.get("worker").info("not routed");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("routed"));
    assert!(!contents.contains("not routed"));
}

#[test]
fn builder_file_open_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no/such/dir/app.log");

    let result = LogTreeBuilder::new()
        .with_file("app", &missing, Level::Any)
        .build();
    assert!(result.is_err());
}

#[test]
fn builder_console_sink_constructs() {
    let tree = LogTreeBuilder::new()
        .with_console("app", Level::Critical, false)
        .build()
        .unwrap();
    // Below the threshold, so nothing reaches stdout from this test.
    tree.get("app").debug("quiet");
}
