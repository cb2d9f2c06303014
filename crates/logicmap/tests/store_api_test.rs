//! Integration tests for the LogicMap public API
//!
//! These tests verify that the public API works and is usable.

use logicmap::{
    LogicMap, LogicMapError,
    bibliography,
    core::{geometry::Point, node::NodeKind, reference::Reference},
    export::svg::SvgExporter,
};

#[test]
fn test_full_editing_flow() {
    let mut map = LogicMap::new();

    let question = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
    let problem = map.add_node(NodeKind::Problem, Point::new(300.0, 0.0));
    let solution = map.add_node(NodeKind::Solution, Point::new(600.0, 0.0));

    map.connect(question, problem).expect("connect q -> p");
    map.connect(problem, solution).expect("connect p -> s");

    map.set_node_text(question, "Why is the build slow?")
        .expect("set text");
    map.add_reference(
        solution,
        Reference::new("https://doi.org/10.1000/demo").with_title("Build Systems"),
    )
    .expect("add reference");

    assert_eq!(map.node_count(), 3);
    assert_eq!(map.connections().len(), 2);

    // removing the middle node takes both of its connections with it
    let removed = map.remove_node(problem).expect("remove");
    assert_eq!(removed.len(), 2);
    assert!(map.connections().is_empty());
    assert_eq!(map.node_count(), 2);
}

#[test]
fn test_save_load_roundtrip_through_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("map.lmx");

    let mut map = LogicMap::new();
    let a = map.add_node(NodeKind::Question, Point::new(10.0, 20.0));
    let b = map.add_node(NodeKind::Conclusion, Point::new(400.0, 20.0));
    map.connect(a, b).expect("connect");
    map.set_node_text(a, "line one\nline two").expect("set text");

    map.save(&path).expect("save");
    let loaded = LogicMap::load(&path).expect("load");

    assert_eq!(loaded.project(), map.project());
    assert_eq!(loaded.node_count(), 2);
    assert_eq!(loaded.node(a).expect("node a").text(), "line one\nline two");
    assert_eq!(loaded.connections(), map.connections());
}

#[test]
fn test_load_failure_reports_an_error_without_a_map() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.lmx");
    std::fs::write(&path, "<LogicMap><Node id=\"n\"/></LogicMap>").expect("write");

    let result = LogicMap::load(&path);
    assert!(matches!(result, Err(LogicMapError::Xml(_))));
}

#[test]
fn test_exports_work_on_the_same_map() {
    let mut map = LogicMap::new();
    let q = map.add_node(NodeKind::Question, Point::new(0.0, 0.0));
    map.set_node_text(q, "What changed?").expect("set text");
    map.add_reference(q, Reference::new("doi:1").with_title("Changelog"))
        .expect("add reference");

    let svg = SvgExporter::default().export(&map);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("What changed?"));

    let bib = bibliography::render(&map);
    assert!(bib.contains("Changelog (doi:1)"));
}
