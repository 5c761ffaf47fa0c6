use std::path::{Path, PathBuf};

use agent_canvas::layout::{auto_arrange, find_free_position};
use agent_canvas::{
    Axis, Canvas, Config, Graph, GraphLayoutEngine, LayoutConfig, NodeKind, Point, load_config,
    parse_graph,
};

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn load_fixture(rel: &str) -> Graph {
    let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
    parse_graph(&input).expect("parse failed")
}

fn y_of(graph: &[agent_canvas::Node], id: &str) -> f32 {
    graph.iter().find(|n| n.id == id).unwrap().position.y
}

#[test]
fn dangling_edges_pruned_on_load() {
    let graph = load_fixture("support_agent.json");
    assert_eq!(graph.nodes.len(), 8);
    assert_eq!(graph.edges.len(), 5);
    assert!(graph.edges.iter().all(|e| e.id != "e6"));
}

#[test]
fn arrange_orders_rows_by_kind_priority() {
    let graph = load_fixture("support_agent.json");
    let arranged = auto_arrange(&graph.nodes, &LayoutConfig::default().arrange);

    let order = ["persona", "inbound", "is-vip", "faq", "system", "lookup", "reply", "crm-sync"];
    let ys: Vec<f32> = order.iter().map(|id| y_of(&arranged, id)).collect();
    assert_eq!(
        ys,
        vec![100.0, 350.0, 600.0, 850.0, 1100.0, 1350.0, 1600.0, 1850.0]
    );
    assert!(arranged.iter().all(|n| n.position.x == 100.0));

    let ids: Vec<&str> = arranged.iter().map(|n| n.id.as_str()).collect();
    let input_ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, input_ids);
}

#[test]
fn arranged_graph_has_no_overlaps() {
    let graph = load_fixture("support_agent.json");
    let mut canvas = Canvas::with_graph(graph, Config::default());
    assert!(canvas.auto_arrange());
    assert!(canvas.graph().overlapping_pairs().is_empty());
    assert_eq!(canvas.graph().edges.len(), 5);
}

#[test]
fn dense_row_places_after_last_column() {
    let graph = load_fixture("dense_row.json");
    let engine = GraphLayoutEngine::default();
    assert_eq!(engine.find_free_position(None, &graph.nodes), Point::new(1450.0, 50.0));
}

#[test]
fn config_file_shrinks_search_grid() {
    let config = load_config(Some(fixture_path("layout.json5").as_path())).expect("config load failed");
    assert_eq!(config.layout.pitch_x(), 300.0);
    let graph = load_fixture("dense_row.json");
    let at = find_free_position(None, &graph.nodes, &config.layout);
    assert_eq!(at, Point::new(650.0, 200.0));
}

#[test]
fn delete_condition_drops_its_branches() {
    let graph = load_fixture("support_agent.json");
    let mut canvas = Canvas::with_graph(graph, Config::default());
    assert!(canvas.delete_node("is-vip"));
    let ids: Vec<&str> = canvas.graph().edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e4", "e5"]);
    assert!(!canvas.graph().contains_node("is-vip"));
}

#[test]
fn overlapping_pair_resolved_by_placement() {
    // A and B both sit on the origin; a third node still lands on a free cell.
    let mut graph = Graph::new();
    graph.nodes.push(agent_canvas::Node::new("A", NodeKind::Tool, Point::new(50.0, 50.0)));
    let engine = GraphLayoutEngine::default();
    assert_eq!(engine.find_free_position(None, &graph.nodes), Point::new(400.0, 50.0));

    graph.nodes.push(agent_canvas::Node::new("B", NodeKind::Tool, Point::new(50.0, 50.0)));
    let at = engine.find_free_position(None, &graph.nodes);
    assert_eq!(at, Point::new(400.0, 50.0));
}

#[test]
fn distribute_then_align_selection() {
    let graph = load_fixture("dense_row.json");
    let mut canvas = Canvas::with_graph(graph, Config::default());
    assert!(canvas.distribute_all(Axis::X));
    let xs: Vec<f32> = canvas.graph().nodes.iter().map(|n| n.position.x).collect();
    assert_eq!(xs, vec![100.0, 700.0, 1000.0, 1300.0, 400.0]);

    let version = canvas.version();
    assert!(canvas.align_selection(&["n4".to_string()], "n0", Axis::Y));
    assert!(!canvas.align_selection(&["n4".to_string()], "n0", Axis::Y));
    assert_eq!(canvas.version(), version + 1);
    assert_eq!(canvas.graph().node("n4").unwrap().position.y, 50.0);
}
