use agent_canvas::layout::{auto_arrange, connect_ports, delete_node, distribute, find_free_position};
use agent_canvas::{Axis, Config, Edge, Graph, Node, Point, config::parse_config};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasOptions {
    /// JSON5 layout overrides, same shape as the CLI config file.
    config: Option<String>,
}

#[derive(Debug, Serialize)]
struct GraphResult {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

fn build_config(options_json: Option<String>) -> Result<Config, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<CanvasOptions>(&raw).map_err(|e| e.to_string())?,
        None => CanvasOptions::default(),
    };
    match options.config {
        Some(raw) => parse_config(&raw).map_err(|e| e.to_string()),
        None => Ok(Config::default()),
    }
}

fn parse_axis(axis: &str) -> Result<Axis, String> {
    Axis::from_token(axis).ok_or_else(|| format!("unknown axis {axis:?}"))
}

fn load(graph_json: &str) -> Result<Graph, String> {
    agent_canvas::parse_graph(graph_json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn place_json(graph_json: &str, x: Option<f32>, y: Option<f32>, options: Option<String>) -> Result<String, String> {
    let config = build_config(options)?;
    let graph = load(graph_json)?;
    let preferred = x.zip(y).map(|(x, y)| Point::new(x, y));
    to_json(&find_free_position(preferred, &graph.nodes, &config.layout))
}

fn arrange_json(graph_json: &str, options: Option<String>) -> Result<String, String> {
    let config = build_config(options)?;
    let graph = load(graph_json)?;
    to_json(&GraphResult {
        nodes: auto_arrange(&graph.nodes, &config.layout.arrange),
        edges: graph.edges,
    })
}

fn distribute_json(graph_json: &str, axis: &str, options: Option<String>) -> Result<String, String> {
    let config = build_config(options)?;
    let graph = load(graph_json)?;
    to_json(&GraphResult {
        nodes: distribute(&graph.nodes, parse_axis(axis)?, &config.layout.distribute),
        edges: graph.edges,
    })
}

fn align_json(graph_json: &str, pivot_id: &str, axis: &str) -> Result<String, String> {
    let graph = load(graph_json)?;
    to_json(&GraphResult {
        nodes: agent_canvas::layout::align_axis(&graph.nodes, pivot_id, parse_axis(axis)?),
        edges: graph.edges,
    })
}

fn delete_json(graph_json: &str, node_id: &str) -> Result<String, String> {
    let graph = load(graph_json)?;
    let (nodes, edges) = delete_node(&graph.nodes, &graph.edges, node_id);
    to_json(&GraphResult { nodes, edges })
}

fn connect_json(
    graph_json: &str,
    source_id: &str,
    target_id: &str,
    source_handle: Option<String>,
    target_handle: Option<String>,
) -> Result<String, String> {
    let graph = load(graph_json)?;
    let edges = connect_ports(
        &graph.edges,
        source_id,
        target_id,
        source_handle.as_deref(),
        target_handle.as_deref(),
    );
    to_json(&GraphResult {
        nodes: graph.nodes,
        edges,
    })
}

#[wasm_bindgen(js_name = findFreePosition)]
pub fn find_free_position_js(
    graph_json: &str,
    x: Option<f32>,
    y: Option<f32>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    place_json(graph_json, x, y, options_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = autoArrange)]
pub fn auto_arrange_js(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    arrange_json(graph_json, options_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = alignAxis)]
pub fn align_axis_js(graph_json: &str, pivot_id: &str, axis: &str) -> Result<String, JsValue> {
    align_json(graph_json, pivot_id, axis).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = distribute)]
pub fn distribute_js(graph_json: &str, axis: &str, options_json: Option<String>) -> Result<String, JsValue> {
    distribute_json(graph_json, axis, options_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = deleteNode)]
pub fn delete_node_js(graph_json: &str, node_id: &str) -> Result<String, JsValue> {
    delete_json(graph_json, node_id).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = connect)]
pub fn connect_js(
    graph_json: &str,
    source_id: &str,
    target_id: &str,
    source_handle: Option<String>,
    target_handle: Option<String>,
) -> Result<String, JsValue> {
    connect_json(graph_json, source_id, target_id, source_handle, target_handle)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{
      "nodes": [
        {"id": "a", "kind": "tool", "position": {"x": 50, "y": 50}},
        {"id": "b", "kind": "identity", "position": {"x": 400, "y": 50}}
      ],
      "edges": [{"id": "e1", "sourceId": "a", "targetId": "b"}]
    }"#;

    #[test]
    fn places_next_to_existing_nodes() {
        let out = place_json(GRAPH, None, None, None).unwrap();
        let point: Point = serde_json::from_str(&out).unwrap();
        assert_eq!(point, Point::new(750.0, 50.0));
    }

    #[test]
    fn honours_config_overrides() {
        let options = r#"{"config": "{ origin: { x: 0, y: 0 } }"}"#.to_string();
        let out = place_json("{}", None, None, Some(options)).unwrap();
        let point: Point = serde_json::from_str(&out).unwrap();
        assert_eq!(point, Point::new(0.0, 0.0));
    }

    #[test]
    fn arrange_and_delete_round_through_json() {
        let arranged: Graph = serde_json::from_str(&arrange_json(GRAPH, None).unwrap()).unwrap();
        assert!(arranged.nodes[1].position.y < arranged.nodes[0].position.y);

        let deleted: Graph = serde_json::from_str(&delete_json(GRAPH, "b").unwrap()).unwrap();
        assert_eq!(deleted.nodes.len(), 1);
        assert!(deleted.edges.is_empty());
    }

    #[test]
    fn rejects_unknown_axis() {
        assert!(distribute_json(GRAPH, "z", None).is_err());
        assert!(align_json(GRAPH, "a", "diagonal").is_err());
    }
}
