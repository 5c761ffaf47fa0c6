use crate::ir::Graph;
use crate::layout::{node_rect, overlap_area};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub overlaps: Vec<OverlapDump>,
}

#[derive(Debug, Serialize)]
pub struct OverlapDump {
    pub a: String,
    pub b: String,
    pub area: f32,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub from_handle: Option<String>,
    pub to_handle: Option<String>,
}

impl LayoutDump {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind.to_string(),
                x: node.position.x,
                y: node.position.y,
                width: node.size.width,
                height: node.size.height,
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                from: edge.source_id.clone(),
                to: edge.target_id.clone(),
                from_handle: edge.source_handle.clone(),
                to_handle: edge.target_handle.clone(),
            })
            .collect();

        let overlaps = graph
            .overlapping_pairs()
            .into_iter()
            .map(|(a, b)| {
                let area = match (graph.node(&a), graph.node(&b)) {
                    (Some(left), Some(right)) => overlap_area(&node_rect(left), &node_rect(right)),
                    _ => 0.0,
                };
                OverlapDump { a, b, area }
            })
            .collect();

        let (x, y, width, height) = graph.bounds().unwrap_or((0.0, 0.0, 0.0, 0.0));
        LayoutDump {
            x,
            y,
            width,
            height,
            nodes,
            edges,
            overlaps,
        }
    }
}

pub fn write_layout_dump(path: Option<&Path>, graph: &Graph) -> anyhow::Result<()> {
    let dump = LayoutDump::from_graph(graph);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}
