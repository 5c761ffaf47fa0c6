use crate::error::CanvasError;
use crate::ir::Graph;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.:\-]*$").unwrap());
static ID_INVALID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.:\-]").unwrap());

/// Turns arbitrary text (a custom kind name) into a prefix that keeps the
/// generated node id loadable.
pub fn id_prefix(raw: &str) -> String {
    let cleaned = ID_INVALID_RE.replace_all(raw, "_");
    match cleaned.chars().next() {
        None => "node".to_string(),
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => cleaned.into_owned(),
        Some(_) => format!("node{cleaned}"),
    }
}

/// Parses a graph document, rejecting bad or duplicate node ids and pruning
/// edges whose endpoints do not exist.
pub fn parse_graph(input: &str) -> Result<Graph, CanvasError> {
    let mut graph: Graph = serde_json::from_str(input)?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        if !ID_RE.is_match(&node.id) {
            return Err(CanvasError::InvalidId(node.id.clone()));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(CanvasError::DuplicateNode(node.id.clone()));
        }
    }

    let before = graph.edges.len();
    graph.edges.retain(|edge| {
        let valid = seen.contains(edge.source_id.as_str()) && seen.contains(edge.target_id.as_str());
        if !valid {
            tracing::warn!(
                edge = %edge.id,
                source = %edge.source_id,
                target = %edge.target_id,
                "pruning dangling edge"
            );
        }
        valid
    });
    if graph.edges.len() != before {
        tracing::debug!(pruned = before - graph.edges.len(), "edges pruned on load");
    }

    Ok(graph)
}

pub fn graph_to_json(graph: &Graph) -> Result<String, CanvasError> {
    Ok(serde_json::to_string_pretty(graph)?)
}
