use crate::ir::{Edge, Node};

/// Drops the node and every edge touching it. Unknown ids change nothing.
pub fn delete_node(nodes: &[Node], edges: &[Edge], node_id: &str) -> (Vec<Node>, Vec<Edge>) {
    if !nodes.iter().any(|node| node.id == node_id) {
        return (nodes.to_vec(), edges.to_vec());
    }
    let kept_nodes: Vec<Node> = nodes.iter().filter(|node| node.id != node_id).cloned().collect();
    let kept_edges: Vec<Edge> = edges.iter().filter(|edge| !edge.touches(node_id)).cloned().collect();
    tracing::debug!(
        node = node_id,
        edges_removed = edges.len() - kept_edges.len(),
        "deleted node"
    );
    (kept_nodes, kept_edges)
}

pub fn connect(edges: &[Edge], source_id: &str, target_id: &str) -> Vec<Edge> {
    connect_ports(edges, source_id, target_id, None, None)
}

/// Appends an edge between two ports. Self-loops are silently ignored;
/// parallel edges are allowed.
pub fn connect_ports(
    edges: &[Edge],
    source_id: &str,
    target_id: &str,
    source_handle: Option<&str>,
    target_handle: Option<&str>,
) -> Vec<Edge> {
    let mut out = edges.to_vec();
    if source_id == target_id {
        tracing::debug!(node = source_id, "ignoring self-loop");
        return out;
    }
    out.push(Edge {
        id: new_edge_id(),
        source_id: source_id.to_string(),
        target_id: target_id.to_string(),
        source_handle: source_handle.map(str::to_string),
        target_handle: target_handle.map(str::to_string),
    });
    out
}

pub fn new_edge_id() -> String {
    format!("edge-{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{NodeKind, Point};

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter()
            .map(|id| Node::new(*id, NodeKind::Tool, Point::default()))
            .collect()
    }

    #[test]
    fn delete_cascades_to_edges() {
        let nodes = nodes(&["A", "B", "C"]);
        let edges = connect(&connect(&[], "A", "B"), "B", "C");
        let (nodes, edges) = delete_node(&nodes, &edges, "B");
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(edges.is_empty());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let nodes = nodes(&["A", "B"]);
        let edges = connect(&[], "A", "B");
        let (out_nodes, out_edges) = delete_node(&nodes, &edges, "Z");
        assert_eq!(out_nodes, nodes);
        assert_eq!(out_edges, edges);
    }

    #[test]
    fn self_loop_rejected() {
        let edges = connect(&[], "A", "B");
        assert_eq!(connect(&edges, "A", "A"), edges);
    }

    #[test]
    fn parallel_edges_get_distinct_ids() {
        let edges = connect(&connect(&[], "A", "B"), "A", "B");
        assert_eq!(edges.len(), 2);
        assert_ne!(edges[0].id, edges[1].id);
        assert!(edges[0].id.starts_with("edge-"));
    }

    #[test]
    fn ports_are_recorded() {
        let edges = connect_ports(&[], "cond", "yes", Some("true"), None);
        assert_eq!(edges[0].source_handle.as_deref(), Some("true"));
        assert_eq!(edges[0].target_handle, None);
    }
}
