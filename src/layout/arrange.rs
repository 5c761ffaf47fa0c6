use std::collections::HashMap;

use crate::config::ArrangeConfig;
use crate::ir::{Node, NodeKind, Point};

/// Lays nodes out in one row per kind.
///
/// Builtin kinds come first in vocabulary order, then custom kinds in the
/// order they are first seen. Within a row nodes keep their input order.
pub fn auto_arrange(nodes: &[Node], config: &ArrangeConfig) -> Vec<Node> {
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); NodeKind::BUILTIN.len()];
    let mut custom_rows: HashMap<&str, usize> = HashMap::new();

    for (idx, node) in nodes.iter().enumerate() {
        let row = match node.kind.arrange_rank() {
            Some(rank) => rank,
            None => *custom_rows.entry(node.kind.as_str()).or_insert_with(|| {
                rows.push(Vec::new());
                rows.len() - 1
            }),
        };
        rows[row].push(idx);
    }

    let mut positions = vec![Point::default(); nodes.len()];
    let mut y = config.origin.y;
    for row in rows.iter().filter(|row| !row.is_empty()) {
        for (col, &idx) in row.iter().enumerate() {
            positions[idx] = Point::new(config.origin.x + col as f32 * config.spacing_x, y);
        }
        y += config.spacing_y;
    }

    tracing::debug!(nodes = nodes.len(), "auto-arranged by kind");
    nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| Node {
            position,
            ..node.clone()
        })
        .collect()
}
