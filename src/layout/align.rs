use crate::config::DistributeConfig;
use crate::ir::{Axis, Node};

/// Snaps every other node to the pivot's coordinate on `axis`.
///
/// An unknown pivot leaves the nodes untouched.
pub fn align_axis(nodes: &[Node], pivot_id: &str, axis: Axis) -> Vec<Node> {
    let Some(pivot) = nodes.iter().find(|node| node.id == pivot_id) else {
        tracing::debug!(pivot = pivot_id, "align pivot not found");
        return nodes.to_vec();
    };
    let value = pivot.position.get(axis);
    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.id != pivot_id {
                node.position.set(axis, value);
            }
            node
        })
        .collect()
}

/// Respaces nodes evenly along `axis` in ascending order of their current
/// coordinate. Ties keep input order. Output keeps input order too.
pub fn distribute(nodes: &[Node], axis: Axis, config: &DistributeConfig) -> Vec<Node> {
    let step = match axis {
        Axis::X => config.step_x,
        Axis::Y => config.step_y,
    };
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| {
        nodes[a]
            .position
            .get(axis)
            .total_cmp(&nodes[b].position.get(axis))
    });

    let mut out = nodes.to_vec();
    for (slot, idx) in order.into_iter().enumerate() {
        out[idx]
            .position
            .set(axis, config.offset + slot as f32 * step);
    }
    out
}
