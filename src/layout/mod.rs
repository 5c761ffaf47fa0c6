mod align;
mod arrange;
mod edit;
pub(crate) mod geometry;
mod placement;

pub use align::{align_axis, distribute};
pub use arrange::auto_arrange;
pub use edit::{connect, connect_ports, delete_node, new_edge_id};
pub use geometry::{Rect, boxes_overlap, node_rect, overlap_area, rect_at};
pub use placement::{find_free_position, find_free_position_sized};

use crate::config::LayoutConfig;
use crate::ir::{Axis, Edge, Node, Point, Size};

/// Stateless placement and arrangement over caller-owned node collections.
///
/// Every operation is total: stale ids and empty inputs degrade to no-ops or
/// defaults instead of errors.
#[derive(Debug, Clone, Default)]
pub struct GraphLayoutEngine {
    config: LayoutConfig,
}

impl GraphLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn find_free_position(&self, preferred: Option<Point>, nodes: &[Node]) -> Point {
        find_free_position(preferred, nodes, &self.config)
    }

    pub fn find_free_position_sized(&self, preferred: Option<Point>, size: Size, nodes: &[Node]) -> Point {
        find_free_position_sized(preferred, size, nodes, &self.config)
    }

    pub fn auto_arrange(&self, nodes: &[Node]) -> Vec<Node> {
        auto_arrange(nodes, &self.config.arrange)
    }

    pub fn align_axis(&self, nodes: &[Node], pivot_id: &str, axis: Axis) -> Vec<Node> {
        align_axis(nodes, pivot_id, axis)
    }

    pub fn distribute(&self, nodes: &[Node], axis: Axis) -> Vec<Node> {
        distribute(nodes, axis, &self.config.distribute)
    }

    pub fn delete_node(&self, nodes: &[Node], edges: &[Edge], node_id: &str) -> (Vec<Node>, Vec<Edge>) {
        delete_node(nodes, edges, node_id)
    }

    pub fn connect(&self, edges: &[Edge], source_id: &str, target_id: &str) -> Vec<Edge> {
        connect(edges, source_id, target_id)
    }
}
