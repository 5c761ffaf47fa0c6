use crate::config::LayoutConfig;
use crate::ir::{Node, Point, Size};

use super::geometry::{ObstacleGrid, Rect, boxes_overlap, node_rect, rect_at};

/// Picks a landing spot for a new node of the configured default size.
///
/// The preferred point wins when its box is free. Otherwise grid cells are
/// scanned row-major from the origin and the first free cell is returned.
/// When every cell is taken the node goes one pitch to the right of the last
/// node in `nodes`, overlap or not.
pub fn find_free_position(
    preferred: Option<Point>,
    nodes: &[Node],
    config: &LayoutConfig,
) -> Point {
    find_free_position_sized(preferred, config.node_size(), nodes, config)
}

/// Same search as [`find_free_position`], testing cells with `size` instead
/// of the configured default. The grid pitch is unchanged.
pub fn find_free_position_sized(
    preferred: Option<Point>,
    size: Size,
    nodes: &[Node],
    config: &LayoutConfig,
) -> Point {
    let rects: Vec<Rect> = nodes.iter().map(node_rect).collect();
    let grid = ObstacleGrid::new(config.pitch_x().max(config.pitch_y()), &rects);
    let is_free = |point: Point| {
        let candidate = rect_at(point, size);
        grid.query(&candidate)
            .into_iter()
            .all(|idx| !boxes_overlap(&candidate, &rects[idx]))
    };

    if let Some(point) = preferred {
        if is_free(point) {
            tracing::debug!(x = point.x, y = point.y, "preferred position is free");
            return point;
        }
    }

    let Some(last) = nodes.last() else {
        return config.origin;
    };

    let pitch_x = config.pitch_x();
    let pitch_y = config.pitch_y();
    for row in 0..config.grid_rows {
        for col in 0..config.grid_cols {
            let point = Point::new(
                config.origin.x + col as f32 * pitch_x,
                config.origin.y + row as f32 * pitch_y,
            );
            if is_free(point) {
                tracing::debug!(row, col, x = point.x, y = point.y, "placed on grid");
                return point;
            }
        }
    }

    let fallback = Point::new(last.position.x + pitch_x, last.position.y);
    tracing::warn!(
        nodes = nodes.len(),
        last = %last.id,
        "placement grid exhausted; placing beside last node"
    );
    fallback
}
