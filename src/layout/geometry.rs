use std::collections::{HashMap, HashSet};

use crate::ir::{Graph, Node, Point, Size};

/// Axis-aligned box as `(x, y, width, height)`.
pub type Rect = (f32, f32, f32, f32);

pub fn rect_at(position: Point, size: Size) -> Rect {
    (position.x, position.y, size.width, size.height)
}

pub fn node_rect(node: &Node) -> Rect {
    rect_at(node.position, node.size)
}

/// Boxes that merely touch along an edge do not overlap.
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    let disjoint = a.0 >= b.0 + b.2 || a.0 + a.2 <= b.0 || a.1 >= b.1 + b.3 || a.1 + a.3 <= b.1;
    !disjoint
}

pub fn overlap_area(a: &Rect, b: &Rect) -> f32 {
    let x0 = a.0.max(b.0);
    let y0 = a.1.max(b.1);
    let x1 = (a.0 + a.2).min(b.0 + b.2);
    let y1 = (a.1 + a.3).min(b.1 + b.3);
    let w = (x1 - x0).max(0.0);
    let h = (y1 - y0).max(0.0);
    w * h
}

pub fn union_rect(a: &Rect, b: &Rect) -> Rect {
    let x0 = a.0.min(b.0);
    let y0 = a.1.min(b.1);
    let x1 = (a.0 + a.2).max(b.0 + b.2);
    let y1 = (a.1 + a.3).max(b.1 + b.3);
    (x0, y0, x1 - x0, y1 - y0)
}

impl Graph {
    /// Bounding box of every node, or `None` for an empty graph.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.nodes.iter().map(node_rect);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, rect| union_rect(&acc, &rect)))
    }

    /// Id pairs of nodes whose boxes overlap, in collection order.
    pub fn overlapping_pairs(&self) -> Vec<(String, String)> {
        let rects: Vec<Rect> = self.nodes.iter().map(node_rect).collect();
        let grid = ObstacleGrid::new(256.0, &rects);
        let mut pairs = Vec::new();
        for (i, rect) in rects.iter().enumerate() {
            let hits = grid
                .query(rect)
                .into_iter()
                .filter(|&j| j > i && boxes_overlap(rect, &rects[j]));
            for j in hits {
                pairs.push((self.nodes[i].id.clone(), self.nodes[j].id.clone()));
            }
        }
        pairs
    }
}

/// Cells a box may span on either axis before it is kept out of the grid.
const MAX_SPAN_CELLS: f32 = 64.0;

/// Spatial index for overlap queries against node boxes.
///
/// Boxes that are non-finite, inverted or wider than `MAX_SPAN_CELLS` are
/// held in `wide` and returned by every query.
pub(crate) struct ObstacleGrid {
    cell: f32,
    /// Maps grid cell (ix, iy) to indices into the obstacle list.
    cells: HashMap<(i32, i32), Vec<usize>>,
    wide: Vec<usize>,
    len: usize,
}

impl ObstacleGrid {
    pub(crate) fn new(cell: f32, rects: &[Rect]) -> Self {
        let mut grid = Self {
            cell: cell.max(16.0),
            cells: HashMap::new(),
            wide: Vec::new(),
            len: 0,
        };
        for (i, rect) in rects.iter().enumerate() {
            grid.insert(i, rect);
        }
        grid
    }

    fn cell_span(&self, rect: &Rect) -> Option<(i32, i32, i32, i32)> {
        let x0 = (rect.0 / self.cell).floor();
        let y0 = (rect.1 / self.cell).floor();
        let x1 = ((rect.0 + rect.2) / self.cell).floor();
        let y1 = ((rect.1 + rect.3) / self.cell).floor();
        let bounded = |lo: f32, hi: f32| {
            lo.is_finite()
                && hi.is_finite()
                && hi >= lo
                && hi - lo <= MAX_SPAN_CELLS
                && lo.abs() < i32::MAX as f32 / 2.0
                && hi.abs() < i32::MAX as f32 / 2.0
        };
        if !bounded(x0, x1) || !bounded(y0, y1) {
            return None;
        }
        Some((x0 as i32, y0 as i32, x1 as i32, y1 as i32))
    }

    pub(crate) fn insert(&mut self, idx: usize, rect: &Rect) {
        self.len = self.len.max(idx + 1);
        let Some((x0, y0, x1, y1)) = self.cell_span(rect) else {
            self.wide.push(idx);
            return;
        };
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    /// Return indices of obstacles that could overlap with `rect`, ascending.
    pub(crate) fn query(&self, rect: &Rect) -> Vec<usize> {
        let Some((x0, y0, x1, y1)) = self.cell_span(rect) else {
            return (0..self.len).collect();
        };
        let mut seen: HashSet<usize> = self.wide.iter().copied().collect();
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                if let Some(hits) = self.cells.get(&(ix, iy)) {
                    seen.extend(hits.iter().copied());
                }
            }
        }
        let mut out: Vec<usize> = seen.into_iter().collect();
        out.sort_unstable();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeKind;

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = (0.0, 0.0, 300.0, 150.0);
        assert!(!boxes_overlap(&a, &(300.0, 0.0, 300.0, 150.0)));
        assert!(!boxes_overlap(&a, &(0.0, 150.0, 300.0, 150.0)));
        assert!(boxes_overlap(&a, &(299.0, 149.0, 10.0, 10.0)));
    }

    #[test]
    fn contained_box_overlaps() {
        let outer = (0.0, 0.0, 100.0, 100.0);
        let inner = (10.0, 10.0, 5.0, 5.0);
        assert!(boxes_overlap(&outer, &inner));
        assert!(boxes_overlap(&inner, &outer));
        assert_eq!(overlap_area(&outer, &inner), 25.0);
    }

    #[test]
    fn bounds_cover_all_nodes() {
        let mut graph = Graph::new();
        assert!(graph.bounds().is_none());
        graph
            .nodes
            .push(Node::new("a", NodeKind::Tool, Point::new(-10.0, 20.0)));
        graph
            .nodes
            .push(Node::new("b", NodeKind::Tool, Point::new(400.0, 300.0)));
        assert_eq!(graph.bounds(), Some((-10.0, 20.0, 710.0, 430.0)));
    }

    #[test]
    fn reports_overlapping_pairs_once() {
        let mut graph = Graph::new();
        graph
            .nodes
            .push(Node::new("a", NodeKind::Tool, Point::new(50.0, 50.0)));
        graph
            .nodes
            .push(Node::new("b", NodeKind::Tool, Point::new(60.0, 60.0)));
        graph
            .nodes
            .push(Node::new("c", NodeKind::Tool, Point::new(1000.0, 50.0)));
        assert_eq!(
            graph.overlapping_pairs(),
            vec![("a".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn grid_query_finds_straddling_obstacle() {
        let rects = vec![(90.0, 90.0, 40.0, 40.0)];
        let grid = ObstacleGrid::new(100.0, &rects);
        assert_eq!(grid.query(&(120.0, 120.0, 5.0, 5.0)), vec![0]);
    }

    #[test]
    fn oversized_and_non_finite_boxes_stay_queryable() {
        let rects = vec![
            (0.0, 0.0, 1.0e7, 1.0e7),
            (f32::INFINITY, 0.0, 300.0, 150.0),
            (5000.0, 5000.0, 10.0, 10.0),
        ];
        let grid = ObstacleGrid::new(100.0, &rects);
        assert!(grid.cells.len() <= 4);
        assert_eq!(grid.query(&(40.0, 40.0, 5.0, 5.0)), vec![0, 1]);
        assert_eq!(grid.query(&(0.0, 0.0, f32::INFINITY, 1.0)), vec![0, 1, 2]);
    }

    #[test]
    fn huge_node_pairs_with_everything_it_covers() {
        let mut graph = Graph::new();
        graph.nodes.push(
            Node::new("big", NodeKind::Knowledge, Point::new(0.0, 0.0))
                .with_size(Size::new(1.0e7, 1.0e7)),
        );
        graph
            .nodes
            .push(Node::new("small", NodeKind::Tool, Point::new(900.0, 900.0)));
        assert_eq!(
            graph.overlapping_pairs(),
            vec![("big".to_string(), "small".to_string())]
        );
    }
}
