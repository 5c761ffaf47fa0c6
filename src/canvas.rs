//! Single owner of an editing session's graph.

use std::collections::HashSet;

use crate::config::{Config, PaletteConfig};
use crate::ir::{Axis, Graph, Node, NodeKind, Point};
use crate::layout::GraphLayoutEngine;
use crate::parser::id_prefix;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    graph: Graph,
    engine: GraphLayoutEngine,
    palette: PaletteConfig,
    version: u64,
}

impl Canvas {
    pub fn new(config: Config) -> Self {
        Self::with_graph(Graph::new(), config)
    }

    pub fn with_graph(graph: Graph, config: Config) -> Self {
        Self {
            graph,
            engine: GraphLayoutEngine::new(config.layout),
            palette: config.palette,
            version: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Bumped once per mutation that changed the graph.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn commit(&mut self, graph: Graph) -> bool {
        if graph == self.graph {
            return false;
        }
        self.graph = graph;
        self.version += 1;
        true
    }

    /// Instantiates a palette node and returns its id.
    ///
    /// The free-cell test uses the palette size of `kind`, so a node larger
    /// than the layout default still lands clear of its neighbours.
    pub fn add_node(&mut self, kind: NodeKind, preferred: Option<Point>) -> String {
        let size = self.palette.size_for(&kind);
        let position = self
            .engine
            .find_free_position_sized(preferred, size, &self.graph.nodes);
        let id = format!("{}-{}", id_prefix(kind.as_str()), uuid::Uuid::new_v4());
        tracing::debug!(id = %id, x = position.x, y = position.y, "adding node");
        self.graph
            .nodes
            .push(Node::new(id.clone(), kind, position).with_size(size));
        self.version += 1;
        id
    }

    /// Drag semantics: lands exactly where asked, overlap allowed.
    pub fn move_node(&mut self, id: &str, to: Point) -> bool {
        let Some(node) = self.graph.node_mut(id) else {
            return false;
        };
        if node.position == to {
            return false;
        }
        node.position = to;
        self.version += 1;
        true
    }

    pub fn delete_node(&mut self, id: &str) -> bool {
        let (nodes, edges) = self
            .engine
            .delete_node(&self.graph.nodes, &self.graph.edges, id);
        self.commit(Graph { nodes, edges })
    }

    /// Returns the new edge id, or `None` for a self-loop or an endpoint
    /// that is not on the canvas.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Option<String> {
        self.connect_ports(source_id, target_id, None, None)
    }

    pub fn connect_ports(
        &mut self,
        source_id: &str,
        target_id: &str,
        source_handle: Option<&str>,
        target_handle: Option<&str>,
    ) -> Option<String> {
        if !self.graph.contains_node(source_id) || !self.graph.contains_node(target_id) {
            tracing::debug!(
                source = source_id,
                target = target_id,
                "ignoring connect to missing node"
            );
            return None;
        }
        let edges = crate::layout::connect_ports(
            &self.graph.edges,
            source_id,
            target_id,
            source_handle,
            target_handle,
        );
        if edges.len() == self.graph.edges.len() {
            return None;
        }
        let id = edges.last().map(|edge| edge.id.clone());
        self.graph.edges = edges;
        self.version += 1;
        id
    }

    pub fn auto_arrange(&mut self) -> bool {
        let nodes = self.engine.auto_arrange(&self.graph.nodes);
        self.replace_nodes(nodes)
    }

    pub fn align_all(&mut self, pivot_id: &str, axis: Axis) -> bool {
        let nodes = self.engine.align_axis(&self.graph.nodes, pivot_id, axis);
        self.replace_nodes(nodes)
    }

    pub fn distribute_all(&mut self, axis: Axis) -> bool {
        let nodes = self.engine.distribute(&self.graph.nodes, axis);
        self.replace_nodes(nodes)
    }

    /// Aligns the selected nodes to the pivot; the pivot need not be selected.
    pub fn align_selection(&mut self, ids: &[String], pivot_id: &str, axis: Axis) -> bool {
        let mut selected: Vec<String> = ids.to_vec();
        if !selected.iter().any(|id| id == pivot_id) {
            selected.push(pivot_id.to_string());
        }
        self.apply_to_selection(&selected, |engine, nodes| {
            engine.align_axis(nodes, pivot_id, axis)
        })
    }

    pub fn distribute_selection(&mut self, ids: &[String], axis: Axis) -> bool {
        self.apply_to_selection(ids, |engine, nodes| engine.distribute(nodes, axis))
    }

    fn apply_to_selection<F>(&mut self, ids: &[String], op: F) -> bool
    where
        F: FnOnce(&GraphLayoutEngine, &[Node]) -> Vec<Node>,
    {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let picked: Vec<usize> = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| wanted.contains(node.id.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        if picked.is_empty() {
            return false;
        }
        let subset: Vec<Node> = picked.iter().map(|&idx| self.graph.nodes[idx].clone()).collect();
        let updated = op(&self.engine, &subset);

        let mut nodes = self.graph.nodes.clone();
        for (idx, node) in picked.into_iter().zip(updated) {
            nodes[idx] = node;
        }
        self.replace_nodes(nodes)
    }

    fn replace_nodes(&mut self, nodes: Vec<Node>) -> bool {
        let graph = Graph {
            nodes,
            edges: self.graph.edges.clone(),
        };
        self.commit(graph)
    }
}
