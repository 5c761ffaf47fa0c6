use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_NODE_WIDTH: f32 = 300.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            _ => None,
        }
    }
}

/// Category of a workflow node.
///
/// The listed variants form the fixed vocabulary, in auto-arrange priority
/// order. Anything else round-trips through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Identity,
    Trigger,
    Condition,
    Knowledge,
    Memory,
    Prompt,
    Tool,
    Response,
    Custom(String),
}

impl NodeKind {
    pub const BUILTIN: [NodeKind; 8] = [
        NodeKind::Identity,
        NodeKind::Trigger,
        NodeKind::Condition,
        NodeKind::Knowledge,
        NodeKind::Memory,
        NodeKind::Prompt,
        NodeKind::Tool,
        NodeKind::Response,
    ];

    pub fn from_token(token: &str) -> Self {
        match token {
            "identity" => Self::Identity,
            "trigger" => Self::Trigger,
            "condition" => Self::Condition,
            "knowledge" => Self::Knowledge,
            "memory" => Self::Memory,
            "prompt" => Self::Prompt,
            "tool" => Self::Tool,
            "response" => Self::Response,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Identity => "identity",
            Self::Trigger => "trigger",
            Self::Condition => "condition",
            Self::Knowledge => "knowledge",
            Self::Memory => "memory",
            Self::Prompt => "prompt",
            Self::Tool => "tool",
            Self::Response => "response",
            Self::Custom(name) => name,
        }
    }

    /// Row index used by auto-arrange; `None` for custom kinds.
    pub fn arrange_rank(&self) -> Option<usize> {
        match self {
            Self::Identity => Some(0),
            Self::Trigger => Some(1),
            Self::Condition => Some(2),
            Self::Knowledge => Some(3),
            Self::Memory => Some(4),
            Self::Prompt => Some(5),
            Self::Tool => Some(6),
            Self::Response => Some(7),
            Self::Custom(_) => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_token(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Point,
    #[serde(default)]
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            size: Size::default(),
            label: None,
            data: serde_json::Value::Null,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_round_trips_as_custom() {
        let kind: NodeKind = serde_json::from_str("\"webhook\"").unwrap();
        assert_eq!(kind, NodeKind::Custom("webhook".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"webhook\"");
        assert_eq!(kind.arrange_rank(), None);
    }

    #[test]
    fn builtin_ranks_follow_vocabulary_order() {
        for (idx, kind) in NodeKind::BUILTIN.iter().enumerate() {
            assert_eq!(kind.arrange_rank(), Some(idx));
            assert_eq!(&NodeKind::from_token(kind.as_str()), kind);
        }
    }

    #[test]
    fn node_size_defaults_when_missing() {
        let node: Node = serde_json::from_str(
            r#"{"id":"a","kind":"tool","position":{"x":1,"y":2}}"#,
        )
        .unwrap();
        assert_eq!(node.size, Size::new(300.0, 150.0));
        assert_eq!(node.position, Point::new(1.0, 2.0));
    }

    #[test]
    fn edge_uses_camel_case_fields() {
        let edge: Edge = serde_json::from_str(
            r#"{"id":"e","sourceId":"a","targetId":"b","sourceHandle":"true"}"#,
        )
        .unwrap();
        assert_eq!(edge.source_handle.as_deref(), Some("true"));
        assert!(edge.touches("b"));
        assert!(!edge.touches("c"));
    }
}
