pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

pub use canvas::Canvas;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::CanvasError;
pub use ir::{Axis, Edge, Graph, Node, NodeKind, Point, Size};
pub use layout::GraphLayoutEngine;
pub use parser::parse_graph;
