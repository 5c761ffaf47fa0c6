use crate::canvas::Canvas;
use crate::config::load_config;
use crate::ir::{Axis, Graph, NodeKind, Point};
use crate::layout_dump::write_layout_dump;
use crate::parser::{graph_to_json, parse_graph};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "acanvas", version, about = "Place and arrange agent-workflow canvas nodes")]
pub struct Args {
    /// Graph document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output", global = true)]
    pub output: Option<PathBuf>,

    /// Layout config file (JSON5)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a node at a free position
    Place {
        #[arg(long, default_value = "tool")]
        kind: String,
        #[arg(long, requires = "y")]
        x: Option<f32>,
        #[arg(long, requires = "x")]
        y: Option<f32>,
    },
    /// Arrange all nodes into rows by kind
    Arrange,
    /// Align nodes to a pivot node on one axis
    Align {
        #[arg(long)]
        pivot: String,
        #[arg(long, value_enum)]
        axis: AxisArg,
        /// Restrict to these node ids
        #[arg(long, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Space nodes evenly along one axis
    Distribute {
        #[arg(long, value_enum)]
        axis: AxisArg,
        /// Restrict to these node ids
        #[arg(long, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Delete a node and its edges
    Delete { id: String },
    /// Connect two nodes
    Connect {
        source: String,
        target: String,
        #[arg(long)]
        source_handle: Option<String>,
        #[arg(long)]
        target_handle: Option<String>,
    },
    /// Report overlapping nodes; fails if any
    Check,
    /// Write a layout summary with bounds and overlaps
    Dump,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum AxisArg {
    X,
    Y,
}

impl From<AxisArg> for Axis {
    fn from(value: AxisArg) -> Self {
        match value {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let graph = if input.trim().is_empty() {
        Graph::new()
    } else {
        parse_graph(&input)?
    };
    tracing::info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "loaded graph"
    );

    let mut canvas = Canvas::with_graph(graph, config);
    match args.command {
        Command::Place { kind, x, y } => {
            let preferred = x.zip(y).map(|(x, y)| Point::new(x, y));
            let id = canvas.add_node(NodeKind::from_token(&kind), preferred);
            tracing::info!(id = %id, "placed node");
        }
        Command::Arrange => {
            canvas.auto_arrange();
        }
        Command::Align { pivot, axis, ids } => {
            if ids.is_empty() {
                canvas.align_all(&pivot, axis.into());
            } else {
                canvas.align_selection(&ids, &pivot, axis.into());
            }
        }
        Command::Distribute { axis, ids } => {
            if ids.is_empty() {
                canvas.distribute_all(axis.into());
            } else {
                canvas.distribute_selection(&ids, axis.into());
            }
        }
        Command::Delete { id } => {
            canvas.delete_node(&id);
        }
        Command::Connect {
            source,
            target,
            source_handle,
            target_handle,
        } => {
            canvas.connect_ports(
                &source,
                &target,
                source_handle.as_deref(),
                target_handle.as_deref(),
            );
        }
        Command::Check => {
            let pairs = canvas.graph().overlapping_pairs();
            for (a, b) in &pairs {
                println!("{a} overlaps {b}");
            }
            if !pairs.is_empty() {
                return Err(anyhow::anyhow!("{} overlapping node pair(s)", pairs.len()));
            }
            return Ok(());
        }
        Command::Dump => {
            return write_layout_dump(args.output.as_deref(), canvas.graph());
        }
    }

    tracing::debug!(version = canvas.version(), "graph updated");
    write_output(&graph_to_json(canvas.graph())?, args.output.as_deref())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(json: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
