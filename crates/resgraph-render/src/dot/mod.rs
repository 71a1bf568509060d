//! Graphviz DOT output.

mod builder;
pub mod config;
pub mod graph;

pub use builder::{DotDiagram, build_dot};
pub use config::{DotConfig, Direction, Spline, default_edge_attrs, default_node_attrs};
pub use graph::{AttrValue, Attributes, DotGraph, GraphKind, GraphOptions, NodeNaming};
