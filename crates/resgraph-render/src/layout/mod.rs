//! Node positions from an external Graphviz-compatible layout engine.

mod engine;
mod extract;
pub mod svg;

pub use engine::{GraphvizCli, LayoutEngine};
pub use extract::{
    LayoutExtractor, RESOURCE_INFO_SEPARATOR, decode_label, encode_label, extract_layout,
};
pub use svg::{SvgDocument, SvgGraph, SvgNode, SvgText, parse_svg};
