#![forbid(unsafe_code)]

//! Renders resource graphs to Graphviz DOT and drawio documents, and imports drawio documents
//! back into resource graphs.
//!
//! Layout is never computed here: [`layout::LayoutEngine`] is the seam to an external Graphviz
//! compatible renderer whose SVG output provides node coordinates.

pub mod config;
pub mod dot;
pub mod drawio;
pub mod layout;

pub use config::RenderConfig;
pub use dot::{DotConfig, DotDiagram, build_dot};
pub use drawio::{DrawioConfig, Importer, MxFile, Projector};
pub use layout::{GraphvizCli, LayoutEngine, LayoutExtractor, extract_layout};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid drawio document: {message}")]
    InvalidDocument { message: String },
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("invalid layout SVG: {message}")]
    Svg { message: String },
    #[error("layout engine `{program}` failed: {message}")]
    LayoutEngine { program: String, message: String },
    #[error("layout engine I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("relationship #{index} has no {endpoint}")]
    MissingEndpoint {
        index: usize,
        endpoint: &'static str,
    },
    #[error("invalid render config YAML: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
    #[error("invalid render config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
