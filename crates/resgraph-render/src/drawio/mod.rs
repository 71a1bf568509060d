//! drawio documents: projection from a laid-out resource graph, XML codec, and import.

pub mod id;
mod import;
pub mod model;
mod projector;
mod xml;

pub use id::{OsRandom, RandomError, RandomSource, generate_base_id};
pub use import::Importer;
pub use model::{Diagram, Geometry, MxCell, MxFile, MxGraphModel, Root};
pub use projector::{DrawioConfig, NODE_SIZE, Projector};
