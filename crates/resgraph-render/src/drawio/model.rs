//! The drawio document tree: `mxfile > diagram > mxGraphModel > root > mxCell*`.
//!
//! Attribute values are kept as strings because drawio itself treats them that way; in
//! particular geometry `x`/`y` come verbatim from the layout SVG.

use serde::{Deserialize, Serialize};

pub const ROOT_CELL_ID: &str = "0";
pub const LAYER_CELL_ID: &str = "1";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxFile {
    pub diagram: Diagram,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub id: String,
    pub name: String,
    pub graph_model: MxGraphModel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxGraphModel {
    pub root: Root,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub cells: Vec<MxCell>,
}

/// One drawio cell. Empty strings stand for absent attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxCell {
    pub id: String,
    pub value: String,
    pub style: String,
    pub parent: String,
    pub vertex: String,
    pub edge: String,
    pub source: String,
    pub target: String,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: String,
    pub y: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    #[serde(rename = "as")]
    pub as_: String,
}

impl MxFile {
    pub fn from_cells(cells: Vec<MxCell>) -> Self {
        Self {
            diagram: Diagram {
                graph_model: MxGraphModel {
                    root: Root { cells },
                },
                ..Default::default()
            },
        }
    }

    pub fn cells(&self) -> &[MxCell] {
        &self.diagram.graph_model.root.cells
    }

    pub fn cell(&self, id: &str) -> Option<&MxCell> {
        self.cells().iter().find(|c| c.id == id)
    }
}

impl MxCell {
    /// The bootstrap root cell (`id="0"`).
    pub fn root() -> Self {
        Self {
            id: ROOT_CELL_ID.to_string(),
            ..Default::default()
        }
    }

    /// The default layer (`id="1"`), parented to the root cell.
    pub fn layer() -> Self {
        Self {
            id: LAYER_CELL_ID.to_string(),
            parent: ROOT_CELL_ID.to_string(),
            ..Default::default()
        }
    }

    pub fn is_vertex(&self) -> bool {
        self.vertex == "1"
    }

    pub fn is_edge(&self) -> bool {
        self.edge == "1"
    }
}

impl Geometry {
    pub fn new(x: impl Into<String>, y: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            width: Some(width),
            height: Some(height),
            as_: "geometry".to_string(),
        }
    }

    /// Edge geometry: only the `as` marker; drawio recomputes routing.
    pub fn edge() -> Self {
        Self {
            as_: "geometry".to_string(),
            ..Default::default()
        }
    }
}
