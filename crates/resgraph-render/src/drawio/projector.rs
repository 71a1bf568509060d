use super::id::{BASE_ID_LENGTH, OsRandom, RandomSource, generate_base_id};
use super::model::{Geometry, LAYER_CELL_ID, MxCell, MxFile};
use crate::dot::GraphKind;
use crate::layout::{LayoutEngine, LayoutExtractor, decode_label};
use crate::{Error, Result};
use indexmap::IndexMap;
use resgraph_core::{Resource, ResourceCollection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Width and height of every projected vertex.
pub const NODE_SIZE: f64 = 40.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawioConfig {
    /// Resource type to drawio style string. Unknown types get an empty style.
    pub node_styles: IndexMap<String, String>,
    /// Graph kind used for the layout pass.
    pub graph_kind: GraphKind,
}

/// Projects a resource collection onto positioned drawio cells.
///
/// Every call draws one base ID from the random source; cell IDs are `<base>-<resource id>` for
/// vertices and `<base>-<n>` for edges, `n` counting up from `resources.len() + 1`.
pub struct Projector {
    config: DrawioConfig,
    engine: Arc<dyn LayoutEngine>,
    random: Arc<dyn RandomSource>,
}

impl Projector {
    pub fn new(config: DrawioConfig, engine: Arc<dyn LayoutEngine>) -> Self {
        Self {
            config,
            engine,
            random: Arc::new(OsRandom),
        }
    }

    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn config(&self) -> &DrawioConfig {
        &self.config
    }

    pub fn project(&self, rc: &ResourceCollection) -> Result<MxFile> {
        let layout = LayoutExtractor::new(self.engine.as_ref())
            .with_graph_kind(self.config.graph_kind)
            .extract(rc)?;

        let base = generate_base_id(self.random.as_ref(), BASE_ID_LENGTH);
        let cell_id = |id: &str| format!("{base}-{id}");

        let mut cells = vec![MxCell::root(), MxCell::layer()];

        for node in &layout.graph.nodes {
            if node.text.content.is_empty() {
                continue;
            }
            let Some((id, value, resource_type)) = decode_label(&node.text.content) else {
                tracing::warn!(label = %node.text.content, "layout node is not a resource label");
                continue;
            };
            cells.push(MxCell {
                id: cell_id(id),
                value: value.to_string(),
                style: self
                    .config
                    .node_styles
                    .get(resource_type)
                    .cloned()
                    .unwrap_or_default(),
                vertex: "1".to_string(),
                parent: LAYER_CELL_ID.to_string(),
                geometry: Some(Geometry::new(
                    node.text.x.as_str(),
                    node.text.y.as_str(),
                    NODE_SIZE,
                    NODE_SIZE,
                )),
                ..Default::default()
            });
        }
        let vertices = cells.len() - 2;

        for (index, rel) in rc.relationships.iter().enumerate() {
            let Some((source, target)) = rel.endpoints() else {
                return Err(Error::MissingEndpoint {
                    index,
                    endpoint: if rel.source.is_none() { "source" } else { "target" },
                });
            };
            cells.push(MxCell {
                id: cell_id(&(rc.resources.len() + 1 + index).to_string()),
                edge: "1".to_string(),
                parent: LAYER_CELL_ID.to_string(),
                source: cell_id(source.id()),
                target: cell_id(target.id()),
                geometry: Some(Geometry::edge()),
                ..Default::default()
            });
        }

        tracing::debug!(
            base = %base,
            vertices,
            edges = rc.relationships.len(),
            "projected drawio cells"
        );
        Ok(MxFile::from_cells(cells))
    }
}
