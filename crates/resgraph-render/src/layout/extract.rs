use super::engine::LayoutEngine;
use super::svg::{SvgDocument, parse_svg};
use crate::dot::{DotGraph, GraphKind, GraphOptions, NodeNaming};
use crate::{Error, Result};
use resgraph_core::{Resource, ResourceCollection};
use rustc_hash::FxHashMap;

/// Joins `id`, `value` and type into the opaque node label handed to the layout engine.
pub const RESOURCE_INFO_SEPARATOR: &str = "$$";

pub fn encode_label(resource: &dyn Resource) -> String {
    format!(
        "{}{RESOURCE_INFO_SEPARATOR}{}{RESOURCE_INFO_SEPARATOR}{}",
        resource.id(),
        resource.value(),
        resource.resource_type()
    )
}

/// Splits an encoded label back into `(id, value, type)`.
///
/// The ID is everything before the first separator and the type everything after the last one,
/// so values may themselves contain the separator.
pub fn decode_label(label: &str) -> Option<(&str, &str, &str)> {
    let (id, rest) = label.split_once(RESOURCE_INFO_SEPARATOR)?;
    let (value, resource_type) = rest.rsplit_once(RESOURCE_INFO_SEPARATOR)?;
    Some((id, value, resource_type))
}

/// Obtains node positions for a collection from a [`LayoutEngine`].
///
/// Relationship endpoints are not filtered here: callers pass collections whose relationships
/// all have both endpoints, and a missing one is reported as [`Error::MissingEndpoint`].
pub struct LayoutExtractor<'e> {
    engine: &'e dyn LayoutEngine,
    kind: GraphKind,
}

impl<'e> LayoutExtractor<'e> {
    pub fn new(engine: &'e dyn LayoutEngine) -> Self {
        Self {
            engine,
            kind: GraphKind::Directed,
        }
    }

    pub fn with_graph_kind(mut self, kind: GraphKind) -> Self {
        self.kind = kind;
        self
    }

    /// The graph handed to the engine: one node per resource, one edge per relationship.
    pub fn layout_graph(&self, rc: &ResourceCollection) -> Result<DotGraph> {
        let mut g = DotGraph::new(GraphOptions {
            kind: self.kind,
            naming: NodeNaming::Key,
        });

        let mut labels_by_id: FxHashMap<&str, String> = FxHashMap::default();
        for res in &rc.resources {
            let label = encode_label(res.as_ref());
            g.node(&label);
            labels_by_id.insert(res.id(), label);
        }

        for (index, rel) in rc.relationships.iter().enumerate() {
            let source = rel.source.as_ref().ok_or(Error::MissingEndpoint {
                index,
                endpoint: "source",
            })?;
            let target = rel.target.as_ref().ok_or(Error::MissingEndpoint {
                index,
                endpoint: "target",
            })?;

            match (labels_by_id.get(source.id()), labels_by_id.get(target.id())) {
                (Some(from), Some(to)) => {
                    g.edge(from, to);
                }
                _ => tracing::warn!(
                    index,
                    source = source.id(),
                    target = target.id(),
                    "relationship endpoint is not a resource of the collection; edge left out of layout"
                ),
            }
        }

        Ok(g)
    }

    pub fn extract(&self, rc: &ResourceCollection) -> Result<SvgDocument> {
        let graph = self.layout_graph(rc)?;
        let svg = self.engine.render_svg(&graph.to_string())?;
        let doc = parse_svg(&svg)?;
        tracing::debug!(
            resources = rc.resources.len(),
            svg_groups = doc.graph.nodes.len(),
            "extracted layout"
        );
        Ok(doc)
    }
}

/// Lays out `rc` as a directed graph with `engine`.
pub fn extract_layout(rc: &ResourceCollection, engine: &dyn LayoutEngine) -> Result<SvgDocument> {
    LayoutExtractor::new(engine).extract(rc)
}
