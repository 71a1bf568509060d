use super::config::DotConfig;
use super::graph::{DotGraph, GraphOptions};
use resgraph_core::{
    Resource, ResourceCollection, Style, render_key, resolve_edge_color, resolve_node_color,
};
use rustc_hash::FxHashSet;

const EDGE_KEY_SEPARATOR: &str = "###";

fn edge_key(source: &str, target: &str) -> String {
    format!("{source}{EDGE_KEY_SEPARATOR}{target}")
}

/// Builds Graphviz DOT text for a resource collection.
///
/// Nodes are keyed by [`render_key`], so resources sharing a display value render as one node.
/// Edges are deduplicated on `(source key, target key)`; the first relationship wins.
#[derive(Debug, Clone, Default)]
pub struct DotDiagram {
    config: DotConfig,
}

impl DotDiagram {
    pub fn new(config: DotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DotConfig {
        &self.config
    }

    pub fn build(&self, rc: &ResourceCollection) -> String {
        let mut g = DotGraph::new(GraphOptions::default());

        self.apply_graph_attrs(&mut g);
        self.apply_initializers(&mut g);

        let no_style = Style::default();
        let style = self.config.style.as_ref().unwrap_or(&no_style);

        self.apply_node_styles(rc, style, &mut g);

        let mut edges: FxHashSet<String> = FxHashSet::default();
        let skipped = apply_relationships(rc, style, &mut g, &mut edges);
        apply_custom_arrows(style, &mut g, &mut edges);

        tracing::debug!(
            nodes = g.node_count(),
            edges = g.edge_count(),
            skipped_relationships = skipped,
            "built DOT diagram"
        );

        g.to_string()
    }

    fn apply_graph_attrs(&self, g: &mut DotGraph) {
        if let Some(direction) = self.config.direction {
            g.set_attr("rankdir", direction.as_str());
        }
        if let Some(splines) = self.config.splines.as_attr() {
            g.set_attr("splines", splines);
        }
    }

    fn apply_initializers(&self, g: &mut DotGraph) {
        let node_attrs = self.config.effective_node_attrs();
        g.set_node_initializer(move |n| {
            for (name, value) in &node_attrs {
                n.attr(name.clone(), value.clone());
            }
        });

        let edge_attrs = self.config.effective_edge_attrs();
        g.set_edge_initializer(move |e| {
            for (name, value) in &edge_attrs {
                e.attr(name.clone(), value.clone());
            }
        });
    }

    fn apply_node_styles(&self, rc: &ResourceCollection, style: &Style, g: &mut DotGraph) {
        let images = &self.config.resource_images;

        for res in &rc.resources {
            let node = g.node(render_key(res.as_ref()));
            if let Some(image) = images.get(res.resource_type()) {
                node.attr("image", image);
            }
            if let Some(color) = resolve_node_color(style, res.as_ref()) {
                node.attr("fontcolor", color);
            }
        }

        // Styled resources need not be part of the collection.
        for (res, color) in style.nodes.iter() {
            let node = g.node(render_key(res.as_ref()));
            node.attr("fontcolor", color);
            if let Some(image) = images.get(res.resource_type()) {
                node.attr("image", image);
            }
        }
    }
}

fn apply_relationships(
    rc: &ResourceCollection,
    style: &Style,
    g: &mut DotGraph,
    edges: &mut FxHashSet<String>,
) -> usize {
    let mut skipped = 0usize;
    for rel in &rc.relationships {
        let Some((source, target)) = rel.endpoints() else {
            skipped += 1;
            continue;
        };
        let source = render_key(source.as_ref());
        let target = render_key(target.as_ref());

        if !edges.insert(edge_key(source, target)) {
            continue;
        }

        let edge = g.edge(source, target);
        if let Some(color) = resolve_edge_color(style, source, target) {
            edge.attr("color", color);
        }
    }
    skipped
}

/// Arrows declared only in the style still get drawn, unless a relationship already produced
/// the same edge.
fn apply_custom_arrows(style: &Style, g: &mut DotGraph, edges: &mut FxHashSet<String>) {
    for (source, targets) in &style.arrows {
        for entry in targets {
            for (target, color) in entry {
                if edges.insert(edge_key(source, target)) {
                    g.edge(source, target).attr("color", color);
                }
            }
        }
    }
}

/// Shorthand for `DotDiagram::new(config.clone()).build(rc)`.
pub fn build_dot(rc: &ResourceCollection, config: &DotConfig) -> String {
    DotDiagram::new(config.clone()).build(rc)
}
