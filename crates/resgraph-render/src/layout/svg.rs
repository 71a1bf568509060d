//! The slice of Graphviz SVG output that carries node positions.
//!
//! Only the top-level `<g>` and its direct `<g>` children are read. Each child contributes its
//! `<title>` and first `<text>`; coordinates are kept as the strings Graphviz wrote so they can be
//! re-embedded without float round-tripping.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgDocument {
    pub graph: SvgGraph,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgGraph {
    pub id: String,
    pub class: String,
    pub nodes: Vec<SvgNode>,
}

/// A node, edge or decoration group. Edges and decorations have an empty `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgNode {
    pub title: String,
    pub text: SvgText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgText {
    pub content: String,
    pub x: String,
    pub y: String,
}

pub fn parse_svg(text: &str) -> Result<SvgDocument> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(Error::Svg {
            message: format!("expected <svg> root, found <{}>", root.tag_name().name()),
        });
    }

    let Some(g) = child_element(root, "g") else {
        return Ok(SvgDocument::default());
    };

    let nodes = g
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "g")
        .map(|n| SvgNode {
            title: child_element(n, "title")
                .map(collect_text)
                .unwrap_or_default(),
            text: child_element(n, "text")
                .map(|t| SvgText {
                    content: collect_text(t),
                    x: t.attribute("x").unwrap_or_default().to_string(),
                    y: t.attribute("y").unwrap_or_default().to_string(),
                })
                .unwrap_or_default(),
        })
        .collect();

    Ok(SvgDocument {
        graph: SvgGraph {
            id: g.attribute("id").unwrap_or_default().to_string(),
            class: g.attribute("class").unwrap_or_default().to_string(),
            nodes,
        },
    })
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn collect_text(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
