//! Node and edge colour styling.
//!
//! Node colours are keyed by resource identity. Edge colours are keyed by display values, since
//! they are authored by hand against readable names: two resources sharing a display value share
//! their edge styling.

use crate::Result;
use crate::resource::{GenericResource, Resource, ResourceCollection, ResourceRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Source display value to an ordered list of `{target display value: colour}` entries.
///
/// A list of single-entry maps (instead of one map) lets authors repeat a target and keeps their
/// precedence order: the first entry naming the target wins.
pub type ArrowColors = IndexMap<String, Vec<IndexMap<String, String>>>;

/// The key a resource is rendered under.
///
/// Nodes, edge dedup keys and arrow styles all go through this function. It is the display
/// value, not the ID, so resources sharing a value collapse into a single rendered node.
pub fn render_key(resource: &dyn Resource) -> &str {
    resource.value()
}

#[derive(Debug, Clone, Default)]
pub struct NodeColors {
    entries: IndexMap<String, (ResourceRef, String)>,
}

impl NodeColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font colour of `resource`, replacing (and returning) a previous colour for the
    /// same resource ID.
    pub fn insert(&mut self, resource: ResourceRef, color: impl Into<String>) -> Option<String> {
        let id = resource.id().to_string();
        self.entries
            .insert(id, (resource, color.into()))
            .map(|(_, previous)| previous)
    }

    pub fn get(&self, resource: &dyn Resource) -> Option<&str> {
        self.entries
            .get(resource.id())
            .map(|(_, color)| color.as_str())
    }

    /// Styled resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceRef, &str)> {
        self.entries
            .values()
            .map(|(resource, color)| (resource, color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(ResourceRef, S)> for NodeColors {
    fn from_iter<I: IntoIterator<Item = (ResourceRef, S)>>(iter: I) -> Self {
        let mut colors = Self::new();
        for (resource, color) in iter {
            colors.insert(resource, color);
        }
        colors
    }
}

#[derive(Debug, Clone, Default)]
pub struct Style {
    pub nodes: NodeColors,
    pub arrows: ArrowColors,
}

pub fn resolve_node_color<'a>(style: &'a Style, resource: &dyn Resource) -> Option<&'a str> {
    style.nodes.get(resource)
}

pub fn resolve_edge_color<'a>(
    style: &'a Style,
    source_value: &str,
    target_value: &str,
) -> Option<&'a str> {
    style
        .arrows
        .get(source_value)?
        .iter()
        .find_map(|entry| entry.get(target_value))
        .map(String::as_str)
}

/// Hand-authored style, keyed by display values on both sides.
///
/// ```yaml
/// nodes:
///   MyLambda: green
/// arrows:
///   MyLambda:
///     - my-queue: red
///     - MyStream: green
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub nodes: IndexMap<String, String>,
    pub arrows: ArrowColors,
}

impl StyleSheet {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Binds the node colours to the resources of `rc`.
    ///
    /// A value matching several resources colours all of them. A value matching none still yields
    /// a styled node: a type-less resource whose ID is the value.
    pub fn resolve(&self, rc: &ResourceCollection) -> Style {
        let mut nodes = NodeColors::new();
        for (value, color) in &self.nodes {
            let mut matched = false;
            for resource in rc.resources.iter().filter(|r| render_key(r.as_ref()) == value) {
                nodes.insert(resource.clone(), color.clone());
                matched = true;
            }
            if !matched {
                tracing::debug!(value = %value, "styled node has no matching resource");
                nodes.insert(GenericResource::shared(value.clone(), value.clone(), ""), color.clone());
            }
        }
        Style {
            nodes,
            arrows: self.arrows.clone(),
        }
    }
}
