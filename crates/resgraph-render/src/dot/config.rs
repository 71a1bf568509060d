use super::graph::{AttrValue, Attributes};
use indexmap::IndexMap;
use resgraph_core::Style;
use serde::{Deserialize, Serialize};

/// Graph layout direction, see <https://graphviz.org/docs/attrs/rankdir>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

/// Edge routing, see <https://graphviz.org/docs/attrs/splines>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spline {
    Curved,
    Line,
    #[default]
    #[serde(alias = "")]
    None,
    Ortho,
    Polyline,
    Spline,
}

impl Spline {
    /// The `splines` attribute value; `None` when routing is left to the renderer.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Curved => Some("curved"),
            Self::Line => Some("line"),
            Self::None => None,
            Self::Ortho => Some("ortho"),
            Self::Polyline => Some("polyline"),
            Self::Spline => Some("spline"),
        }
    }
}

/// Node attributes used when [`DotConfig::node_attrs`] is empty: label under the image.
pub fn default_node_attrs() -> Attributes {
    Attributes::from([
        ("shape".to_string(), AttrValue::from("plaintext")),
        ("imagepos".to_string(), AttrValue::from("tc")),
        ("labelloc".to_string(), AttrValue::from("b")),
        ("height".to_string(), AttrValue::from(0.9)),
    ])
}

/// Edge attributes used when [`DotConfig::edge_attrs`] is empty.
pub fn default_edge_attrs() -> Attributes {
    Attributes::from([
        ("arrowhead".to_string(), AttrValue::from("vee")),
        ("arrowtail".to_string(), AttrValue::from("normal")),
    ])
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    /// `rankdir`; unset means the renderer default (top to bottom).
    pub direction: Option<Direction>,
    pub splines: Spline,
    /// Replaces the default node attributes when non-empty. No per-key merge.
    pub node_attrs: Attributes,
    /// Replaces the default edge attributes when non-empty. No per-key merge.
    pub edge_attrs: Attributes,
    /// Resource type to image path.
    pub resource_images: IndexMap<String, String>,
    #[serde(skip)]
    pub style: Option<Style>,
}

impl DotConfig {
    pub fn effective_node_attrs(&self) -> Attributes {
        if self.node_attrs.is_empty() {
            default_node_attrs()
        } else {
            self.node_attrs.clone()
        }
    }

    pub fn effective_edge_attrs(&self) -> Attributes {
        if self.edge_attrs.is_empty() {
            default_edge_attrs()
        } else {
            self.edge_attrs.clone()
        }
    }
}
