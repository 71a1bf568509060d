use crate::Result;
use crate::dot::DotConfig;
use crate::drawio::DrawioConfig;
use resgraph_core::{ResourceCollection, StyleSheet};
use serde::{Deserialize, Serialize};

/// Everything a render needs besides the resources, loadable from one YAML or JSON document.
///
/// ```yaml
/// dot:
///   direction: LR
///   splines: ortho
///   resource_images:
///     lambda: icons/lambda.png
/// drawio:
///   node_styles:
///     lambda: shape=mxgraph.aws4.lambda_function
/// style:
///   nodes:
///     MyLambda: green
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dot: DotConfig,
    pub drawio: DrawioConfig,
    pub style: StyleSheet,
}

impl RenderConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The DOT configuration with the style sheet bound to `rc`.
    pub fn dot_config_for(&self, rc: &ResourceCollection) -> DotConfig {
        let mut dot = self.dot.clone();
        if self.style != StyleSheet::default() {
            dot.style = Some(self.style.resolve(rc));
        }
        dot
    }
}
