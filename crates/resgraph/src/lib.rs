#![forbid(unsafe_code)]

//! `resgraph` turns graphs of infrastructure resources into diagrams and back.
//!
//! The resource model, diffing and styling are always available. Rendering lives behind a
//! feature so that model-only users do not pull in the XML stack.
//!
//! # Features
//!
//! - `render`: Graphviz DOT output, layout extraction through an external Graphviz-compatible
//!   engine, drawio projection and import (`resgraph::render`)

pub use resgraph_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use resgraph_render::dot::{AttrValue, Attributes, Direction, GraphKind, Spline};
    pub use resgraph_render::drawio::{MxCell, OsRandom, RandomSource};
    pub use resgraph_render::{
        DotConfig, DotDiagram, DrawioConfig, GraphvizCli, Importer, LayoutEngine, LayoutExtractor,
        MxFile, Projector, RenderConfig, build_dot, extract_layout,
    };
    pub use resgraph_render::{Error as RenderError, Result as RenderResult};

    use resgraph_core::{ResourceCollection, ResourceFactory};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] resgraph_core::Error),
        #[error(transparent)]
        Render(#[from] resgraph_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// DOT text for `rc`, with the config's style sheet bound to `rc`.
    pub fn resources_to_dot(rc: &ResourceCollection, config: &RenderConfig) -> String {
        DotDiagram::new(config.dot_config_for(rc)).build(rc)
    }

    /// Lays out `rc` with `engine` and returns the projected drawio document as XML.
    pub fn resources_to_drawio_xml(
        rc: &ResourceCollection,
        config: &RenderConfig,
        engine: Arc<dyn LayoutEngine>,
    ) -> Result<String> {
        let doc = Projector::new(config.drawio.clone(), engine).project(rc)?;
        Ok(doc.to_xml())
    }

    pub fn drawio_xml_to_resources<F: ResourceFactory>(
        xml: &str,
        factory: F,
    ) -> Result<ResourceCollection> {
        Ok(Importer::new(factory).import_xml(xml)?)
    }
}
