use super::model::MxFile;
use crate::{Error, Result};
use resgraph_core::{ResourceCollection, ResourceFactory, ResourceRef};
use rustc_hash::FxHashMap;

/// Rebuilds a resource collection from drawio cells.
///
/// Every cell is offered to the factory; cells it declines are not resources. Cells naming both a
/// `source` and a `target` become relationships when both IDs resolve to accepted cells, otherwise
/// they are dropped. Endpoints resolve by cell ID, not by the ID the factory gives the resource.
#[derive(Debug, Clone)]
pub struct Importer<F> {
    factory: F,
}

impl<F: ResourceFactory> Importer<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn import(&self, doc: Option<&MxFile>) -> Result<ResourceCollection> {
        let Some(doc) = doc else {
            return Err(Error::InvalidDocument {
                message: "no document to import".to_string(),
            });
        };

        let mut rc = ResourceCollection::new();
        let mut by_cell_id: FxHashMap<&str, ResourceRef> = FxHashMap::default();

        for cell in doc.cells() {
            if let Some(res) = self
                .factory
                .create_resource(&cell.id, &cell.value, &cell.style)
            {
                by_cell_id.insert(cell.id.as_str(), res.clone());
                rc.add_resource(res);
            }
        }

        let mut dropped = 0usize;
        for cell in doc.cells() {
            if cell.source.is_empty() || cell.target.is_empty() {
                continue;
            }
            match (
                by_cell_id.get(cell.source.as_str()),
                by_cell_id.get(cell.target.as_str()),
            ) {
                (Some(source), Some(target)) => {
                    rc.add_relationship(source.clone(), target.clone());
                }
                _ => dropped += 1,
            }
        }

        tracing::debug!(
            cells = doc.cells().len(),
            resources = rc.resources.len(),
            relationships = rc.relationships.len(),
            dropped_relationships = dropped,
            "imported drawio document"
        );
        Ok(rc)
    }

    /// Parses `xml` with [`MxFile::parse`] and imports it.
    pub fn import_xml(&self, xml: &str) -> Result<ResourceCollection> {
        let doc = MxFile::parse(xml)?;
        self.import(Some(&doc))
    }
}
