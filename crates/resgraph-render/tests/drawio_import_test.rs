use resgraph_core::{GenericResource, Resource, ResourceRef};
use resgraph_render::drawio::{MxCell, MxFile};
use resgraph_render::{Error, Importer};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn accept_all(id: &str, value: &str, style: &str) -> Option<ResourceRef> {
    Some(GenericResource::shared(id, value, style))
}

/// Only cells drawn with an AWS shape are resources; the shape name becomes the type.
fn aws_shapes(id: &str, value: &str, style: &str) -> Option<ResourceRef> {
    let shape = style.strip_prefix("shape=mxgraph.aws4.")?;
    let resource_type = shape.split(';').next().unwrap_or_default();
    Some(GenericResource::shared(id, value, resource_type))
}

#[test]
fn single_cell_becomes_one_resource() {
    let doc = MxFile::from_cells(vec![MxCell {
        id: "A".to_string(),
        value: "x".to_string(),
        style: "s".to_string(),
        ..Default::default()
    }]);

    let rc = Importer::new(accept_all).import(Some(&doc)).unwrap();
    assert_eq!(rc.resources.len(), 1);
    assert_eq!(rc.relationships.len(), 0);

    let r = &rc.resources[0];
    assert_eq!((r.id(), r.value(), r.resource_type()), ("A", "x", "s"));
}

#[test]
fn missing_document_is_invalid() {
    let err = Importer::new(accept_all).import(None).unwrap_err();
    assert!(matches!(err, Error::InvalidDocument { .. }), "{err}");
}

#[test]
fn declined_cells_and_dangling_edges_are_dropped() {
    let rc = Importer::new(aws_shapes)
        .import_xml(&fixture("hand_edited.drawio"))
        .unwrap();

    let resources: Vec<(&str, &str, &str)> = rc
        .resources
        .iter()
        .map(|r| (r.id(), r.value(), r.resource_type()))
        .collect();
    assert_eq!(
        resources,
        vec![
            ("api", "orders-api", "lambda_function"),
            ("queue", "orders & returns", "sqs"),
        ]
    );

    assert_eq!(rc.relationships.len(), 1);
    let (source, target) = rc.relationships[0].endpoints().unwrap();
    assert_eq!((source.id(), target.id()), ("api", "queue"));
}

#[test]
fn edges_between_accepted_cells_become_relationships() {
    let rc = Importer::new(accept_all)
        .import_xml(&fixture("projected.drawio"))
        .unwrap();

    // Every cell is accepted, the bootstrap and edge cells included.
    assert_eq!(rc.resources.len(), 6);
    assert_eq!(rc.relationships.len(), 1);
    let (source, target) = rc.relationships[0].endpoints().unwrap();
    assert_eq!(source.value(), "lambda1");
    assert_eq!(target.value(), "queue1");
}

#[test]
fn relationships_share_the_imported_resources() {
    let rc = Importer::new(accept_all)
        .import_xml(&fixture("projected.drawio"))
        .unwrap();
    let (source, _) = rc.relationships[0].endpoints().unwrap();
    let held = rc.resource_by_id("aaaaaaaaaaaaaaa-1").unwrap();
    assert!(std::sync::Arc::ptr_eq(source, held));
}

#[test]
fn edges_resolve_by_cell_id_when_the_factory_renames() {
    let vertex = |id: &str, value: &str| MxCell {
        id: id.to_string(),
        value: value.to_string(),
        vertex: "1".to_string(),
        ..Default::default()
    };
    let doc = MxFile::from_cells(vec![
        vertex("A", "a"),
        vertex("B", "b"),
        MxCell {
            id: "E".to_string(),
            edge: "1".to_string(),
            source: "A".to_string(),
            target: "B".to_string(),
            ..Default::default()
        },
    ]);
    let renamed = |id: &str, value: &str, style: &str| -> Option<ResourceRef> {
        if value.is_empty() {
            return None;
        }
        Some(GenericResource::shared(format!("res-{id}"), value, style))
    };

    let rc = Importer::new(renamed).import(Some(&doc)).unwrap();
    assert_eq!(rc.resources.len(), 2);
    assert_eq!(rc.relationships.len(), 1);
    let (source, target) = rc.relationships[0].endpoints().unwrap();
    assert_eq!((source.id(), target.id()), ("res-A", "res-B"));
    assert!(rc.resource_by_id("A").is_none());
}
