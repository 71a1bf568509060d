use resgraph_core::{GenericResource, ResourceCollection, ResourceRef};
use resgraph_render::drawio::{Geometry, MxCell, RandomError, RandomSource};
use resgraph_render::{DrawioConfig, Error, LayoutEngine, Projector};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn res(id: &str, value: &str, resource_type: &str) -> ResourceRef {
    GenericResource::shared(id, value, resource_type)
}

fn lambda_queue_stream() -> ResourceCollection {
    let lambda = res("1", "lambda1", "lambda");
    let queue = res("2", "queue1", "sqs");
    let mut rc = ResourceCollection::new();
    rc.add_resource(lambda.clone());
    rc.add_resource(queue.clone());
    rc.add_resource(res("3", "stream1", "kinesis"));
    rc.add_relationship(lambda, queue);
    rc
}

fn canned_engine(svg: String) -> Arc<dyn LayoutEngine> {
    Arc::new(move |_: &str| -> resgraph_render::Result<String> { Ok(svg.clone()) })
}

fn zero_bytes() -> Arc<dyn RandomSource> {
    Arc::new(|dest: &mut [u8]| -> Result<(), RandomError> {
        dest.fill(0);
        Ok(())
    })
}

fn config() -> DrawioConfig {
    let mut cfg = DrawioConfig::default();
    cfg.node_styles
        .insert("lambda".to_string(), "shape=lambda".to_string());
    cfg
}

#[test]
fn projects_vertices_and_edges_with_scoped_ids() {
    let projector = Projector::new(config(), canned_engine(fixture("layout.svg")))
        .with_random_source(zero_bytes());
    let doc = projector.project(&lambda_queue_stream()).unwrap();

    let cells = doc.cells();
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[0], MxCell::root());
    assert_eq!(cells[1], MxCell::layer());

    assert_eq!(
        cells[2],
        MxCell {
            id: "aaaaaaaaaaaaaaa-1".to_string(),
            value: "lambda1".to_string(),
            style: "shape=lambda".to_string(),
            vertex: "1".to_string(),
            parent: "1".to_string(),
            geometry: Some(Geometry::new("96.8597", "-85.8", 40.0, 40.0)),
            ..Default::default()
        }
    );
    assert_eq!(cells[3].style, "");
    assert_eq!(cells[4].id, "aaaaaaaaaaaaaaa-3");

    assert_eq!(
        cells[5],
        MxCell {
            id: "aaaaaaaaaaaaaaa-4".to_string(),
            edge: "1".to_string(),
            parent: "1".to_string(),
            source: "aaaaaaaaaaaaaaa-1".to_string(),
            target: "aaaaaaaaaaaaaaa-2".to_string(),
            geometry: Some(Geometry::edge()),
            ..Default::default()
        }
    );
}

#[test]
fn projected_document_serializes_to_drawio_xml() {
    let projector = Projector::new(config(), canned_engine(fixture("layout.svg")))
        .with_random_source(zero_bytes());
    let doc = projector.project(&lambda_queue_stream()).unwrap();
    assert_eq!(doc.to_xml(), fixture("projected.drawio"));
}

#[test]
fn random_failure_falls_back_to_an_empty_base() {
    let failing: Arc<dyn RandomSource> =
        Arc::new(|_: &mut [u8]| -> Result<(), RandomError> { Err(RandomError::new("no entropy")) });
    let projector = Projector::new(config(), canned_engine(fixture("layout.svg")))
        .with_random_source(failing);
    let doc = projector.project(&lambda_queue_stream()).unwrap();

    let ids: Vec<&str> = doc.cells().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "-1", "-2", "-3", "-4"]);
    assert_eq!(doc.cells()[5].source, "-1");
}

#[test]
fn each_projection_draws_a_fresh_base_id() {
    let projector = Projector::new(config(), canned_engine(fixture("layout.svg")));
    let a = projector.project(&lambda_queue_stream()).unwrap();
    let b = projector.project(&lambda_queue_stream()).unwrap();

    let base = |doc: &resgraph_render::MxFile| {
        let id = doc.cells()[2].id.clone();
        id.trim_end_matches("-1").to_string()
    };
    assert_eq!(base(&a).len(), 15);
    assert_ne!(base(&a), base(&b));
}

#[test]
fn unlabelled_and_foreign_svg_groups_are_skipped() {
    let svg = r#"<svg><g id="graph0" class="graph">
<g class="node"><title>legend</title><text x="1" y="2">legend</text></g>
<g class="node"><title>7$$orders$$sqs</title><text x="10" y="-20">7$$orders$$sqs</text></g>
<g class="edge"><title>a-&gt;b</title></g>
</g></svg>"#;
    let mut rc = ResourceCollection::new();
    rc.add_resource(res("7", "orders", "sqs"));

    let projector = Projector::new(DrawioConfig::default(), canned_engine(svg.to_string()))
        .with_random_source(zero_bytes());
    let doc = projector.project(&rc).unwrap();

    assert_eq!(doc.cells().len(), 3);
    let cell = &doc.cells()[2];
    assert_eq!(cell.id, "aaaaaaaaaaaaaaa-7");
    assert_eq!(cell.value, "orders");
    assert_eq!(
        cell.geometry,
        Some(Geometry::new("10", "-20", 40.0, 40.0))
    );
}

#[test]
fn relationships_without_endpoints_fail_the_projection() {
    let mut rc = lambda_queue_stream();
    rc.add_relationship(None, res("3", "stream1", "kinesis"));

    let projector = Projector::new(config(), canned_engine(fixture("layout.svg")))
        .with_random_source(zero_bytes());
    let err = projector.project(&rc).unwrap_err();
    assert!(
        matches!(
            err,
            Error::MissingEndpoint {
                index: 1,
                endpoint: "source"
            }
        ),
        "{err}"
    );
}
