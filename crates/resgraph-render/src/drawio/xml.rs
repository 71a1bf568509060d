use super::model::{Diagram, Geometry, MxCell, MxFile, MxGraphModel, Root};
use crate::{Error, Result};

impl MxFile {
    /// Serializes the document as uncompressed drawio XML. Empty attributes are left out.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<mxfile>\n");

        let diagram = &self.diagram;
        out.push_str("  <diagram");
        push_attr(&mut out, "id", &diagram.id);
        push_attr(&mut out, "name", &diagram.name);
        out.push_str(">\n");
        out.push_str("    <mxGraphModel>\n");
        out.push_str("      <root>\n");
        for cell in self.cells() {
            write_cell(&mut out, cell);
        }
        out.push_str("      </root>\n");
        out.push_str("    </mxGraphModel>\n");
        out.push_str("  </diagram>\n");
        out.push_str("</mxfile>\n");
        out
    }

    /// Parses an uncompressed drawio document.
    ///
    /// Accepts `<mxfile>` (first `<diagram>` is used) or a bare `<mxGraphModel>`. Cells wrapped in
    /// `<object>`/`<UserObject>` take their id and label from the wrapper.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;
        let root = doc.root_element();

        match root.tag_name().name() {
            "mxfile" => {
                let diagram = child_element(root, "diagram")
                    .ok_or_else(|| invalid("mxfile has no <diagram>"))?;
                let Some(model) = child_element(diagram, "mxGraphModel") else {
                    if diagram.text().is_some_and(|t| !t.trim().is_empty()) {
                        return Err(invalid("compressed diagram payloads are not supported"));
                    }
                    return Err(invalid("diagram has no <mxGraphModel>"));
                };
                Ok(Self {
                    diagram: Diagram {
                        id: attr(diagram, "id"),
                        name: attr(diagram, "name"),
                        graph_model: parse_model(model)?,
                    },
                })
            }
            "mxGraphModel" => Ok(Self {
                diagram: Diagram {
                    graph_model: parse_model(root)?,
                    ..Default::default()
                },
            }),
            other => Err(invalid(format!(
                "expected <mxfile> or <mxGraphModel> root, found <{other}>"
            ))),
        }
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidDocument {
        message: message.into(),
    }
}

fn parse_model(model: roxmltree::Node<'_, '_>) -> Result<MxGraphModel> {
    let root =
        child_element(model, "root").ok_or_else(|| invalid("mxGraphModel has no <root>"))?;

    let mut cells = Vec::new();
    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "mxCell" => cells.push(parse_cell(node)),
            "object" | "UserObject" => {
                let mut cell = child_element(node, "mxCell")
                    .map(parse_cell)
                    .unwrap_or_default();
                cell.id = attr(node, "id");
                cell.value = attr(node, "label");
                cells.push(cell);
            }
            _ => {}
        }
    }

    Ok(MxGraphModel {
        root: Root { cells },
    })
}

fn parse_cell(node: roxmltree::Node<'_, '_>) -> MxCell {
    MxCell {
        id: attr(node, "id"),
        value: attr(node, "value"),
        style: attr(node, "style"),
        parent: attr(node, "parent"),
        vertex: attr(node, "vertex"),
        edge: attr(node, "edge"),
        source: attr(node, "source"),
        target: attr(node, "target"),
        geometry: child_element(node, "mxGeometry").map(|g| Geometry {
            x: attr(g, "x"),
            y: attr(g, "y"),
            width: g.attribute("width").and_then(|v| v.parse().ok()),
            height: g.attribute("height").and_then(|v| v.parse().ok()),
            as_: attr(g, "as"),
        }),
    }
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn attr(node: roxmltree::Node<'_, '_>, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

fn write_cell(out: &mut String, cell: &MxCell) {
    out.push_str("        <mxCell");
    push_attr(out, "id", &cell.id);
    push_attr(out, "value", &cell.value);
    push_attr(out, "style", &cell.style);
    push_attr(out, "vertex", &cell.vertex);
    push_attr(out, "edge", &cell.edge);
    push_attr(out, "parent", &cell.parent);
    push_attr(out, "source", &cell.source);
    push_attr(out, "target", &cell.target);

    let Some(geometry) = &cell.geometry else {
        out.push_str(" />\n");
        return;
    };

    out.push_str(">\n");
    out.push_str("          <mxGeometry");
    push_attr(out, "x", &geometry.x);
    push_attr(out, "y", &geometry.y);
    if let Some(width) = geometry.width {
        push_attr(out, "width", &width.to_string());
    }
    if let Some(height) = geometry.height {
        push_attr(out, "height", &height.to_string());
    }
    push_attr(out, "as", &geometry.as_);
    out.push_str(" />\n");
    out.push_str("        </mxCell>\n");
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr_into(out, value);
    out.push('"');
}

fn escape_attr_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            // drawio labels keep line breaks inside attributes.
            b'\n' => "&#10;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}
