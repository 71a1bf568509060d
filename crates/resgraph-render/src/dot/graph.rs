//! Minimal DOT graph container and writer.
//!
//! Nodes are keyed by string and created idempotently; edges are appended as given (callers that
//! need unique edges dedupe before calling [`DotGraph::edge`]). Attributes are written sorted by
//! name so the text output only depends on insertion order of nodes and edges.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{}", Quoted(v)),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

impl GraphKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Directed => "digraph",
            Self::Undirected => "graph",
        }
    }

    fn edge_op(self) -> &'static str {
        match self {
            Self::Directed => "->",
            Self::Undirected => "--",
        }
    }
}

/// How node statements are identified in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeNaming {
    /// `n1`, `n2`, ... in creation order, with the key written as the `label` attribute.
    #[default]
    Generated,
    /// The quoted key itself; Graphviz then uses the key as label and SVG `<title>`.
    Key,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    pub kind: GraphKind,
    pub naming: NodeNaming,
}

#[derive(Debug, Clone)]
pub struct DotNode {
    key: String,
    id: String,
    attrs: Attributes,
}

impl DotNode {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct DotEdge {
    from: usize,
    to: usize,
    attrs: Attributes,
}

impl DotEdge {
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

type NodeInitializer = Box<dyn Fn(&mut DotNode) + Send + Sync>;
type EdgeInitializer = Box<dyn Fn(&mut DotEdge) + Send + Sync>;

pub struct DotGraph {
    options: GraphOptions,

    attrs: IndexMap<String, AttrValue>,
    node_initializer: Option<NodeInitializer>,
    edge_initializer: Option<EdgeInitializer>,

    nodes: Vec<DotNode>,
    node_index: FxHashMap<String, usize>,

    edges: Vec<DotEdge>,
}

impl DotGraph {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            attrs: IndexMap::new(),
            node_initializer: None,
            edge_initializer: None,
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            edges: Vec::new(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Sets a graph-level attribute. Graph attributes keep their insertion order.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Runs on every node when it is first created.
    pub fn set_node_initializer<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut DotNode) + Send + Sync + 'static,
    {
        self.node_initializer = Some(Box::new(f));
        self
    }

    /// Runs on every edge when it is created.
    pub fn set_edge_initializer<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut DotEdge) + Send + Sync + 'static,
    {
        self.edge_initializer = Some(Box::new(f));
        self
    }

    pub fn has_node(&self, key: &str) -> bool {
        self.node_index.contains_key(key)
    }

    /// Returns the node for `key`, creating it first if needed.
    pub fn node(&mut self, key: &str) -> &mut DotNode {
        let idx = self.ensure_node(key);
        &mut self.nodes[idx]
    }

    pub fn find_node(&self, key: &str) -> Option<&DotNode> {
        self.node_index.get(key).map(|&idx| &self.nodes[idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DotNode> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Appends an edge between the nodes keyed `from` and `to`, creating missing nodes.
    pub fn edge(&mut self, from: &str, to: &str) -> &mut DotEdge {
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        let mut edge = DotEdge {
            from,
            to,
            attrs: Attributes::new(),
        };
        if let Some(init) = &self.edge_initializer {
            init(&mut edge);
        }
        self.edges.push(edge);
        let idx = self.edges.len() - 1;
        &mut self.edges[idx]
    }

    /// Edges as `(from key, to key, edge)` in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &DotEdge)> {
        self.edges.iter().map(|e| {
            (
                self.nodes[e.from].key.as_str(),
                self.nodes[e.to].key.as_str(),
                e,
            )
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn ensure_node(&mut self, key: &str) -> usize {
        if let Some(&idx) = self.node_index.get(key) {
            return idx;
        }
        let idx = self.nodes.len();
        let mut node = match self.options.naming {
            NodeNaming::Generated => {
                let mut attrs = Attributes::new();
                attrs.insert("label".to_string(), AttrValue::from(key));
                DotNode {
                    key: key.to_string(),
                    id: format!("n{}", idx + 1),
                    attrs,
                }
            }
            NodeNaming::Key => DotNode {
                key: key.to_string(),
                id: Quoted(key).to_string(),
                attrs: Attributes::new(),
            },
        };
        if let Some(init) = &self.node_initializer {
            init(&mut node);
        }
        self.nodes.push(node);
        self.node_index.insert(key.to_string(), idx);
        idx
    }
}

impl fmt::Debug for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DotGraph")
            .field("options", &self.options)
            .field("attrs", &self.attrs)
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {{", self.options.kind.keyword())?;

        f.write_str("\t")?;
        for (name, value) in &self.attrs {
            write!(f, "{name}={value};")?;
        }
        f.write_str("\n")?;

        for node in &self.nodes {
            write!(f, "\t{}", node.id)?;
            write_attrs(f, &node.attrs)?;
            f.write_str(";\n")?;
        }

        let op = self.options.kind.edge_op();
        for edge in &self.edges {
            write!(
                f,
                "\t{}{op}{}",
                self.nodes[edge.from].id, self.nodes[edge.to].id
            )?;
            write_attrs(f, &edge.attrs)?;
            f.write_str(";\n")?;
        }

        f.write_str("\t\n}\n")
    }
}

fn write_attrs(f: &mut fmt::Formatter<'_>, attrs: &Attributes) -> fmt::Result {
    if attrs.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    for (i, (name, value)) in attrs.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{name}={value}")?;
    }
    f.write_str("]")
}

/// A DOT double-quoted string.
///
/// Backslashes are doubled so values never end the string early and Graphviz does not read
/// `\n`, `\l` or `\r` inside them as line breaks.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        let text = self.0;
        let mut start = 0usize;
        for (i, b) in text.bytes().enumerate() {
            let esc = match b {
                b'\\' => "\\\\",
                b'"' => "\\\"",
                _ => continue,
            };
            f.write_str(&text[start..i])?;
            f.write_str(esc)?;
            start = i + 1;
        }
        f.write_str(&text[start..])?;
        f.write_str("\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_keeps_wrapping_syntax() {
        let g = DotGraph::new(GraphOptions::default());
        assert_eq!(g.to_string(), "digraph  {\n\t\n\t\n}\n");
    }

    #[test]
    fn nodes_are_created_once_per_key() {
        let mut g = DotGraph::new(GraphOptions::default());
        g.node("a").attr("color", "red");
        g.node("a").attr("shape", "box");
        g.node("b");

        assert_eq!(g.node_count(), 2);
        let a = g.find_node("a").unwrap();
        assert_eq!(a.id(), "n1");
        assert_eq!(a.get("color"), Some(&AttrValue::from("red")));
        assert_eq!(a.get("shape"), Some(&AttrValue::from("box")));
    }

    #[test]
    fn initializers_run_on_creation_only() {
        let mut g = DotGraph::new(GraphOptions::default());
        g.set_node_initializer(|n| {
            n.attr("shape", "plaintext");
        });
        g.set_edge_initializer(|e| {
            e.attr("arrowhead", "vee");
        });
        g.node("a").attr("shape", "box");
        g.node("a");
        g.edge("a", "b");

        assert_eq!(
            g.to_string(),
            "digraph  {\n\t\n\tn1[label=\"a\",shape=\"box\"];\n\tn2[label=\"b\",shape=\"plaintext\"];\n\tn1->n2[arrowhead=\"vee\"];\n\t\n}\n"
        );
    }

    #[test]
    fn undirected_graph_with_key_naming_quotes_identifiers() {
        let mut g = DotGraph::new(GraphOptions {
            kind: GraphKind::Undirected,
            naming: NodeNaming::Key,
        });
        g.set_attr("rankdir", "LR");
        g.edge("say \"hi\"", "b");

        assert_eq!(
            g.to_string(),
            "graph  {\n\trankdir=\"LR\";\n\t\"say \\\"hi\\\"\";\n\t\"b\";\n\t\"say \\\"hi\\\"\"--\"b\";\n\t\n}\n"
        );
    }

    #[test]
    fn backslashes_are_doubled_inside_quoted_strings() {
        let mut g = DotGraph::new(GraphOptions {
            kind: GraphKind::Directed,
            naming: NodeNaming::Key,
        });
        g.node(r#"C:\logs\"#);
        g.node(r#"a\n"b""#);
        assert_eq!(
            g.to_string(),
            "digraph  {\n\t\n\t\"C:\\\\logs\\\\\";\n\t\"a\\\\n\\\"b\\\"\";\n\t\n}\n"
        );
    }

    #[test]
    fn numeric_and_boolean_attributes_are_unquoted() {
        let mut g = DotGraph::new(GraphOptions::default());
        g.node("a")
            .attr("height", 0.9)
            .attr("peripheries", 2_i64)
            .attr("fixedsize", true);
        assert_eq!(
            g.to_string(),
            "digraph  {\n\t\n\tn1[fixedsize=true,height=0.9,label=\"a\",peripheries=2];\n\t\n}\n"
        );
    }

    #[test]
    fn edges_report_their_endpoint_keys() {
        let mut g = DotGraph::new(GraphOptions::default());
        g.edge("a", "b").attr("color", "red");
        g.edge("a", "b");

        let edges: Vec<(&str, &str)> = g.edges().map(|(from, to, _)| (from, to)).collect();
        assert_eq!(edges, vec![("a", "b"), ("a", "b")]);
        assert_eq!(g.edge_count(), 2);
    }
}
