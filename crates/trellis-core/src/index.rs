//! Accumulates parsed records into a merged node map and an ordered edge log.

use indexmap::IndexMap;

use crate::model::{Edge, Node, RecordError};

/// Write-once accumulator for one input stream.
///
/// Owns the deduplicated node map (id → merged node, first-seen order) and
/// the full edge sequence exactly as ingested. Built once, read-only after.
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from text lines. The first malformed line aborts.
    pub fn from_lines<I>(lines: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut index = Self::new();
        for line in lines {
            index.add(Edge::parse(&line)?)?;
        }
        Ok(index)
    }

    /// Append an edge and fold both endpoints into the node map. A repeated
    /// id merges attribute bags, the incoming occurrence winning on key
    /// collision.
    pub fn add(&mut self, edge: Edge) -> Result<(), RecordError> {
        self.merge_node(edge.src.clone())?;
        self.merge_node(edge.dst.clone())?;
        self.edges.push(edge);
        Ok(())
    }

    fn merge_node(&mut self, node: Node) -> Result<(), RecordError> {
        let merged = match self.nodes.get(&node.id) {
            Some(existing) => existing.merge(&node)?,
            None => node,
        };
        self.nodes.insert(merged.id.clone(), merged);
        Ok(())
    }

    /// Merged node map, keyed by id, in first-seen order.
    pub fn nodes(&self) -> &IndexMap<String, Node> {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Every edge record as ingested, in arrival order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
