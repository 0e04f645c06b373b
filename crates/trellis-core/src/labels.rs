//! Display-name and group lookups projected from node attributes.

use indexmap::IndexMap;
use serde_json::Value;

use crate::model::Edge;

/// Reserved group label for nodes without a resolvable grouping attribute.
/// Rendering branches on this: members of this group draw outside any
/// cluster.
pub const UNGROUPED: &str = "__trellis__ungrouped";

/// Display form of a JSON value without string quoting.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// node id → attribute value, projected over every endpoint occurrence of
/// the edge log for one attribute key. Destination occurrences override
/// source occurrences, later records override earlier ones.
#[derive(Debug, Default, Clone)]
struct AttrLookup {
    key: Option<String>,
    map: IndexMap<String, String>,
}

impl AttrLookup {
    fn build(edges: &[Edge], key: Option<&str>) -> Self {
        let mut map = IndexMap::new();
        if let Some(key) = key {
            for edge in edges {
                if let Some(value) = edge.src.attrs.get(key) {
                    map.insert(edge.src.id.clone(), display_value(value));
                }
            }
            for edge in edges {
                if let Some(value) = edge.dst.attrs.get(key) {
                    map.insert(edge.dst.id.clone(), display_value(value));
                }
            }
        }
        AttrLookup {
            key: key.map(str::to_string),
            map,
        }
    }
}

/// node id → display name.
#[derive(Debug, Default, Clone)]
pub struct NameLookup(AttrLookup);

impl NameLookup {
    pub fn build(edges: &[Edge], key: Option<&str>) -> Self {
        NameLookup(AttrLookup::build(edges, key))
    }

    /// Display name of a node; the id itself when no name resolves.
    pub fn get<'a>(&'a self, node_id: &'a str) -> &'a str {
        self.0.map.get(node_id).map(String::as_str).unwrap_or(node_id)
    }

    pub fn key(&self) -> Option<&str> {
        self.0.key.as_deref()
    }

    pub fn map(&self) -> &IndexMap<String, String> {
        &self.0.map
    }
}

/// node id → group name.
#[derive(Debug, Default, Clone)]
pub struct GroupLookup(AttrLookup);

impl GroupLookup {
    pub fn build(edges: &[Edge], key: Option<&str>) -> Self {
        GroupLookup(AttrLookup::build(edges, key))
    }

    /// Group of a node; [`UNGROUPED`] when no group resolves.
    pub fn get(&self, node_id: &str) -> &str {
        self.0.map.get(node_id).map(String::as_str).unwrap_or(UNGROUPED)
    }

    pub fn map(&self) -> &IndexMap<String, String> {
        &self.0.map
    }
}
