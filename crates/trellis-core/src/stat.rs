//! Degree and weight aggregation over edge sequences.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Serialize;

use crate::index::NodeIndex;
use crate::labels::UNGROUPED;
use crate::model::{Edge, Node};

/// Node label → number of incident edge-endpoint occurrences.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DegreeMap(IndexMap<String, u64>);

impl DegreeMap {
    fn add(&mut self, label: &str) {
        *self.0.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, u64)> {
        self.0.iter().map(|(label, count)| (label, *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered (source, destination) label pair → collapsed duplicate count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WeightMap(IndexMap<(String, String), u64>);

impl WeightMap {
    fn add(&mut self, src: &str, dst: &str) {
        *self
            .0
            .entry((src.to_string(), dst.to_string()))
            .or_insert(0) += 1;
    }

    pub fn get(&self, src: &str, dst: &str) -> Option<u64> {
        self.0.get(&(src.to_string(), dst.to_string())).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), u64)> {
        self.0.iter().map(|(pair, count)| (pair, *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inbound/outbound totals and unique-neighbor counts for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeReport {
    pub node_id: String,
    pub in_degree: u64,
    pub out_degree: u64,
    pub in_unique: u64,
    pub out_unique: u64,
}

/// Aggregated degree and weight statistics for one view of the graph.
/// Built fresh per view (plain, grouped), never mutated afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stat {
    degrees: DegreeMap,
    weights: WeightMap,
}

impl Stat {
    /// Count one edge between two labels: both endpoint degrees and the
    /// ordered-pair weight.
    pub fn add(&mut self, src_label: &str, dst_label: &str) {
        self.degrees.add(src_label);
        self.degrees.add(dst_label);
        self.weights.add(src_label, dst_label);
    }

    /// Aggregate raw node ids over the edge sequence.
    pub fn from_edges(edges: &[Edge], keep_self_loops: bool) -> Self {
        let mut stat = Stat::default();
        for edge in retained(edges, keep_self_loops) {
            stat.add(&edge.src.id, &edge.dst.id);
        }
        stat
    }

    /// Aggregate under a substitute label. Endpoints resolve against the
    /// last occurrence of each node in the retained sequence; an edge with
    /// any unresolvable endpoint is skipped entirely.
    pub fn relabeled<F>(edges: &[Edge], keep_self_loops: bool, label: F) -> Self
    where
        F: Fn(&Node) -> Option<String>,
    {
        let kept: Vec<&Edge> = retained(edges, keep_self_loops).collect();
        let mut latest: HashMap<&str, &Node> = HashMap::new();
        for edge in &kept {
            latest.insert(edge.src.id.as_str(), &edge.src);
        }
        for edge in &kept {
            latest.insert(edge.dst.id.as_str(), &edge.dst);
        }
        let mut stat = Stat::default();
        for edge in &kept {
            let Some(src) = latest.get(edge.src.id.as_str()).copied().and_then(&label) else {
                continue;
            };
            let Some(dst) = latest.get(edge.dst.id.as_str()).copied().and_then(&label) else {
                continue;
            };
            stat.add(&src, &dst);
        }
        stat
    }

    /// Aggregate under a grouping label resolved against the merged node
    /// map. Unresolvable endpoints fall into the reserved [`UNGROUPED`]
    /// label; with self loops excluded, edges whose two labels resolve equal
    /// are dropped so a group never emphasizes its own containment.
    pub fn grouped<F>(index: &NodeIndex, keep_self_loops: bool, label: F) -> Self
    where
        F: Fn(&Node) -> Option<String>,
    {
        let mut stat = Stat::default();
        for edge in retained(index.edges(), keep_self_loops) {
            let src = index
                .node(&edge.src.id)
                .and_then(|n| label(n))
                .unwrap_or_else(|| UNGROUPED.to_string());
            let dst = index
                .node(&edge.dst.id)
                .and_then(|n| label(n))
                .unwrap_or_else(|| UNGROUPED.to_string());
            if !keep_self_loops && src == dst {
                continue;
            }
            stat.add(&src, &dst);
        }
        tracing::debug!("aggregated {} group labels", stat.degrees.len());
        stat
    }

    pub fn degrees(&self) -> &DegreeMap {
        &self.degrees
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    /// Per-node report over the weight map. Scans the whole map; called once
    /// per node when labeling, not on a hot path.
    pub fn report(&self, node_id: &str) -> NodeReport {
        let mut in_degree = 0;
        let mut out_degree = 0;
        let mut in_unique: HashSet<&str> = HashSet::new();
        let mut out_unique: HashSet<&str> = HashSet::new();
        for ((src, dst), count) in self.weights.iter() {
            if src == node_id {
                out_unique.insert(dst.as_str());
                out_degree += count;
            }
            if dst == node_id {
                in_unique.insert(src.as_str());
                in_degree += count;
            }
        }
        NodeReport {
            node_id: node_id.to_string(),
            in_degree,
            out_degree,
            in_unique: in_unique.len() as u64,
            out_unique: out_unique.len() as u64,
        }
    }
}

fn retained(edges: &[Edge], keep_self_loops: bool) -> impl Iterator<Item = &Edge> {
    edges
        .iter()
        .filter(move |edge| keep_self_loops || !edge.is_self_loop())
}
