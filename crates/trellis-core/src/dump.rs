//! Machine-readable dump of every intermediate the pipeline computes.
//!
//! This is the regression surface: the merged node map, the raw edge log,
//! the name lookup, both statistic maps, full rank entries, and the grouped
//! trio when a grouping key is active.

use serde_json::{Map, Value, json};

use crate::index::NodeIndex;
use crate::labels::{GroupLookup, NameLookup};
use crate::ranking::Rankings;
use crate::stat::Stat;

fn edge_key(src: &str, dst: &str) -> String {
    format!("{src}|{dst}")
}

fn stat_value(stat: &Stat) -> Value {
    let degrees: Map<String, Value> = stat
        .degrees()
        .iter()
        .map(|(label, count)| (label.clone(), json!(count)))
        .collect();
    let weights: Map<String, Value> = stat
        .weights()
        .iter()
        .map(|((src, dst), count)| (edge_key(src, dst), json!(count)))
        .collect();
    json!({ "nodes": degrees, "edges": weights })
}

fn ranking_value(rankings: &Rankings) -> Value {
    let nodes: Vec<Value> = rankings.nodes.entries().iter().map(|e| json!(e)).collect();
    let edges: Map<String, Value> = rankings
        .edges
        .entries()
        .iter()
        .map(|e| (edge_key(&e.key.0, &e.key.1), json!(e)))
        .collect();
    json!({ "nodes": nodes, "edges": edges })
}

/// Build the dump for one run. `grouped` carries the group lookup and the
/// grouped rankings when a grouping key is active.
pub fn dump(
    index: &NodeIndex,
    names: &NameLookup,
    rankings: &Rankings,
    grouped: Option<(&GroupLookup, &Rankings)>,
) -> Value {
    let node_map: Map<String, Value> = index
        .nodes()
        .iter()
        .map(|(id, node)| (id.clone(), json!(node)))
        .collect();
    let source: Vec<Value> = index.edges().iter().map(|edge| json!(edge)).collect();

    let group = match grouped {
        Some((groups, grouped_rankings)) => json!({
            "name": groups.map(),
            "stat": stat_value(&grouped_rankings.stat),
            "ranking": ranking_value(grouped_rankings),
        }),
        None => json!({}),
    };

    json!({
        "nodes": {
            "map": node_map,
            "source": source,
            "name": names.map(),
        },
        "stat": stat_value(&rankings.stat),
        "ranking": ranking_value(rankings),
        "group": group,
    })
}
