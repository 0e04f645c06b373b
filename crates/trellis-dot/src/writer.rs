//! DOT source generation.

use indexmap::IndexMap;

use trellis_core::{
    NameLookup, NodeIndex, NodeReport, Rankings, Scaler, UNGROUPED, display_value,
};

use crate::label;

/// The grouped companion view: cluster membership plus the statistics and
/// scaling computed over group labels.
pub struct GroupedView<'a> {
    pub groups: &'a trellis_core::GroupLookup,
    pub rankings: &'a Rankings,
    pub scaler: &'a Scaler<'a>,
}

/// Renders one pass of the pipeline as Graphviz DOT text.
///
/// The node set is the active degree map, so a node connected only by
/// excluded self loops does not render.
pub struct DotWriter<'a> {
    pub index: &'a NodeIndex,
    pub names: &'a NameLookup,
    pub rankings: &'a Rankings,
    pub scaler: &'a Scaler<'a>,
    pub grouped: Option<GroupedView<'a>>,
    pub keep_self_loops: bool,
}

impl DotWriter<'_> {
    pub fn render(&self) -> String {
        let mut out = String::from("strict digraph {\n");
        match &self.grouped {
            Some(grouped) => self.write_grouped_nodes(&mut out, grouped),
            None => self.write_nodes(&mut out),
        }
        self.write_edges(&mut out);
        out.push_str("}\n");
        out
    }

    fn write_nodes(&self, out: &mut String) {
        for (node_id, _) in self.rankings.stat.degrees().iter() {
            self.write_node(out, "  ", node_id);
        }
    }

    /// Nodes sharing a real group land inside a cluster subgraph labeled
    /// with that group's own report; sentinel-group nodes render at the top
    /// level.
    fn write_grouped_nodes(&self, out: &mut String, grouped: &GroupedView) {
        let mut clusters: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (node_id, _) in self.rankings.stat.degrees().iter() {
            clusters
                .entry(grouped.groups.get(node_id))
                .or_default()
                .push(node_id.as_str());
        }

        for (group, members) in clusters {
            if group == UNGROUPED {
                for node_id in members {
                    self.write_node(out, "  ", node_id);
                }
                continue;
            }

            let tooltip = label::tooltip(&report_pairs(&grouped.rankings.stat.report(group)));
            out.push_str(&format!(
                "  subgraph \"cluster_{}\" {{\n",
                label::escape(group)
            ));
            out.push_str(&format!(
                "    graph [color=lightgrey, style=filled, label=\"{}\", tooltip=\"{}\", fontsize=\"{}\"]\n",
                label::escape(group),
                label::escape(&tooltip),
                grouped.scaler.fontsize(group)
            ));
            for node_id in members {
                self.write_node(out, "    ", node_id);
            }
            out.push_str("  }\n");
        }
    }

    fn write_node(&self, out: &mut String, indent: &str, node_id: &str) {
        let name = self.names.get(node_id);

        // display name plus every attribute; the name-key row itself is
        // dropped so the name is not shown twice
        let mut rows: IndexMap<String, String> = IndexMap::new();
        rows.insert("name".to_string(), name.to_string());
        if let Some(node) = self.index.node(node_id) {
            for (key, value) in &node.attrs {
                rows.insert(key.clone(), display_value(value));
            }
        }
        if let Some(key) = self.names.key() {
            rows.shift_remove(key);
        }
        let rendered = if rows.len() > 1 {
            label::table(&rows)
        } else {
            name.to_string()
        };

        let tooltip = label::tooltip(&report_pairs(&self.rankings.stat.report(node_id)));
        out.push_str(&format!(
            "{indent}\"{}\" [color=white, style=filled, shape=box, {}, fontsize=\"{}\", tooltip=\"{}\"]\n",
            label::escape(node_id),
            label::label_attr(&rendered),
            self.scaler.fontsize(node_id),
            label::escape(&tooltip)
        ));
    }

    fn write_edges(&self, out: &mut String) {
        for ((src, dst), weight) in self.rankings.stat.weights().iter() {
            if !self.keep_self_loops && src == dst {
                continue;
            }

            let weight_label = if weight > 1 {
                weight.to_string()
            } else {
                String::new()
            };
            let mut tooltip = format!("{} -> {}", self.names.get(src), self.names.get(dst));
            if !weight_label.is_empty() {
                tooltip.push_str(&format!(" [{weight_label}]"));
            }

            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [arrowsize=\"{}\", penwidth=\"{}\", weight=\"{}\", label=\"{}\", tooltip=\"{}\", labeltooltip=\"{}\"]\n",
                label::escape(src),
                label::escape(dst),
                self.scaler.arrowsize(src, dst),
                self.scaler.penwidth(src, dst),
                self.scaler.weight(src, dst),
                label::escape(&weight_label),
                label::escape(&tooltip),
                label::escape(&tooltip)
            ));
        }
    }
}

fn report_pairs(report: &NodeReport) -> Vec<(String, String)> {
    vec![
        ("node_id".to_string(), report.node_id.clone()),
        ("in_degree".to_string(), report.in_degree.to_string()),
        ("out_degree".to_string(), report.out_degree.to_string()),
        ("in_unique".to_string(), report.in_unique.to_string()),
        ("out_unique".to_string(), report.out_unique.to_string()),
    ]
}
