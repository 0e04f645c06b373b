//! Label and tooltip text building.

use indexmap::IndexMap;

/// Escape a string for use inside a double-quoted DOT attribute.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Graphviz HTML-like two-column table over the rows, sorted by key.
/// Used as a node label when the node carries more than a bare name.
pub fn table(rows: &IndexMap<String, String>) -> String {
    let mut pairs: Vec<(&String, &String)> = rows.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let body: String = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "<tr>\n<td align=\"left\"><b>{key}</b></td>\n<td align=\"right\">{value}</td>\n</tr>"
            )
        })
        .collect();
    format!("<\n<table border=\"0\">{body}</table>\n>")
}

/// Newline-joined `key: value` lines, sorted by key.
pub fn tooltip(pairs: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = pairs.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A label attribute assignment: HTML-like labels go unquoted, everything
/// else gets quoted and escaped.
pub fn label_attr(label: &str) -> String {
    if label.starts_with('<') {
        format!("label={label}")
    } else {
        format!("label=\"{}\"", escape(label))
    }
}
