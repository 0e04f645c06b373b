//! Record model: nodes, edges, and the text line format they arrive in.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure modes of record ingestion. Both are fatal to the current run;
/// there is no skip-bad-lines mode.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The input line is not a well-formed edge record.
    #[error("malformed record: {0}")]
    Malformed(String),
    /// Two nodes with different identities were asked to merge.
    #[error("cannot merge node {left:?} with node {right:?}")]
    IdentityMismatch { left: String, right: String },
}

/// A graph node: identity plus an open attribute bag.
///
/// The bag keeps whatever extra fields the record carried, in the order they
/// appeared. Identity never lives in the bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub attrs: Map<String, Value>,
}

impl Node {
    /// Build a node from a parsed JSON object, pulling `id` out of the bag.
    pub fn from_object(mut obj: Map<String, Value>) -> Result<Self, RecordError> {
        let id = match obj.shift_remove("id") {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(RecordError::Malformed(format!(
                    "\"id\" should be a string, got {other}"
                )));
            }
            None => return Err(RecordError::Malformed("\"id\" required".to_string())),
        };
        if id.is_empty() {
            return Err(RecordError::Malformed(
                "\"id\" should not be empty".to_string(),
            ));
        }
        Ok(Node { id, attrs: obj })
    }

    /// Merge two occurrences of the same node into one. `other`'s attribute
    /// values win on key collision; ids must match.
    pub fn merge(&self, other: &Node) -> Result<Node, RecordError> {
        if self.id != other.id {
            return Err(RecordError::IdentityMismatch {
                left: self.id.clone(),
                right: other.id.clone(),
            });
        }
        let mut attrs = self.attrs.clone();
        for (key, value) in &other.attrs {
            attrs.insert(key.clone(), value.clone());
        }
        Ok(Node {
            id: self.id.clone(),
            attrs,
        })
    }
}

/// A directed edge record, exactly as ingested. Duplicates are meaningful;
/// they collapse into weights only during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub src: Node,
    pub dst: Node,
}

impl Edge {
    /// Parse one JSONL record of shape `{"src": NODE, "dst": NODE}` where
    /// NODE is `{"id": "...", ...}`.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(line)
            .map_err(|err| RecordError::Malformed(format!("invalid JSON: {err}")))?;
        let Value::Object(mut obj) = value else {
            return Err(RecordError::Malformed(format!(
                "record should be an object, got {value}"
            )));
        };
        let src = Self::endpoint(&mut obj, "src")?;
        let dst = Self::endpoint(&mut obj, "dst")?;
        Ok(Edge { src, dst })
    }

    fn endpoint(obj: &mut Map<String, Value>, field: &str) -> Result<Node, RecordError> {
        match obj.shift_remove(field) {
            Some(Value::Object(node)) => Node::from_object(node),
            Some(other) => Err(RecordError::Malformed(format!(
                "\"{field}\" should be an object, got {other}"
            ))),
            None => Err(RecordError::Malformed(format!("\"{field}\" required"))),
        }
    }

    /// True when both endpoints share an identity.
    pub fn is_self_loop(&self) -> bool {
        self.src.id == self.dst.id
    }
}
