//! Trellis DOT — Graphviz source generation for ranked edge streams

pub mod label;
pub mod writer;


pub use label::escape;
pub use writer::{DotWriter, GroupedView};
