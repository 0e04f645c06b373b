//! Trellis Core — record model, node index, statistics, ranking, and scaling

pub mod dump;
pub mod index;
pub mod labels;
pub mod model;
pub mod ranking;
pub mod scale;
pub mod stat;


pub use index::NodeIndex;
pub use labels::{GroupLookup, NameLookup, UNGROUPED, display_value};
pub use model::{Edge, Node, RecordError};
pub use ranking::{RankEntry, Ranking, Rankings};
pub use scale::{Clamp, ScaleRange, ScaleSettings, Scaler};
pub use stat::{DegreeMap, NodeReport, Stat, WeightMap};
