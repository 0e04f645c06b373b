//! Percentile-to-range scaling for visual emphasis.

use crate::ranking::Rankings;

/// Percentile assigned to keys missing from a ranking: minimum emphasis.
const WORST_PERCENTILE: f64 = 100.0;

/// Inclusive numeric range. Bounds are order-normalized at construction, so
/// `new(10.0, 0.0)` and `new(0.0, 10.0)` are the same range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clamp {
    pub minimum: f64,
    pub maximum: f64,
}

impl Clamp {
    pub fn new(x: f64, y: f64) -> Self {
        if x < y {
            Clamp {
                minimum: x,
                maximum: y,
            }
        } else {
            Clamp {
                minimum: y,
                maximum: x,
            }
        }
    }

    /// Saturate `value` into the range.
    pub fn apply(&self, value: f64) -> f64 {
        if value < self.minimum {
            return self.minimum;
        }
        if value > self.maximum {
            return self.maximum;
        }
        value
    }
}

/// Maps a percentile in `[0, 100]` onto a clamped linear range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    clamp: Clamp,
}

impl ScaleRange {
    pub fn new(x: f64, y: f64) -> Self {
        ScaleRange {
            clamp: Clamp::new(x, y),
        }
    }

    pub fn apply(&self, percentile: f64) -> f64 {
        let value =
            (self.clamp.maximum - self.clamp.minimum) * percentile / 100.0 + self.clamp.minimum;
        self.clamp.apply(value)
    }
}

/// Bounds for each emphasized visual property.
#[derive(Debug, Clone, Copy)]
pub struct ScaleSettings {
    pub penwidth: ScaleRange,
    pub arrowsize: ScaleRange,
    pub weight: ScaleRange,
    pub fontsize: ScaleRange,
}

/// Resolves nodes and edges to concrete emphasis values through their
/// ranking. The inversion (`100 − value_percentile`) puts the heaviest
/// entities at the top of each range; keys absent from the ranking land at
/// the bottom.
#[derive(Debug, Clone)]
pub struct Scaler<'a> {
    rankings: &'a Rankings,
    settings: ScaleSettings,
}

impl<'a> Scaler<'a> {
    pub fn new(rankings: &'a Rankings, settings: ScaleSettings) -> Self {
        Scaler { rankings, settings }
    }

    fn node_percentile(&self, node_id: &str) -> f64 {
        self.rankings
            .nodes
            .get(node_id)
            .map(|entry| entry.value_percentile)
            .unwrap_or(WORST_PERCENTILE)
    }

    fn edge_percentile(&self, src: &str, dst: &str) -> f64 {
        let key = (src.to_string(), dst.to_string());
        self.rankings
            .edges
            .get(&key)
            .map(|entry| entry.value_percentile)
            .unwrap_or(WORST_PERCENTILE)
    }

    pub fn fontsize(&self, node_id: &str) -> f64 {
        self.settings
            .fontsize
            .apply(100.0 - self.node_percentile(node_id))
    }

    pub fn penwidth(&self, src: &str, dst: &str) -> f64 {
        self.settings
            .penwidth
            .apply(100.0 - self.edge_percentile(src, dst))
    }

    pub fn arrowsize(&self, src: &str, dst: &str) -> f64 {
        self.settings
            .arrowsize
            .apply(100.0 - self.edge_percentile(src, dst))
    }

    pub fn weight(&self, src: &str, dst: &str) -> f64 {
        self.settings
            .weight
            .apply(100.0 - self.edge_percentile(src, dst))
    }
}
