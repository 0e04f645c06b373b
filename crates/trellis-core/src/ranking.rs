//! Generic descending ranking with rank and cumulative-value percentiles.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::stat::Stat;

/// One ranked entry.
///
/// `percentile` is position-based (`100·place/count`); `value_percentile` is
/// the running cumulative sum of values through this place over the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry<K> {
    pub key: K,
    pub value: u64,
    pub place: usize,
    pub percentile: f64,
    pub value_percentile: f64,
}

/// Descending ranking over any keyed count map.
#[derive(Debug, Clone)]
pub struct Ranking<K> {
    entries: Vec<RankEntry<K>>,
    positions: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> Ranking<K> {
    /// Rank `(key, value)` pairs by descending value. The sort is stable;
    /// equal values keep their input order so repeated runs over the same
    /// logical input produce identical output.
    pub fn build<I>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
    {
        let mut pairs: Vec<(K, u64)> = data.into_iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        let count = pairs.len();
        let total: u64 = pairs.iter().map(|(_, value)| *value).sum();
        if total == 0 {
            // Empty or all-zero input: no ranking. Lookup misses resolve to
            // the worst percentile downstream.
            return Ranking {
                entries: Vec::new(),
                positions: HashMap::new(),
            };
        }

        let mut entries = Vec::with_capacity(count);
        let mut positions = HashMap::with_capacity(count);
        let mut acc = 0u64;
        for (i, (key, value)) in pairs.into_iter().enumerate() {
            acc += value;
            let place = i + 1;
            positions.insert(key.clone(), i);
            entries.push(RankEntry {
                key,
                value,
                place,
                percentile: 100.0 * place as f64 / count as f64,
                value_percentile: 100.0 * acc as f64 / total as f64,
            });
        }
        Ranking { entries, positions }
    }

    /// Entries in descending-value order.
    pub fn entries(&self) -> &[RankEntry<K>] {
        &self.entries
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&RankEntry<K>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.positions.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The node and edge rankings derived from one [`Stat`], kept together with
/// it. One instance per view; views never share mutable state.
#[derive(Debug, Clone)]
pub struct Rankings {
    pub stat: Stat,
    pub nodes: Ranking<String>,
    pub edges: Ranking<(String, String)>,
}

impl Rankings {
    pub fn build(stat: Stat) -> Self {
        let nodes = Ranking::build(stat.degrees().iter().map(|(label, count)| (label.clone(), count)));
        let edges = Ranking::build(stat.weights().iter().map(|(pair, count)| (pair.clone(), count)));
        Rankings { stat, nodes, edges }
    }
}
