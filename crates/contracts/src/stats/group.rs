use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One statistic group with its hierarchical sub-group breakdown.
///
/// Every ingested value is accumulated at this node and at each node along
/// its sub-group path, so a node's totals always equal the sum of its
/// children's totals for every column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsGroup {
    /// Display name of the group (or the sub-group label below the root).
    pub title: String,
    /// Child nodes keyed by sub-group label; one map level per sub-group field.
    pub children: BTreeMap<String, StatsGroup>,
    /// Accumulated value per column (bucket label).
    pub totals: BTreeMap<String, f64>,
}

impl StatsGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Merges one raw value: accumulates under `column` here, then descends
    /// along `path`, get-or-creating one child per label.
    pub fn add_row(&mut self, path: &[String], column: &str, amount: f64) {
        *self.totals.entry(column.to_string()).or_insert(0.0) += amount;
        if let Some((label, rest)) = path.split_first() {
            let child = self
                .children
                .entry(label.clone())
                .or_insert_with(|| StatsGroup::new(label.clone()));
            child.add_row(rest, column, amount);
        }
    }

    /// Total for one column; columns never seen read as zero.
    pub fn total(&self, column: &str) -> f64 {
        self.totals.get(column).copied().unwrap_or(0.0)
    }

    /// Column names seen by this node. The root of a group therefore holds
    /// the union over its whole subtree.
    pub fn column_names(&self) -> Vec<String> {
        self.totals.keys().cloned().collect()
    }

    /// Deepest child nesting below this node; 0 for a flat group.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(StatsGroup::node_count)
            .sum::<usize>()
    }
}
