use serde::{Deserialize, Serialize};

use super::group::StatsGroup;

/// Date-bucket granularity for the column axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGrouping {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl DateGrouping {
    /// SQLite expression producing the bucket label for one timestamp column.
    ///
    /// Week labels follow ISO 8601 with an unpadded week number, as in
    /// `2024-KW7`: shifting to the Thursday of the current week lands in
    /// the ISO week-year, and that Thursday's day-of-year fixes the week
    /// number.
    pub fn sql_expr(&self, date_column: &str) -> String {
        match self {
            DateGrouping::Day => format!("date({})", date_column),
            DateGrouping::Week => format!(
                "strftime('%Y', date({col}, '-3 days', 'weekday 4')) || '-KW' || \
                 ((strftime('%j', date({col}, '-3 days', 'weekday 4')) - 1) / 7 + 1)",
                col = date_column
            ),
            DateGrouping::Month => format!("strftime('%Y-%m', {})", date_column),
            DateGrouping::Year => format!("strftime('%Y', {})", date_column),
        }
    }
}

/// Immutable snapshot of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsTable {
    /// Groups in configuration order.
    pub groups: Vec<StatsGroup>,
    /// Union of all bucket labels across groups, ascending, duplicate-free.
    pub column_names: Vec<String>,
    /// Deepest sub-group nesting over all groups plus one; 0 with no groups.
    pub max_group_level: usize,
    /// Whether renderers and exports should add a delta cell per column.
    pub show_diff_column: bool,
}

impl StatsTable {
    /// Assembles the snapshot from ingested groups, deriving the column
    /// union and the maximum group level.
    pub fn from_groups(groups: Vec<StatsGroup>, show_diff_column: bool) -> Self {
        let mut column_names: Vec<String> = groups
            .iter()
            .flat_map(|group| group.column_names())
            .collect();
        column_names.sort();
        column_names.dedup();

        let max_group_level = groups
            .iter()
            .map(|group| group.depth() + 1)
            .max()
            .unwrap_or(0);

        Self {
            groups,
            column_names,
            max_group_level,
            show_diff_column,
        }
    }
}
