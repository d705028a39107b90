use serde::{Deserialize, Serialize};

/// One configured statistic as stored in the `stats_group` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsGroupDefinition {
    pub id: String,
    /// Display name; groups sharing a name merge into one tree.
    pub name: String,
    /// SQL template with the `[{column}]` and `[{condition}]` slots.
    pub query: String,
    /// Comma-separated sub-group field names, outermost level first.
    pub sub_group_fields: String,
    /// Column the requested date range is applied to; None disables it.
    pub date_restriction_field: Option<String>,
    /// Column the requested portal id is compared against; None disables it.
    pub portal_restriction_field: Option<String>,
    /// Evaluation and display order.
    pub position: i32,
}

impl StatsGroupDefinition {
    /// Ordered sub-group field list: comma-split and trimmed, with empty
    /// entries dropped.
    pub fn sub_group_field_list(&self) -> Vec<String> {
        self.sub_group_fields
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Listing shape for configured statistics. The SQL template stays
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsGroupSummary {
    pub id: String,
    pub name: String,
    /// Parsed sub-group field names, outermost level first.
    pub sub_group_fields: Vec<String>,
    pub date_restriction_field: Option<String>,
    pub portal_restriction_field: Option<String>,
    pub position: i32,
}

impl From<&StatsGroupDefinition> for StatsGroupSummary {
    fn from(definition: &StatsGroupDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            name: definition.name.clone(),
            sub_group_fields: definition.sub_group_field_list(),
            date_restriction_field: definition.date_restriction_field.clone(),
            portal_restriction_field: definition.portal_restriction_field.clone(),
            position: definition.position,
        }
    }
}
