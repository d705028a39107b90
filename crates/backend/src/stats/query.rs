use contracts::stats::{DateGrouping, StatsGroupDefinition};

/// Placeholder in a group query replaced by the date-bucket expression
pub const COLUMN_SLOT: &str = "[{column}]";
/// Placeholder in a group query replaced by the rendered filter clause
pub const CONDITION_SLOT: &str = "[{condition}]";
/// Timestamp column of the shop schema the bucket expression truncates
pub const DATE_COLUMN: &str = "datecreated";

/// A rendered WHERE clause plus the values bound to its placeholders.
/// Values never end up inside the SQL text itself.
#[derive(Debug, Clone, Default)]
pub struct FilterClause {
    pub clause: String,
    pub params: Vec<sea_orm::Value>,
}

/// Builds the filter clause for one group. Each predicate is emitted only
/// when the group configures the matching restriction column and the
/// request carries the value.
pub fn build_filter(
    definition: &StatsGroupDefinition,
    date_from: Option<&str>,
    date_to: Option<&str>,
    portal_id: Option<&str>,
) -> FilterClause {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<sea_orm::Value> = Vec::new();

    if let Some(date_field) = definition.date_restriction_field.as_deref() {
        let column = quote_identifier(date_field);
        if let Some(from) = date_from {
            conditions.push(format!("{} >= ?", column));
            params.push(from.to_string().into());
        }
        if let Some(to) = date_to {
            conditions.push(format!("{} <= ?", column));
            params.push(to.to_string().into());
        }
    }

    if let Some(portal_field) = definition.portal_restriction_field.as_deref() {
        if let Some(portal) = portal_id {
            conditions.push(format!("{} = ?", quote_identifier(portal_field)));
            params.push(portal.to_string().into());
        }
    }

    if conditions.is_empty() {
        return FilterClause::default();
    }

    let clause = format!(
        "WHERE {}",
        conditions
            .iter()
            .map(|c| format!("({})", c))
            .collect::<Vec<_>>()
            .join(" AND ")
    );
    FilterClause { clause, params }
}

/// Double-quotes an identifier for SQLite, quoting each segment of a
/// dotted name separately (`shop_order.datecreated` stays addressable).
pub fn quote_identifier(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Substitutes the bucket expression and filter clause into the group's
/// query template.
pub fn render_template(template: &str, grouping: DateGrouping, filter: &FilterClause) -> String {
    template
        .replace(COLUMN_SLOT, &grouping.sql_expr(DATE_COLUMN))
        .replace(CONDITION_SLOT, &filter.clause)
}
