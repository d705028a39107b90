use contracts::stats::StatsGroupDefinition;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, QueryResult,
    Statement,
};

#[derive(Debug, Clone, FromQueryResult)]
struct StatsGroupRow {
    id: String,
    name: String,
    query: String,
    sub_group_fields: String,
    date_restriction_field: Option<String>,
    portal_restriction_field: Option<String>,
    position: i32,
}

/// Loads all configured stats groups in evaluation order.
/// Blank restriction columns are treated the same as NULL ones.
pub async fn load_group_definitions(
    db: &DatabaseConnection,
) -> anyhow::Result<Vec<StatsGroupDefinition>> {
    let rows = StatsGroupRow::find_by_statement(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
            SELECT id, name, query, sub_group_fields,
                   date_restriction_field, portal_restriction_field, position
            FROM stats_group
            ORDER BY position, name
        "#
        .to_string(),
    ))
    .all(db)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| StatsGroupDefinition {
            id: row.id,
            name: row.name,
            query: row.query,
            sub_group_fields: row.sub_group_fields,
            date_restriction_field: row
                .date_restriction_field
                .filter(|f| !f.trim().is_empty()),
            portal_restriction_field: row
                .portal_restriction_field
                .filter(|f| !f.trim().is_empty()),
            position: row.position,
        })
        .collect())
}

/// Runs one rendered group query with its bound parameters.
pub async fn run_group_query(
    db: &DatabaseConnection,
    sql: &str,
    params: Vec<sea_orm::Value>,
) -> Result<Vec<QueryResult>, DbErr> {
    db.query_all(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        params,
    ))
    .await
}
