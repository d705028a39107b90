use contracts::stats::{
    EvaluationWarning, StatsGroup, StatsTable, StatsTableRequest, StatsTableResponse, WarningKind,
};
use sea_orm::{DatabaseConnection, QueryResult};

use crate::shared::i18n::Labels;
use crate::stats::{query, repository};

/// Result field carrying the date-bucket label
pub const BUCKET_FIELD: &str = "bucket";
/// Result field carrying the aggregated value
pub const AMOUNT_FIELD: &str = "amount";

#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("query execution failed: {0}")]
    QueryExecution(#[from] sea_orm::DbErr),
    #[error("row {index} is missing required field `{field}`")]
    MalformedRow { index: usize, field: &'static str },
}

/// Runs every configured group against the store and merges the results
/// into a fresh table snapshot.
///
/// Group failures never abort the run: a failing query skips the group,
/// a malformed row stops that group's remaining ingestion. Both are
/// logged and reported back as warnings.
pub async fn evaluate(
    db: &DatabaseConnection,
    request: &StatsTableRequest,
    labels: &Labels,
) -> anyhow::Result<StatsTableResponse> {
    let definitions = repository::load_group_definitions(db).await?;

    let mut groups: Vec<StatsGroup> = Vec::new();
    let mut warnings: Vec<EvaluationWarning> = Vec::new();

    for definition in &definitions {
        let filter = query::build_filter(
            definition,
            request.date_from.as_deref(),
            request.date_to.as_deref(),
            request.portal_id.as_deref(),
        );
        let sql = query::render_template(&definition.query, request.grouping, &filter);
        let sub_group_fields = definition.sub_group_field_list();

        let rows = match repository::run_group_query(db, &sql, filter.params).await {
            Ok(rows) => rows,
            Err(err) => {
                let error = GroupError::from(err);
                tracing::error!("Stats group `{}` skipped: {}", definition.name, error);
                warnings.push(EvaluationWarning {
                    group: definition.name.clone(),
                    kind: WarningKind::QueryExecution,
                    message: error.to_string(),
                });
                continue;
            }
        };

        // The group node exists even when its query returned no rows
        let group = find_or_create_group(&mut groups, &definition.name);
        if let Err(error) = ingest_rows(group, &rows, &sub_group_fields, labels) {
            tracing::warn!("Stats group `{}` truncated: {}", definition.name, error);
            warnings.push(EvaluationWarning {
                group: definition.name.clone(),
                kind: WarningKind::MalformedRow,
                message: error.to_string(),
            });
        }
    }

    Ok(StatsTableResponse {
        table: StatsTable::from_groups(groups, request.show_diff),
        warnings,
    })
}

/// Groups sharing a name merge into one node.
fn find_or_create_group<'a>(groups: &'a mut Vec<StatsGroup>, name: &str) -> &'a mut StatsGroup {
    let index = match groups.iter().position(|g| g.title == name) {
        Some(index) => index,
        None => {
            groups.push(StatsGroup::new(name));
            groups.len() - 1
        }
    };
    &mut groups[index]
}

/// Merges result rows into the group tree. Stops at the first row that
/// lacks the bucket or amount field; rows before it stay merged.
fn ingest_rows(
    group: &mut StatsGroup,
    rows: &[QueryResult],
    sub_group_fields: &[String],
    labels: &Labels,
) -> Result<(), GroupError> {
    for (index, row) in rows.iter().enumerate() {
        let bucket = text_value(row, BUCKET_FIELD).ok_or(GroupError::MalformedRow {
            index,
            field: BUCKET_FIELD,
        })?;
        let amount = numeric_value(row, AMOUNT_FIELD).ok_or(GroupError::MalformedRow {
            index,
            field: AMOUNT_FIELD,
        })?;

        let path: Vec<String> = sub_group_fields
            .iter()
            .map(|field| match text_value(row, field) {
                Some(label) if !label.trim().is_empty() => label,
                _ => labels.unassigned.to_string(),
            })
            .collect();

        group.add_row(&path, &bucket, amount);
    }
    Ok(())
}

/// Reads a result field as text, accepting numeric buckets and labels
/// as produced by expressions like the bare-year strftime.
fn text_value(row: &QueryResult, field: &str) -> Option<String> {
    if let Ok(Some(value)) = row.try_get::<Option<String>>("", field) {
        return Some(value);
    }
    if let Ok(Some(value)) = row.try_get::<Option<i64>>("", field) {
        return Some(value.to_string());
    }
    if let Ok(Some(value)) = row.try_get::<Option<f64>>("", field) {
        return Some(value.to_string());
    }
    None
}

/// Reads a result field as f64. SQL NULL (a SUM over zero rows) counts
/// as 0.0; a missing or non-numeric field reads as None.
fn numeric_value(row: &QueryResult, field: &str) -> Option<f64> {
    if let Ok(value) = row.try_get::<Option<f64>>("", field) {
        return Some(value.unwrap_or(0.0));
    }
    if let Ok(value) = row.try_get::<Option<i64>>("", field) {
        return Some(value.map(|v| v as f64).unwrap_or(0.0));
    }
    None
}
