use axum::extract::Query;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use contracts::stats::{StatsGroupSummary, StatsTableRequest, StatsTableResponse};

use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::shared::i18n::{Labels, Language};
use crate::stats::{csv_export, repository, service};

fn configured_language() -> Language {
    Language::from_code(&config::get_config().locale.language)
}

/// GET /api/stats/table
pub async fn get_table(
    Query(request): Query<StatsTableRequest>,
) -> Result<Json<StatsTableResponse>, axum::http::StatusCode> {
    let labels = Labels::for_language(configured_language());
    let response = service::evaluate(get_connection(), &request, &labels)
        .await
        .map_err(|e| {
            tracing::error!("Failed to evaluate stats table: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;

    tracing::info!(
        "Stats table: {} groups, {} columns, {} warnings",
        response.table.groups.len(),
        response.table.column_names.len(),
        response.warnings.len()
    );
    Ok(Json(response))
}

/// GET /api/stats/table/csv
pub async fn export_csv(
    Query(request): Query<StatsTableRequest>,
) -> Result<impl IntoResponse, axum::http::StatusCode> {
    let language = configured_language();
    let labels = Labels::for_language(language);
    let response = service::evaluate(get_connection(), &request, &labels)
        .await
        .map_err(|e| {
            tracing::error!("Failed to evaluate stats table for export: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let rows = csv_export::table_rows(&response.table, &labels, language);
    let bytes = csv_export::write_csv(&rows).map_err(|e| {
        tracing::error!("Failed to write CSV export: {}", e);
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let disposition = format!(
        "attachment; filename=\"stats-{}.csv\"",
        chrono::Utc::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// GET /api/stats/groups
pub async fn list_groups() -> Result<Json<Vec<StatsGroupSummary>>, axum::http::StatusCode> {
    let definitions = repository::load_group_definitions(get_connection())
        .await
        .map_err(|e| {
            tracing::error!("Failed to load stats groups: {}", e);
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(definitions.iter().map(StatsGroupSummary::from).collect()))
}
