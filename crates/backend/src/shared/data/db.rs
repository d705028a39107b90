use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Seeded group definitions for a fresh database. The shop_order and
/// shop_order_item tables belong to the shop system; this service only
/// reads them through the configured queries and never creates them.
const DEFAULT_GROUPS: [(&str, &str, &str, Option<&str>, Option<&str>); 3] = [
    (
        "Turnover",
        "SELECT [{column}] AS bucket, SUM(value_total) AS amount \
         FROM shop_order [{condition}] GROUP BY bucket",
        "",
        Some("datecreated"),
        Some("cms_portal_id"),
    ),
    (
        "Orders",
        "SELECT [{column}] AS bucket, COUNT(*) AS amount \
         FROM shop_order [{condition}] GROUP BY bucket",
        "",
        Some("datecreated"),
        Some("cms_portal_id"),
    ),
    (
        "Articles sold",
        "SELECT [{column}] AS bucket, SUM(shop_order_item.order_amount) AS amount, \
         shop_order_item.name AS article \
         FROM shop_order \
         INNER JOIN shop_order_item ON shop_order_item.shop_order_id = shop_order.id \
         [{condition}] GROUP BY bucket, article",
        "article",
        Some("shop_order.datecreated"),
        Some("shop_order.cms_portal_id"),
    ),
];

pub async fn initialize_database(db_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_path).is_absolute() {
        std::path::PathBuf::from(db_path)
    } else {
        std::env::current_dir()?.join(db_path)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;
    seed_default_groups(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Ensures the stats_group table exists (minimal schema bootstrap)
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let check_table = r#"
        SELECT name FROM sqlite_master
        WHERE type='table' AND name='stats_group';
    "#;
    let existing_table = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            check_table.to_string(),
        ))
        .await?;

    if existing_table.is_empty() {
        tracing::info!("Creating stats_group table");
        let create_stats_group_sql = r#"
            CREATE TABLE stats_group (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                query TEXT NOT NULL,
                sub_group_fields TEXT NOT NULL DEFAULT '',
                date_restriction_field TEXT,
                portal_restriction_field TEXT,
                position INTEGER NOT NULL DEFAULT 0,
                created_at TEXT
            );
        "#;
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_stats_group_sql.to_string(),
        ))
        .await?;
    }

    Ok(())
}

/// Inserts the default group definitions into an empty stats_group table.
/// A table with any rows at all is left untouched.
pub async fn seed_default_groups(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS cnt FROM stats_group;".to_string(),
        ))
        .await?;
    let count: i64 = rows
        .first()
        .map(|row| row.try_get("", "cnt").unwrap_or_default())
        .unwrap_or(0);
    if count > 0 {
        return Ok(());
    }

    tracing::info!("Seeding default stats groups");
    for (position, (name, query, sub_groups, date_field, portal_field)) in
        DEFAULT_GROUPS.into_iter().enumerate()
    {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            r#"
                INSERT INTO stats_group
                    (id, name, query, sub_group_fields,
                     date_restriction_field, portal_restriction_field,
                     position, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?);
            "#,
            vec![
                uuid::Uuid::new_v4().to_string().into(),
                name.into(),
                query.into(),
                sub_groups.into(),
                date_field.map(str::to_string).into(),
                portal_field.map(str::to_string).into(),
                (position as i32).into(),
                chrono::Utc::now().to_rfc3339().into(),
            ],
        ))
        .await?;
    }

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
