use sqlx::{
    migrate::MigrateDatabase, query, query_scalar, sqlite::SqlitePoolOptions, Sqlite, SqlitePool,
};

/// Creates the `blip` table if it doesn't exist and adds columns that
/// older databases lack.
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS blip (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            ring TEXT,
            quadrant TEXT,
            description TEXT,
            is_new BOOLEAN NOT NULL DEFAULT FALSE
        )",
    )
    .execute(pool)
    .await?;

    ensure_column_exists(
        pool,
        "blip",
        "is_new",
        "ALTER TABLE blip ADD COLUMN is_new BOOLEAN NOT NULL DEFAULT FALSE",
    )
    .await?;

    Ok(())
}

async fn ensure_column_exists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    alter_statement: &str,
) -> Result<(), sqlx::Error> {
    let count: i64 = query_scalar(&format!(
        "SELECT COUNT(*) FROM pragma_table_info('{table}') WHERE name = ?",
    ))
    .bind(column)
    .fetch_one(pool)
    .await?;

    if count == 0 {
        tracing::info!(table, column, "adding missing column");
        query(alter_statement).execute(pool).await?;
    }

    Ok(())
}

/// Opens (creating if needed) the SQLite database at `database_url`.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!(%database_url, "database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    setup_database(&pool).await?;
    tracing::debug!(%database_url, "database ready");
    Ok(pool)
}
