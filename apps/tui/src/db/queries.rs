use sqlx::{query, query_as, SqlitePool};
#[cfg(test)]
use sqlx::query_scalar;

use crate::db::models::BlipRecord;
use crate::rows::RadarRow;

/// Every stored row, in insertion order so sector order is reproducible.
pub async fn fetch_radar_rows(pool: &SqlitePool) -> Result<Vec<RadarRow>, sqlx::Error> {
    let records = query_as::<_, BlipRecord>(
        "SELECT id, name, quadrant, ring, description, is_new FROM blip ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(records.into_iter().map(RadarRow::from).collect())
}

#[cfg(test)]
pub async fn count_blips(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    query_scalar("SELECT COUNT(*) FROM blip")
        .fetch_one(pool)
        .await
}

/// Stores one row; returns the new row id.
pub async fn insert_blip(pool: &SqlitePool, row: &RadarRow) -> Result<i64, sqlx::Error> {
    let result = query(
        "INSERT INTO blip (name, quadrant, ring, description, is_new) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(row.name.as_deref().unwrap_or_default())
    .bind(row.sector.as_deref())
    .bind(row.ring.as_deref())
    .bind(row.description.as_deref())
    .bind(row.is_new.unwrap_or(false))
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::setup_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Result<SqlitePool, sqlx::Error> {
        // A single connection keeps the in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        setup_database(&pool).await?;
        Ok(pool)
    }

    #[tokio::test]
    async fn test_rows_round_trip_in_insertion_order() -> Result<(), Box<dyn std::error::Error>> {
        let pool = setup_test_db().await?;

        let mut rust = RadarRow::new("Rust", "Languages", "Adopt");
        rust.is_new = Some(true);
        rust.description = Some("Systems language".to_string());
        insert_blip(&pool, &rust).await?;
        insert_blip(&pool, &RadarRow::new("Cargo", "Tools", "Trial")).await?;

        let rows = fetch_radar_rows(&pool).await?;
        assert_eq!(count_blips(&pool).await?, 2);
        assert_eq!(rows[0], rust);
        assert_eq!(rows[1].name.as_deref(), Some("Cargo"));
        assert_eq!(rows[1].sector.as_deref(), Some("Tools"));
        assert_eq!(rows[1].is_new, Some(false));
        assert_eq!(rows[1].description, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_setup_adds_missing_is_new_column() -> Result<(), Box<dyn std::error::Error>> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        query(
            "CREATE TABLE blip (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                ring TEXT,
                quadrant TEXT,
                description TEXT
            )",
        )
        .execute(&pool)
        .await?;
        query("INSERT INTO blip (name, ring, quadrant) VALUES ('Legacy', 'hold', 'tools')")
            .execute(&pool)
            .await?;

        setup_database(&pool).await?;

        let rows = fetch_radar_rows(&pool).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].is_new, Some(false));
        assert_eq!(rows[0].ring.as_deref(), Some("hold"));

        Ok(())
    }
}
