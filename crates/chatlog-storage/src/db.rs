//! Database operations

use std::path::Path;

use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

use crate::{Result, StorageError};

/// Read-only view of the crawler database's `channel` table
pub struct ChannelStore {
    pool: SqlitePool,
}

impl ChannelStore {
    /// Open an existing database. The file is never created.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if !db_path.is_file() {
            return Err(StorageError::DatabaseNotFound(db_path.to_path_buf()));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %db_path.display(), "Channel database opened");
        Ok(Self { pool })
    }

    /// Every row of `channel`, each column mapped to its JSON equivalent
    pub async fn export_channels(&self) -> Result<Vec<Map<String, Value>>> {
        let rows = sqlx::query("SELECT * FROM channel;")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_json).collect()
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn row_to_json(row: &SqliteRow) -> Result<Map<String, Value>> {
    let mut object = Map::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;
        let type_name = if raw.is_null() {
            "NULL".to_string()
        } else {
            raw.type_info().name().to_uppercase()
        };

        let value = match type_name.as_str() {
            "NULL" => Value::Null,
            "INTEGER" | "INT" | "BIGINT" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(index)?),
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => Value::from(row.try_get::<f64, _>(index)?),
            "BLOB" => {
                let bytes: Vec<u8> = row.try_get(index)?;
                Value::from(String::from_utf8_lossy(&bytes).into_owned())
            }
            _ => Value::from(row.try_get::<String, _>(index)?),
        };

        object.insert(column.name().to_string(), value);
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seed(path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE channel (
                channelId TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                follower INTEGER NOT NULL,
                image TEXT
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO channel VALUES
                ('c1', '스트리머', 1500, NULL),
                ('c2', 'other', 20, 'https://example.com/a.png')",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool.close().await;
    }

    #[tokio::test]
    async fn test_missing_database() {
        let dir = TempDir::new().unwrap();
        let result = ChannelStore::open(&dir.path().join("sqlite.db")).await;
        assert!(matches!(result, Err(StorageError::DatabaseNotFound(_))));
        assert!(!dir.path().join("sqlite.db").exists());
    }

    #[tokio::test]
    async fn test_export_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sqlite.db");
        seed(&path).await;

        let store = ChannelStore::open(&path).await.unwrap();
        let rows = store.export_channels().await.unwrap();
        store.close().await;

        assert_eq!(rows.len(), 2);
        let first = rows.iter().find(|r| r["channelId"] == "c1").unwrap();
        assert_eq!(first["name"], "스트리머");
        assert_eq!(first["follower"], 1500);
        assert_eq!(first["image"], Value::Null);

        let second = rows.iter().find(|r| r["channelId"] == "c2").unwrap();
        assert_eq!(second["image"], "https://example.com/a.png");
    }
}
