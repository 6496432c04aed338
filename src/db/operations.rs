use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<StoredValue>> {
    conn.query_row(
        "SELECT key, value, updated_at FROM kv_store WHERE key = ?1",
        [key],
        |row| {
            Ok(StoredValue {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("Failed to read key {}", key))
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, updated_at],
    )
    .with_context(|| format!("Failed to write key {}", key))?;

    Ok(())
}
