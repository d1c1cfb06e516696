use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::infra::sqlite::schema::open_connection;

pub fn kv_get(db_path: &Path, key: &str) -> Result<Option<String>> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
        row.get::<_, String>(0)
    })
    .optional()
    .with_context(|| format!("failed to read session key {key}"))
}

pub fn kv_set(db_path: &Path, key: &str, value: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO kv(key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )
    .with_context(|| format!("failed to write session key {key}"))?;
    Ok(())
}

pub fn kv_remove(db_path: &Path, key: &str) -> Result<()> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])
        .with_context(|| format!("failed to remove session key {key}"))?;
    Ok(())
}

pub fn kv_clear(db_path: &Path) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start session clear transaction")?;
    tx.execute("DELETE FROM kv", [])
        .context("failed to clear session keys")?;
    tx.commit().context("failed to commit session clear")?;
    Ok(())
}
