use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{
    Row,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};
use tokio::sync::Mutex;

use crate::config::ProcessScore;
use crate::domain::{DetectedTag, JournalEntry};
use crate::utils::{TimeUtils, format_date};

/// Abstract interface for journal persistence. Last-write-wins per id,
/// no transactional guarantees beyond that.
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<JournalEntry>>;
    async fn put(&self, entry: &JournalEntry) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}

// --- SQLITE IMPLEMENTATION ---

pub struct SqliteJournalStore {
    pool: SqlitePool,
}

impl SqliteJournalStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(2) // Low connection count, journals are low throughput
            .connect_with(connection_options)
            .await
            .context("Failed to connect to journal db")?;

        let store = Self { pool };
        store.initialize().await?;

        Ok(store)
    }
}

#[async_trait]
impl JournalStore for SqliteJournalStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                entry_date TEXT NOT NULL,
                content TEXT NOT NULL,
                trade_ids TEXT NOT NULL,
                detected_tags TEXT NOT NULL,
                process_score INTEGER
            );",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create entries table")?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT id, entry_date, content, trade_ids, detected_tags, process_score
             FROM entries
             ORDER BY entry_date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let date_str: String = row.get("entry_date");
            let date =
                NaiveDate::parse_from_str(&date_str, TimeUtils::STANDARD_DATE_FORMAT)
                    .with_context(|| format!("bad entry_date '{date_str}'"))?;

            // Computed columns degrade to empty rather than failing the
            // whole load: they are recomputable from content.
            let trade_ids: Vec<String> =
                serde_json::from_str(row.get::<&str, _>("trade_ids")).unwrap_or_default();
            let detected_tags: Vec<DetectedTag> =
                serde_json::from_str(row.get::<&str, _>("detected_tags")).unwrap_or_default();
            let process_score = row
                .get::<Option<i64>, _>("process_score")
                .map(|v| ProcessScore::new(v.clamp(0, 100) as u8));

            entries.push(JournalEntry {
                id: row.get("id"),
                date,
                content: row.get("content"),
                trade_ids,
                detected_tags,
                process_score,
            });
        }

        Ok(entries)
    }

    async fn put(&self, entry: &JournalEntry) -> Result<()> {
        let trade_ids = serde_json::to_string(&entry.trade_ids)?;
        let detected_tags = serde_json::to_string(&entry.detected_tags)?;

        sqlx::query(
            "INSERT OR REPLACE INTO entries
             (id, entry_date, content, trade_ids, detected_tags, process_score)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(format_date(entry.date))
        .bind(&entry.content)
        .bind(trade_ids)
        .bind(detected_tags)
        .bind(entry.process_score.map(|s| i64::from(s.value())))
        .execute(&self.pool)
        .await
        .context("Failed to upsert journal entry")?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete journal entry")?;

        Ok(())
    }
}

// --- IN-MEMORY IMPLEMENTATION ---

/// Keyed map behind a mutex. The swap-in store for tests and for callers
/// that do not want a database on disk.
#[derive(Default)]
pub struct MemoryJournalStore {
    entries: Mutex<HashMap<String, JournalEntry>>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalStore for MemoryJournalStore {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<JournalEntry>> {
        let guard = self.entries.lock().await;
        let mut all: Vec<JournalEntry> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(all)
    }

    async fn put(&self, entry: &JournalEntry) -> Result<()> {
        let mut guard = self.entries.lock().await;
        guard.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.entries.lock().await;
        guard.remove(id);
        Ok(())
    }
}
