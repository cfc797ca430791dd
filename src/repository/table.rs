//! Database table operations and implementations.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::model::SentLinkModel;
use crate::model::SubscriberModel;
use crate::repository::error::DatabaseError;

/// Base table struct providing database pool access.
#[derive(Clone)]
pub struct BaseTable {
    pub pool: SqlitePool,
}

impl BaseTable {
    /// Creates a new base table with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Base trait for table operations.
#[async_trait::async_trait]
pub trait TableBase {
    /// Creates the table if it doesn't exist.
    async fn create_table(&self) -> Result<(), DatabaseError>;
    /// Drops the table.
    async fn drop_table(&self) -> Result<(), DatabaseError>;
    /// Deletes all rows from the table.
    async fn delete_all(&self) -> Result<(), DatabaseError>;
}

// ============================================================================
// SubscriberTable
// ============================================================================

pub struct SubscriberTable {
    base: BaseTable,
}

impl SubscriberTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Inserts a new active subscriber and returns its row id.
    pub async fn insert(&self, chat_id: &str) -> Result<i64, DatabaseError> {
        let res = sqlx::query(
            "INSERT INTO subscribers (chat_id, is_active, created_at) VALUES (?, TRUE, ?)",
        )
        .bind(chat_id)
        .bind(Utc::now())
        .execute(&self.base.pool)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn select_by_chat_id(
        &self,
        chat_id: &str,
    ) -> Result<Option<SubscriberModel>, DatabaseError> {
        Ok(sqlx::query_as::<_, SubscriberModel>(
            "SELECT * FROM subscribers WHERE chat_id = ? LIMIT 1",
        )
        .bind(chat_id)
        .fetch_optional(&self.base.pool)
        .await?)
    }

    pub async fn select_all(&self) -> Result<Vec<SubscriberModel>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, SubscriberModel>("SELECT * FROM subscribers")
                .fetch_all(&self.base.pool)
                .await?,
        )
    }

    /// Chat ids of every active subscriber, the snapshot a scan works from.
    pub async fn select_active_chat_ids(&self) -> Result<Vec<String>, DatabaseError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT chat_id FROM subscribers WHERE is_active = TRUE",
        )
        .fetch_all(&self.base.pool)
        .await?)
    }

    /// Activates or deactivates a subscriber with a single statement.
    pub async fn set_active(&self, chat_id: &str, is_active: bool) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE subscribers SET is_active = ? WHERE chat_id = ?")
            .bind(is_active)
            .bind(chat_id)
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TableBase for SubscriberTable {
    async fn create_table(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS subscribers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id TEXT NOT NULL UNIQUE,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.base.pool)
        .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), DatabaseError> {
        sqlx::query("DROP TABLE IF EXISTS subscribers")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM subscribers")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// SentLinkTable
// ============================================================================

pub struct SentLinkTable {
    base: BaseTable,
}

impl SentLinkTable {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseTable::new(pool),
        }
    }

    /// Records a delivered link unless it is already recorded.
    ///
    /// Returns `true` when the row was inserted, `false` when the
    /// (chat_id, link) pair already existed. The unique index makes this a
    /// single atomic check-and-set, which is what keeps delivery at-most-once
    /// even if two notifications for the same pair ever race.
    pub async fn append_if_missing(
        &self,
        chat_id: &str,
        link: &str,
    ) -> Result<bool, DatabaseError> {
        let res = sqlx::query(
            r#"
            INSERT INTO sent_links (chat_id, link, sent_at)
            VALUES (?, ?, ?)
            ON CONFLICT(chat_id, link) DO NOTHING
            "#,
        )
        .bind(chat_id)
        .bind(link)
        .bind(Utc::now())
        .execute(&self.base.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn exists(&self, chat_id: &str, link: &str) -> Result<bool, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sent_links WHERE chat_id = ? AND link = ?",
        )
        .bind(chat_id)
        .bind(link)
        .fetch_one(&self.base.pool)
        .await?;
        Ok(count > 0)
    }

    /// Delivered links for one subscriber, in delivery order.
    pub async fn select_links_by_chat_id(
        &self,
        chat_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT link FROM sent_links WHERE chat_id = ? ORDER BY id",
        )
        .bind(chat_id)
        .fetch_all(&self.base.pool)
        .await?)
    }

    pub async fn select_all(&self) -> Result<Vec<SentLinkModel>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, SentLinkModel>("SELECT * FROM sent_links ORDER BY id")
                .fetch_all(&self.base.pool)
                .await?,
        )
    }
}

#[async_trait::async_trait]
impl TableBase for SentLinkTable {
    async fn create_table(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS sent_links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id TEXT NOT NULL,
                link TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                UNIQUE(chat_id, link),
                FOREIGN KEY (chat_id) REFERENCES subscribers(chat_id)
                    ON DELETE CASCADE
                    ON UPDATE CASCADE
            )"#,
        )
        .execute(&self.base.pool)
        .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), DatabaseError> {
        sqlx::query("DROP TABLE IF EXISTS sent_links")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM sent_links")
            .execute(&self.base.pool)
            .await?;
        Ok(())
    }
}
