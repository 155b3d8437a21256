//! 水位存储服务 - 业务能力层
//!
//! SQLite 中的 `orders` 表只追加不修改，每成功写出一个 XML 文件追加一行。
//! 某店铺的"当前水位"取该店铺 `order_id` 的最大值。
//!
//! 被跳过的订单追加到 `skipped_orders` 表。尚未写出的跳过订单中 id 最小的一个
//! 决定下次运行的起始位置，保证它会被重新处理。

use crate::error::StorageError;
use crate::models::{JobType, WatermarkRecord};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// 水位存储
pub struct WatermarkStore {
    pool: SqlitePool,
}

impl WatermarkStore {
    /// 打开（必要时创建）数据库文件并建表
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        let path_str = path.display().to_string();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::OpenFailed {
                    path: path_str.clone(),
                    source: sqlx::Error::Io(e),
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::OpenFailed {
                path: path_str.clone(),
                source: e,
            })?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("✓ 水位数据库已打开: {}", path_str);
        Ok(store)
    }

    /// 内存数据库（用于测试）
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
            StorageError::OpenFailed {
                path: ":memory:".to_string(),
                source: e,
            }
        })?;

        // 内存库每个连接各自独立，只能用一个连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::OpenFailed {
                path: ":memory:".to_string(),
                source: e,
            })?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL,
                xml_file_created DATETIME NOT NULL,
                website TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skipped_orders(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL,
                skipped_at DATETIME NOT NULL,
                website TEXT NOT NULL,
                reason TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 某店铺最近处理到的订单 id
    ///
    /// 没有记录时返回 `None`，由调用方使用配置的默认值。
    pub async fn last_processed(&self, job_type: JobType) -> Result<Option<i64>, StorageError> {
        let last: Option<i64> =
            sqlx::query_scalar("SELECT MAX(order_id) FROM orders WHERE website = ?")
                .bind(job_type.website())
                .fetch_one(&self.pool)
                .await?;

        debug!("店铺 {} 当前水位: {:?}", job_type, last);
        Ok(last)
    }

    /// 追加一条水位记录
    pub async fn record(
        &self,
        order_id: i64,
        job_type: JobType,
        created_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO orders(order_id, xml_file_created, website) VALUES (?, ?, ?)")
            .bind(order_id)
            .bind(created_at)
            .bind(job_type.website())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 追加一条跳过记录
    pub async fn record_skip(
        &self,
        order_id: i64,
        job_type: JobType,
        skipped_at: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO skipped_orders(order_id, skipped_at, website, reason) VALUES (?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(skipped_at)
        .bind(job_type.website())
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 被跳过且之后没有写出过的最小订单 id
    pub async fn lowest_pending_skip(&self, job_type: JobType) -> Result<Option<i64>, StorageError> {
        let lowest: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT MIN(s.order_id) FROM skipped_orders s
            WHERE s.website = ?
              AND NOT EXISTS (
                  SELECT 1 FROM orders o
                  WHERE o.website = s.website AND o.order_id = s.order_id
              )
            "#,
        )
        .bind(job_type.website())
        .fetch_one(&self.pool)
        .await?;

        debug!("店铺 {} 待重试的最小订单: {:?}", job_type, lowest);
        Ok(lowest)
    }

    /// 某店铺 id 不小于 `min_id` 且已写出的订单
    pub async fn written_since(
        &self,
        job_type: JobType,
        min_id: i64,
    ) -> Result<HashSet<i64>, StorageError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT order_id FROM orders WHERE website = ? AND order_id >= ?",
        )
        .bind(job_type.website())
        .bind(min_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    /// 某店铺的全部记录，按写入顺序
    pub async fn records(&self, job_type: JobType) -> Result<Vec<WatermarkRecord>, StorageError> {
        let rows = sqlx::query_as::<_, WatermarkRecord>(
            "SELECT order_id, xml_file_created, website FROM orders WHERE website = ? ORDER BY id",
        )
        .bind(job_type.website())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
