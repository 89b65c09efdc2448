//! SQLite storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civic_types::{
    Coordinates, Report, ReportId, ReportStatus, StatusFilter, StatusUpdate, Statistics,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

const SELECT_REPORT: &str = "SELECT id, address, comment, photo, contact_email, status, \
     rejection_reason, created_at, lat, lng FROM reports";

/// SQLite-backed storage
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database and initialize schema
    pub async fn new(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let storage = Self { pool };
        storage.initialize_schema().await?;
        Ok(storage)
    }

    async fn initialize_schema(&self) -> Result<(), StorageError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                address TEXT NOT NULL,
                comment TEXT NOT NULL,
                photo TEXT NOT NULL,
                contact_email TEXT,
                status TEXT NOT NULL DEFAULT 'Pending',
                rejection_reason TEXT,
                created_at TEXT NOT NULL,
                lat REAL,
                lng REAL
            );
            "#,
            r#"CREATE INDEX IF NOT EXISTS reports_status ON reports(status);"#,
            r#"CREATE INDEX IF NOT EXISTS reports_created_at ON reports(created_at DESC);"#,
        ];

        for stmt in statements {
            sqlx::query(stmt).execute(&self.pool).await?;
        }

        Ok(())
    }

    fn parse_status(raw: &str) -> Result<ReportStatus, StorageError> {
        ReportStatus::from_str(raw).map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    fn row_to_report(row: &SqliteRow) -> Result<Report, StorageError> {
        let id: i64 = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let lat: Option<f64> = row.try_get("lat")?;
        let lng: Option<f64> = row.try_get("lng")?;

        Ok(Report {
            id: ReportId::new(id.to_string()),
            address: row.try_get("address")?,
            comment: row.try_get("comment")?,
            photo: row.try_get("photo")?,
            contact_email: row.try_get("contact_email")?,
            status: Self::parse_status(&status)?,
            rejection_reason: row.try_get("rejection_reason")?,
            created_at,
            coordinates: lat.zip(lng).map(|(lat, lng)| Coordinates { lat, lng }),
        })
    }

    /// Non-numeric ids can never match a row
    fn row_id(id: &ReportId) -> Option<i64> {
        id.as_str().parse().ok()
    }
}

#[async_trait]
impl ReportStorage for SqliteStorage {
    async fn insert_report(&self, report: NewStoredReport) -> StorageResult<Report> {
        let created_at = Utc::now();
        let (lat, lng) = match report.coordinates {
            Some(c) => (Some(c.lat), Some(c.lng)),
            None => (None, None),
        };

        let result = sqlx::query(
            "INSERT INTO reports (address, comment, photo, contact_email, status, created_at, lat, lng) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&report.address)
        .bind(&report.comment)
        .bind(&report.photo)
        .bind(&report.contact_email)
        .bind(ReportStatus::Pending.as_str())
        .bind(created_at)
        .bind(lat)
        .bind(lng)
        .execute(&self.pool)
        .await?;

        Ok(Report {
            id: ReportId::new(result.last_insert_rowid().to_string()),
            address: report.address,
            comment: report.comment,
            photo: report.photo,
            contact_email: report.contact_email,
            status: ReportStatus::Pending,
            rejection_reason: None,
            created_at,
            coordinates: report.coordinates,
        })
    }

    async fn list_reports(&self, filter: StatusFilter) -> StorageResult<Vec<Report>> {
        let rows = match filter {
            StatusFilter::All => {
                sqlx::query(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_REPORT))
                    .fetch_all(&self.pool)
                    .await?
            }
            StatusFilter::Only(status) => {
                sqlx::query(&format!(
                    "{} WHERE status = ? ORDER BY created_at DESC, id DESC",
                    SELECT_REPORT
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(Self::row_to_report).collect()
    }

    async fn get_report(&self, id: &ReportId) -> StorageResult<Option<Report>> {
        let Some(row_id) = Self::row_id(id) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_REPORT))
            .bind(row_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_report).transpose()
    }

    async fn update_status(&self, id: &ReportId, update: &StatusUpdate) -> StorageResult<bool> {
        let Some(row_id) = Self::row_id(id) else {
            return Ok(false);
        };

        let result = sqlx::query("UPDATE reports SET status = ?, rejection_reason = ? WHERE id = ?")
            .bind(update.status.as_str())
            .bind(&update.rejection_reason)
            .bind(row_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn statistics(&self) -> StorageResult<Statistics> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS n FROM reports GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        let mut stats = Statistics::default();
        for row in rows {
            let status: String = row.try_get("status")?;
            let count: i64 = row.try_get("n")?;
            stats.record(Self::parse_status(&status)?, count as u64);
        }
        Ok(stats)
    }
}
