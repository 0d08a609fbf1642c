use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use fittrack_model::diary::WeightEntry;

use super::connection::Connection;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[mockall::automock]
#[async_trait]
pub trait WeightRepository: Send + Sync {
    async fn store_entry(&self, entry: &WeightEntry) -> Result<(), Box<dyn Error + Send + Sync>>;
    async fn fetch_history(&self, user_id: &str) -> Result<Vec<WeightEntry>, Box<dyn Error + Send + Sync>>;
}

pub struct WeightRepositoryImpl {
    connection: Connection,
}

impl WeightRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn entry_from_row(row: &SqliteRow) -> Result<WeightEntry, Box<dyn Error + Send + Sync>> {
    Ok(WeightEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        weight_kg: row.try_get("weight_kg")?,
        date: NaiveDate::parse_from_str(row.try_get("date")?, DATE_FORMAT)?,
        created_at: DateTime::parse_from_rfc3339(row.try_get("created_at")?)?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl WeightRepository for WeightRepositoryImpl {
    async fn store_entry(&self, entry: &WeightEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO weight_history (id, user_id, weight_kg, date, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(entry.weight_kg)
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(entry.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn fetch_history(&self, user_id: &str) -> Result<Vec<WeightEntry>, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM weight_history WHERE user_id = ? ORDER BY date, created_at",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(entry_from_row)
        .collect()
    }
}
