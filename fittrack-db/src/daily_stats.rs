use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sqlx::Row;

use fittrack_model::diary::DailyStats;

use super::connection::Connection;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[mockall::automock]
#[async_trait]
pub trait DailyStatsRepository: Send + Sync {
    /// Stats for one user-day; zeros when nothing was recorded yet.
    async fn fetch(&self, user_id: &str, date: NaiveDate) -> Result<DailyStats, Box<dyn Error + Send + Sync>>;
    /// Adds a (possibly negative) calorie delta to the running total,
    /// clamping at zero, and returns the updated stats.
    async fn add_calories(
        &self,
        user_id: &str,
        date: NaiveDate,
        delta: f64,
    ) -> Result<DailyStats, Box<dyn Error + Send + Sync>>;
    async fn set_steps(
        &self,
        user_id: &str,
        date: NaiveDate,
        steps: i64,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub struct DailyStatsRepositoryImpl {
    connection: Connection,
}

impl DailyStatsRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DailyStatsRepository for DailyStatsRepositoryImpl {
    async fn fetch(&self, user_id: &str, date: NaiveDate) -> Result<DailyStats, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        let row = sqlx::query("SELECT calories, steps FROM daily_stats WHERE user_id = ? AND date = ?")
            .bind(user_id)
            .bind(date.format(DATE_FORMAT).to_string())
            .fetch_optional(&mut *conn)
            .await?;

        Ok(match row {
            Some(row) => DailyStats {
                calories: row.try_get("calories")?,
                steps: row.try_get("steps")?,
            },
            None => DailyStats::default(),
        })
    }

    async fn add_calories(
        &self,
        user_id: &str,
        date: NaiveDate,
        delta: f64,
    ) -> Result<DailyStats, Box<dyn Error + Send + Sync>> {
        let current = self.fetch(user_id, date).await?;
        let updated = DailyStats {
            calories: (current.calories + delta).max(0.0),
            ..current
        };
        debug!(
            "Daily calories for {} on {}: {} -> {}",
            user_id, date, current.calories, updated.calories
        );

        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT OR REPLACE INTO daily_stats (user_id, date, calories, steps) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(date.format(DATE_FORMAT).to_string())
        .bind(updated.calories)
        .bind(updated.steps)
        .execute(&mut *conn)
        .await?;
        Ok(updated)
    }

    async fn set_steps(
        &self,
        user_id: &str,
        date: NaiveDate,
        steps: i64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let current = self.fetch(user_id, date).await?;
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT OR REPLACE INTO daily_stats (user_id, date, calories, steps) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(date.format(DATE_FORMAT).to_string())
        .bind(current.calories)
        .bind(steps)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
