use std::{error::Error, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sqlx::{sqlite::SqliteRow, Row};

use fittrack_model::diary::{FoodEntry, MealType};

use super::connection::Connection;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[mockall::automock]
#[async_trait]
pub trait FoodLogRepository: Send + Sync {
    async fn store_entry(&self, entry: &FoodEntry) -> Result<(), Box<dyn Error + Send + Sync>>;
    async fn fetch_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntry>, Box<dyn Error + Send + Sync>>;
    /// Deletes an entry and returns it, so the caller can reverse its
    /// calories in the daily stats. None when no such entry exists.
    async fn delete_entry(&self, id: &str) -> Result<Option<FoodEntry>, Box<dyn Error + Send + Sync>>;
}

pub struct FoodLogRepositoryImpl {
    connection: Connection,
}

impl FoodLogRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn entry_from_row(row: &SqliteRow) -> Result<FoodEntry, Box<dyn Error + Send + Sync>> {
    Ok(FoodEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        meal_type: MealType::from_str(row.try_get("meal_type")?)?,
        amount_g: row.try_get("amount_g")?,
        calories: row.try_get("calories")?,
        protein_g: row.try_get("protein_g")?,
        carbs_g: row.try_get("carbs_g")?,
        fat_g: row.try_get("fat_g")?,
        date: NaiveDate::parse_from_str(row.try_get("date")?, DATE_FORMAT)?,
        created_at: DateTime::parse_from_rfc3339(row.try_get("created_at")?)?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl FoodLogRepository for FoodLogRepositoryImpl {
    async fn store_entry(&self, entry: &FoodEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        debug!("Storing food entry {} for {}", entry.id, entry.user_id);
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO food_log (id, user_id, name, meal_type, amount_g, calories, \
             protein_g, carbs_g, fat_g, date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.name)
        .bind(entry.meal_type.to_string())
        .bind(entry.amount_g)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .bind(entry.date.format(DATE_FORMAT).to_string())
        .bind(entry.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn fetch_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntry>, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM food_log WHERE user_id = ? AND date = ? ORDER BY created_at")
            .bind(user_id)
            .bind(date.format(DATE_FORMAT).to_string())
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(entry_from_row)
            .collect()
    }

    async fn delete_entry(&self, id: &str) -> Result<Option<FoodEntry>, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        let entry = sqlx::query("SELECT * FROM food_log WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| entry_from_row(&row))
            .transpose()?;

        if entry.is_some() {
            sqlx::query("DELETE FROM food_log WHERE id = ?")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(entry)
    }
}
