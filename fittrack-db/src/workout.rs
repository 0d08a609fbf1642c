use std::{error::Error, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use sqlx::{sqlite::SqliteRow, Row};

use fittrack_model::diary::{WorkoutEntry, WorkoutType};

use super::connection::Connection;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[mockall::automock]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    async fn store_entry(&self, entry: &WorkoutEntry) -> Result<(), Box<dyn Error + Send + Sync>>;
    async fn fetch_by_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<WorkoutEntry>, Box<dyn Error + Send + Sync>>;
    async fn delete_entry(&self, id: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub struct WorkoutRepositoryImpl {
    connection: Connection,
}

impl WorkoutRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn entry_from_row(row: &SqliteRow) -> Result<WorkoutEntry, Box<dyn Error + Send + Sync>> {
    Ok(WorkoutEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        workout_type: WorkoutType::from_str(row.try_get("workout_type")?)?,
        duration_min: row.try_get::<i64, _>("duration_min")? as u32,
        calories_burned: row.try_get::<i64, _>("calories_burned")? as u32,
        sets: row.try_get::<Option<i64>, _>("sets")?.map(|x| x as u32),
        reps: row.try_get::<Option<i64>, _>("reps")?.map(|x| x as u32),
        weight_kg: row.try_get("weight_kg")?,
        notes: row.try_get("notes")?,
        date: NaiveDate::parse_from_str(row.try_get("date")?, DATE_FORMAT)?,
        created_at: DateTime::parse_from_rfc3339(row.try_get("created_at")?)?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn store_entry(&self, entry: &WorkoutEntry) -> Result<(), Box<dyn Error + Send + Sync>> {
        debug!("Storing workout {} for {}", entry.id, entry.user_id);
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO workouts (id, user_id, name, workout_type, duration_min, \
             calories_burned, sets, reps, weight_kg, notes, date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.name)
        .bind(entry.workout_type.to_string())
        .bind(entry.duration_min as i64)
        .bind(entry.calories_burned as i64)
        .bind(entry.sets.map(|x| x as i64))
        .bind(entry.reps.map(|x| x as i64))
        .bind(entry.weight_kg)
        .bind(&entry.notes)
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
    ) -> Result<Vec<WorkoutEntry>, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM workouts WHERE user_id = ? AND date = ? ORDER BY created_at")
            .bind(user_id)
            .bind(date.format(DATE_FORMAT).to_string())
            .fetch_all(&mut *conn)
            .await?
            .iter()
            .map(entry_from_row)
            .collect()
    }

    async fn delete_entry(&self, id: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
