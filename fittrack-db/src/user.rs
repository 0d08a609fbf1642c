use std::{error::Error, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sqlx::{sqlite::SqliteRow, Row};

use fittrack_model::{
    goals::FitnessTarget,
    user::{ActivityLevel, Goal, Profile, Sex, User},
};

use super::connection::Connection;

#[mockall::automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn store_user(&self, user: &User) -> Result<(), Box<dyn Error + Send + Sync>>;
    async fn fetch_user(&self, uid: &str) -> Result<Option<User>, Box<dyn Error + Send + Sync>>;
    async fn update_weight(&self, uid: &str, weight_kg: f64) -> Result<(), Box<dyn Error + Send + Sync>>;
    async fn set_premium(
        &self,
        uid: &str,
        plan_id: &str,
        payment_method: &str,
        upgraded_at: DateTime<Utc>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub struct UserRepositoryImpl {
    connection: Connection,
}

impl UserRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, Box<dyn Error + Send + Sync>> {
    let profile = Profile {
        age: row.try_get::<i64, _>("age")? as u32,
        sex: Sex::from_str(row.try_get("sex")?)?,
        height_cm: row.try_get("height_cm")?,
        weight_kg: row.try_get("weight_kg")?,
        activity_level: ActivityLevel::from_str(row.try_get("activity_level")?)?,
        goal: Goal::from_str(row.try_get("goal")?)?,
    };
    let target = FitnessTarget {
        calorie_goal: row.try_get::<i64, _>("calorie_goal")? as i32,
        protein_g: row.try_get::<i64, _>("protein_g")? as i32,
        carbs_g: row.try_get::<i64, _>("carbs_g")? as i32,
        fat_g: row.try_get::<i64, _>("fat_g")? as i32,
        step_goal: row.try_get::<i64, _>("step_goal")? as u32,
    };

    Ok(User {
        uid: row.try_get("uid")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        profile,
        target,
        is_premium: row.try_get::<i64, _>("is_premium")? != 0,
        premium_plan: row.try_get("premium_plan")?,
        created_at: DateTime::parse_from_rfc3339(row.try_get("created_at")?)?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn store_user(&self, user: &User) -> Result<(), Box<dyn Error + Send + Sync>> {
        debug!("Storing user {}", user.uid);
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT OR REPLACE INTO users (uid, name, email, age, sex, height_cm, weight_kg, \
             activity_level, goal, calorie_goal, protein_g, carbs_g, fat_g, step_goal, \
             is_premium, premium_plan, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.uid)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.profile.age as i64)
        .bind(user.profile.sex.to_string())
        .bind(user.profile.height_cm)
        .bind(user.profile.weight_kg)
        .bind(user.profile.activity_level.to_string())
        .bind(user.profile.goal.to_string())
        .bind(user.target.calorie_goal as i64)
        .bind(user.target.protein_g as i64)
        .bind(user.target.carbs_g as i64)
        .bind(user.target.fat_g as i64)
        .bind(user.target.step_goal as i64)
        .bind(user.is_premium as i64)
        .bind(&user.premium_plan)
        .bind(user.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn fetch_user(&self, uid: &str) -> Result<Option<User>, Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM users WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| user_from_row(&row))
            .transpose()
    }

    async fn update_weight(&self, uid: &str, weight_kg: f64) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("UPDATE users SET weight_kg = ? WHERE uid = ?")
            .bind(weight_kg)
            .bind(uid)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn set_premium(
        &self,
        uid: &str,
        plan_id: &str,
        payment_method: &str,
        upgraded_at: DateTime<Utc>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        debug!("Marking user {} premium on plan {}", uid, plan_id);
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "UPDATE users SET is_premium = 1, premium_plan = ?, payment_method = ?, \
             upgraded_at = ? WHERE uid = ?",
        )
        .bind(plan_id)
        .bind(payment_method)
        .bind(upgraded_at.to_rfc3339())
        .bind(uid)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
