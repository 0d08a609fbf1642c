use std::{env, error::Error, sync::Arc};

use dotenv::dotenv;
use sqlx::{Connection as SqlxConnection, Executor, SqliteConnection};
use tokio::sync::{Mutex, MutexGuard};

const SETUP_QUERY: &str = "PRAGMA mmap_size = 30000000000;
PRAGMA cache_size = -1000;
PRAGMA page_size = 4096;
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;";

const SCHEMA_QUERY: &str = "CREATE TABLE IF NOT EXISTS users (
    uid TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    age INTEGER NOT NULL,
    sex TEXT NOT NULL,
    height_cm REAL NOT NULL,
    weight_kg REAL NOT NULL,
    activity_level TEXT NOT NULL,
    goal TEXT NOT NULL,
    calorie_goal INTEGER NOT NULL,
    protein_g INTEGER NOT NULL,
    carbs_g INTEGER NOT NULL,
    fat_g INTEGER NOT NULL,
    step_goal INTEGER NOT NULL,
    is_premium INTEGER NOT NULL DEFAULT 0,
    premium_plan TEXT,
    payment_method TEXT,
    upgraded_at TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS food_log (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    meal_type TEXT NOT NULL,
    amount_g REAL NOT NULL,
    calories REAL NOT NULL,
    protein_g REAL NOT NULL,
    carbs_g REAL NOT NULL,
    fat_g REAL NOT NULL,
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS food_log_user_date ON food_log (user_id, date);
CREATE TABLE IF NOT EXISTS workouts (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    workout_type TEXT NOT NULL,
    duration_min INTEGER NOT NULL,
    calories_burned INTEGER NOT NULL,
    sets INTEGER,
    reps INTEGER,
    weight_kg REAL,
    notes TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS workouts_user_date ON workouts (user_id, date);
CREATE TABLE IF NOT EXISTS weight_history (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    weight_kg REAL NOT NULL,
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS weight_history_user ON weight_history (user_id, date);
CREATE TABLE IF NOT EXISTS daily_stats (
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,
    calories REAL NOT NULL DEFAULT 0,
    steps INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (user_id, date)
);";

#[derive(Clone)]
pub struct Connection {
    inner: Arc<Mutex<SqliteConnection>>,
}

impl Connection {
    pub async fn establish() -> Result<Self, Box<dyn Error>> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        Self::establish_with_url(&database_url).await
    }

    pub async fn establish_with_url(database_url: &str) -> Result<Self, Box<dyn Error>> {
        let mut connection = SqliteConnection::connect(database_url).await?;

        connection.execute(SETUP_QUERY).await?;
        connection.execute(SCHEMA_QUERY).await?;

        Ok(Self {
            inner: Arc::new(Mutex::new(connection)),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.inner.lock().await
    }
}
