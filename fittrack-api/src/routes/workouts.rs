use actix_web::{delete, error, get, post, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use fittrack_db::workout::{WorkoutRepository, WorkoutRepositoryImpl};
use fittrack_model::diary::{WorkoutEntry, WorkoutType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWorkoutRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(rename = "duration")]
    pub duration_min: u32,
    pub calories_burned: u32,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(rename = "weight", default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[post("/users/{uid}/workouts")]
pub async fn log_workout(
    workouts: web::Data<WorkoutRepositoryImpl>,
    path: web::Path<String>,
    body: web::Json<LogWorkoutRequest>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let body = body.into_inner();
    let now = Utc::now();

    // Set/rep/weight details only make sense for strength work; the log
    // form only attached them there.
    let (sets, reps, weight_kg) = match body.workout_type {
        WorkoutType::Strength => (body.sets, body.reps, body.weight_kg),
        _ => (None, None, None),
    };

    let entry = WorkoutEntry {
        id: Uuid::new_v4().to_string(),
        user_id: uid.clone(),
        name: body.name,
        workout_type: body.workout_type,
        duration_min: body.duration_min,
        calories_burned: body.calories_burned,
        sets,
        reps,
        weight_kg,
        notes: body.notes,
        date: now.date_naive(),
        created_at: now,
    };

    workouts
        .store_entry(&entry)
        .await
        .map_err(error::ErrorInternalServerError)?;
    info!(
        "Logged {} workout {} ({} min) for {}",
        entry.workout_type, entry.name, entry.duration_min, uid
    );
    Ok(web::Json(entry))
}

#[get("/users/{uid}/workouts/{date}")]
pub async fn workouts_for_date(
    workouts: web::Data<WorkoutRepositoryImpl>,
    path: web::Path<(String, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (uid, date) = path.into_inner();
    let entries = workouts
        .fetch_by_date(&uid, date)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(web::Json(entries))
}

#[delete("/users/{uid}/workouts/{id}")]
pub async fn delete_workout(
    workouts: web::Data<WorkoutRepositoryImpl>,
    path: web::Path<(String, String)>,
) -> actix_web::Result<HttpResponse> {
    let (_, id) = path.into_inner();
    workouts
        .delete_entry(&id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::NoContent().finish())
}
