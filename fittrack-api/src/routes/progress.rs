use actix_web::{error, get, post, put, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fittrack_db::{
    daily_stats::{DailyStatsRepository, DailyStatsRepositoryImpl},
    user::{UserRepository, UserRepositoryImpl},
    weight::{WeightRepository, WeightRepositoryImpl},
};
use fittrack_model::{diary::WeightEntry, goals::body_mass_index};

#[derive(Debug, Deserialize)]
pub struct WeightRequest {
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightResponse {
    pub entry: WeightEntry,
    pub bmi: Option<f64>,
}

#[post("/users/{uid}/weight")]
pub async fn add_weight(
    users: web::Data<UserRepositoryImpl>,
    weights: web::Data<WeightRepositoryImpl>,
    path: web::Path<String>,
    body: web::Json<WeightRequest>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let user = users
        .fetch_user(&uid)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("no such user"))?;

    let now = Utc::now();
    let entry = WeightEntry {
        id: Uuid::new_v4().to_string(),
        user_id: uid.clone(),
        weight_kg: body.weight,
        date: now.date_naive(),
        created_at: now,
    };

    weights
        .store_entry(&entry)
        .await
        .map_err(error::ErrorInternalServerError)?;
    users
        .update_weight(&uid, body.weight)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let bmi = body_mass_index(body.weight, user.profile.height_cm);
    info!("Recorded weight {} kg for {}", body.weight, uid);
    Ok(web::Json(WeightResponse { entry, bmi }))
}

#[get("/users/{uid}/weight")]
pub async fn weight_history(
    weights: web::Data<WeightRepositoryImpl>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let history = weights
        .fetch_history(&uid)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(web::Json(history))
}

#[get("/users/{uid}/stats/{date}")]
pub async fn daily_stats(
    stats: web::Data<DailyStatsRepositoryImpl>,
    path: web::Path<(String, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (uid, date) = path.into_inner();
    let stats = stats
        .fetch(&uid, date)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(web::Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct StepsRequest {
    pub date: NaiveDate,
    pub steps: i64,
}

#[put("/users/{uid}/stats/steps")]
pub async fn put_steps(
    stats: web::Data<DailyStatsRepositoryImpl>,
    path: web::Path<String>,
    body: web::Json<StepsRequest>,
) -> actix_web::Result<HttpResponse> {
    let uid = path.into_inner();
    stats
        .set_steps(&uid, body.date, body.steps)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::NoContent().finish())
}
