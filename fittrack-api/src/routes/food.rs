use std::collections::HashMap;

use actix_web::{delete, error, get, post, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use fittrack_db::{
    daily_stats::{DailyStatsRepository, DailyStatsRepositoryImpl},
    food_log::{FoodLogRepository, FoodLogRepositoryImpl},
};
use fittrack_model::{
    diary::{FoodEntry, MealType},
    food::FoodCandidate,
};
use fittrack_usda::{FoodDataClient, UsdaClient};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[get("/foods/search")]
pub async fn search_foods(
    usda: web::Data<UsdaClient>,
    query: web::Query<SearchQuery>,
) -> actix_web::Result<impl Responder> {
    let foods = usda
        .search_foods(&query.query)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(web::Json(foods))
}

#[get("/foods/{fdc_id}")]
pub async fn food_details(
    usda: web::Data<UsdaClient>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let food = usda
        .food_details(path.into_inner())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(web::Json(food))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFoodRequest {
    pub food: FoodCandidate,
    pub meal_type: MealType,
    /// Serving size in grams; nutrition is scaled from the per-100 g values.
    pub serving_g: f64,
}

#[post("/users/{uid}/food-log")]
pub async fn log_food(
    food_log: web::Data<FoodLogRepositoryImpl>,
    stats: web::Data<DailyStatsRepositoryImpl>,
    path: web::Path<String>,
    body: web::Json<LogFoodRequest>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let body = body.into_inner();
    let nutrients = body.food.for_serving(body.serving_g);
    let now = Utc::now();

    let entry = FoodEntry {
        id: Uuid::new_v4().to_string(),
        user_id: uid.clone(),
        name: body.food.description,
        meal_type: body.meal_type,
        amount_g: body.serving_g,
        calories: nutrients.calories,
        protein_g: nutrients.protein,
        carbs_g: nutrients.carbs,
        fat_g: nutrients.fat,
        date: now.date_naive(),
        created_at: now,
    };

    food_log
        .store_entry(&entry)
        .await
        .map_err(error::ErrorInternalServerError)?;
    stats
        .add_calories(&uid, entry.date, entry.calories)
        .await
        .map_err(error::ErrorInternalServerError)?;

    info!(
        "Logged {:.0} kcal of {} for {} at {}",
        entry.calories, entry.name, uid, entry.meal_type
    );
    Ok(web::Json(entry))
}

#[get("/users/{uid}/food-log/{date}")]
pub async fn food_log_for_date(
    food_log: web::Data<FoodLogRepositoryImpl>,
    path: web::Path<(String, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (uid, date) = path.into_inner();
    let entries = food_log
        .fetch_by_date(&uid, date)
        .await
        .map_err(error::ErrorInternalServerError)?;

    // Every meal section renders, logged or not.
    let mut grouped: HashMap<MealType, Vec<FoodEntry>> = entries
        .into_iter()
        .map(|entry| (entry.meal_type, entry))
        .into_group_map();
    for meal in MealType::ALL {
        grouped.entry(meal).or_default();
    }

    Ok(web::Json(grouped))
}

#[delete("/users/{uid}/food-log/{id}")]
pub async fn delete_food(
    food_log: web::Data<FoodLogRepositoryImpl>,
    stats: web::Data<DailyStatsRepositoryImpl>,
    path: web::Path<(String, String)>,
) -> actix_web::Result<HttpResponse> {
    let (uid, id) = path.into_inner();
    let Some(entry) = food_log
        .delete_entry(&id)
        .await
        .map_err(error::ErrorInternalServerError)?
    else {
        return Err(error::ErrorNotFound("no such food entry"));
    };

    // Subtract the removed serving from the day's running total.
    stats
        .add_calories(&uid, entry.date, -entry.calories)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::NoContent().finish())
}
