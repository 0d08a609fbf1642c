mod payment;
mod plans;
mod routes;

use std::env;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use fittrack_db::{
    connection::Connection,
    daily_stats::DailyStatsRepositoryImpl,
    food_log::FoodLogRepositoryImpl,
    user::UserRepositoryImpl,
    weight::WeightRepositoryImpl,
    workout::WorkoutRepositoryImpl,
};

const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();
    dotenv().ok();

    info!("Connecting to database");
    let conn = Connection::establish().await.unwrap();
    let users = web::Data::new(UserRepositoryImpl::new(conn.clone()));
    let food_log = web::Data::new(FoodLogRepositoryImpl::new(conn.clone()));
    let workouts = web::Data::new(WorkoutRepositoryImpl::new(conn.clone()));
    let weights = web::Data::new(WeightRepositoryImpl::new(conn.clone()));
    let stats = web::Data::new(DailyStatsRepositoryImpl::new(conn.clone()));

    let usda = web::Data::new(fittrack_usda::create(
        env::var("USDA_BASE_URL").unwrap_or_else(|_| USDA_BASE_URL.to_owned()),
        env::var("USDA_API_KEY").expect("USDA_API_KEY must be set"),
    ));
    let payments = web::Data::new(payment::create(
        env::var("PAYMENT_INTENT_URL").expect("PAYMENT_INTENT_URL must be set"),
    ));

    info!("Starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(users.clone())
            .app_data(food_log.clone())
            .app_data(workouts.clone())
            .app_data(weights.clone())
            .app_data(stats.clone())
            .app_data(usda.clone())
            .app_data(payments.clone())
            .configure(routes::configure)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
