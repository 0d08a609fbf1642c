pub mod food;
pub mod premium;
pub mod progress;
pub mod users;
pub mod workouts;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::onboard)
        .service(users::get_user)
        .service(food::search_foods)
        .service(food::food_details)
        .service(food::log_food)
        .service(food::food_log_for_date)
        .service(food::delete_food)
        .service(workouts::log_workout)
        .service(workouts::workouts_for_date)
        .service(workouts::delete_workout)
        .service(progress::add_weight)
        .service(progress::weight_history)
        .service(progress::daily_stats)
        .service(progress::put_steps)
        .service(premium::list_plans)
        .service(premium::upgrade);
}
