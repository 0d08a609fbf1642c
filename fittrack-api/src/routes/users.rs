use actix_web::{error, get, post, web, Responder};
use chrono::Utc;
use log::info;
use serde::Deserialize;

use fittrack_db::user::{UserRepository, UserRepositoryImpl};
use fittrack_model::{
    goals::compute_goals,
    user::{Profile, User},
};

/// Everything the multi-step onboarding flow collected, posted in one go.
/// Identity is caller-supplied; nothing is read from ambient session state.
#[derive(Debug, Deserialize)]
pub struct OnboardingRequest {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub profile: Profile,
}

#[post("/users")]
pub async fn onboard(
    users: web::Data<UserRepositoryImpl>,
    body: web::Json<OnboardingRequest>,
) -> actix_web::Result<impl Responder> {
    let body = body.into_inner();
    let target = compute_goals(&body.profile);
    let user = User {
        uid: body.uid,
        name: body.name,
        email: body.email,
        profile: body.profile,
        target,
        is_premium: false,
        premium_plan: None,
        created_at: Utc::now(),
    };

    users
        .store_user(&user)
        .await
        .map_err(error::ErrorInternalServerError)?;
    info!(
        "Onboarded user {} with calorie goal {} and step goal {}",
        user.uid, user.target.calorie_goal, user.target.step_goal
    );
    Ok(web::Json(user))
}

#[get("/users/{uid}")]
pub async fn get_user(
    users: web::Data<UserRepositoryImpl>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let user = users
        .fetch_user(&uid)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("no such user"))?;
    Ok(web::Json(user))
}
