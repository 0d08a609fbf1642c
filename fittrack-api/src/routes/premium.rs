use actix_web::{error, get, post, web, Responder};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use fittrack_db::user::{UserRepository, UserRepositoryImpl};

use crate::{
    payment::{HttpPaymentGateway, PaymentError, PaymentGateway},
    plans::{self, Plan, PLANS},
};

#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error("no such user")]
    UserNotFound,
    #[error("payment failed: {0}")]
    Payment(PaymentError),
    #[error("storage failure: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequest {
    pub plan_id: String,
    pub payment_method: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub plan: Plan,
    pub client_secret: String,
}

/// Upgrade a user to premium: resolve the plan, create the payment intent,
/// then persist the premium flag. Intent creation comes first so a gateway
/// failure leaves the user untouched.
pub async fn activate_premium(
    users: &impl UserRepository,
    gateway: &impl PaymentGateway,
    uid: &str,
    plan_id: &str,
    payment_method: &str,
) -> Result<UpgradeResponse, UpgradeError> {
    let plan = plans::find(plan_id).ok_or_else(|| UpgradeError::UnknownPlan(plan_id.to_owned()))?;
    users
        .fetch_user(uid)
        .await
        .map_err(UpgradeError::Storage)?
        .ok_or(UpgradeError::UserNotFound)?;

    let intent = gateway
        .create_intent(plan.amount_cents, plan.currency)
        .await
        .map_err(UpgradeError::Payment)?;

    users
        .set_premium(uid, plan.id, payment_method, Utc::now())
        .await
        .map_err(UpgradeError::Storage)?;

    info!("User {} upgraded to the {} plan", uid, plan.id);
    Ok(UpgradeResponse {
        plan,
        client_secret: intent.client_secret,
    })
}

#[get("/plans")]
pub async fn list_plans() -> impl Responder {
    web::Json(PLANS)
}

#[post("/users/{uid}/premium")]
pub async fn upgrade(
    users: web::Data<UserRepositoryImpl>,
    gateway: web::Data<HttpPaymentGateway>,
    path: web::Path<String>,
    body: web::Json<UpgradeRequest>,
) -> actix_web::Result<impl Responder> {
    let uid = path.into_inner();
    let response = activate_premium(
        users.get_ref(),
        gateway.get_ref(),
        &uid,
        &body.plan_id,
        &body.payment_method,
    )
    .await
    .map_err(|e| match e {
        UpgradeError::UnknownPlan(_) => error::ErrorNotFound(e),
        UpgradeError::UserNotFound => error::ErrorNotFound(e),
        UpgradeError::Payment(_) => error::ErrorBadGateway(e),
        UpgradeError::Storage(_) => error::ErrorInternalServerError(e),
    })?;
    Ok(web::Json(response))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;

    use fittrack_db::user::MockUserRepository;
    use fittrack_model::{
        goals::compute_goals,
        user::{ActivityLevel, Goal, Profile, Sex, User},
    };

    use crate::payment::{MockPaymentGateway, PaymentIntent};

    use super::*;

    fn sample_user() -> User {
        let profile = Profile {
            age: 30,
            sex: Sex::Female,
            height_cm: 165.0,
            weight_kg: 60.0,
            activity_level: ActivityLevel::LightlyActive,
            goal: Goal::LoseWeight,
        };
        User {
            uid: "user-1".to_owned(),
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            target: compute_goals(&profile),
            profile,
            is_premium: false,
            premium_plan: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[actix_web::test]
    async fn upgrade_creates_intent_then_marks_premium() {
        let mut users = MockUserRepository::new();
        users
            .expect_fetch_user()
            .with(eq("user-1"))
            .returning(|_| Ok(Some(sample_user())));
        users
            .expect_set_premium()
            .withf(|uid, plan, method, _| uid == "user-1" && plan == "annual" && method == "card")
            .returning(|_, _, _, _| Ok(()));

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_intent()
            .with(eq(7999), eq("usd"))
            .returning(|_, _| {
                Ok(PaymentIntent {
                    client_secret: "pi_secret".to_owned(),
                })
            });

        let response = activate_premium(&users, &gateway, "user-1", "annual", "card")
            .await
            .unwrap();
        assert_eq!(response.client_secret, "pi_secret");
        assert_eq!(response.plan.id, "annual");
    }

    #[actix_web::test]
    async fn unknown_plan_is_rejected_before_any_call() {
        let users = MockUserRepository::new();
        let gateway = MockPaymentGateway::new();

        let result = activate_premium(&users, &gateway, "user-1", "lifetime", "card").await;
        assert!(matches!(result, Err(UpgradeError::UnknownPlan(_))));
    }

    #[actix_web::test]
    async fn gateway_failure_leaves_user_untouched() {
        let mut users = MockUserRepository::new();
        users
            .expect_fetch_user()
            .returning(|_| Ok(Some(sample_user())));
        // No expect_set_premium: reaching it would fail the test.

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_intent()
            .returning(|_, _| Err(PaymentError::CommunicationError));

        let result = activate_premium(&users, &gateway, "user-1", "monthly", "card").await;
        assert!(matches!(result, Err(UpgradeError::Payment(_))));
    }
}
