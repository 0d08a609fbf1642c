use chrono::{NaiveDate, TimeZone, Utc};

use fittrack_db::{
    connection::Connection,
    daily_stats::{DailyStatsRepository, DailyStatsRepositoryImpl},
    food_log::{FoodLogRepository, FoodLogRepositoryImpl},
    user::{UserRepository, UserRepositoryImpl},
    weight::{WeightRepository, WeightRepositoryImpl},
    workout::{WorkoutRepository, WorkoutRepositoryImpl},
};
use fittrack_model::{
    diary::{DailyStats, FoodEntry, MealType, WeightEntry, WorkoutEntry, WorkoutType},
    goals::compute_goals,
    user::{ActivityLevel, Goal, Profile, Sex, User},
};

async fn connect() -> Connection {
    Connection::establish_with_url("sqlite::memory:")
        .await
        .unwrap()
}

fn sample_user() -> User {
    let profile = Profile {
        age: 30,
        sex: Sex::Male,
        height_cm: 180.0,
        weight_kg: 80.0,
        activity_level: ActivityLevel::ModeratelyActive,
        goal: Goal::MaintainWeight,
    };
    User {
        uid: "user-1".to_owned(),
        name: "Test User".to_owned(),
        email: "test@example.com".to_owned(),
        target: compute_goals(&profile),
        profile,
        is_premium: false,
        premium_plan: None,
        created_at: Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn user_round_trip() {
    let repository = UserRepositoryImpl::new(connect().await);
    let user = sample_user();

    repository.store_user(&user).await.unwrap();
    assert_eq!(repository.fetch_user("user-1").await.unwrap(), Some(user));
    assert_eq!(repository.fetch_user("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn update_weight_changes_profile() {
    let repository = UserRepositoryImpl::new(connect().await);
    repository.store_user(&sample_user()).await.unwrap();

    repository.update_weight("user-1", 78.5).await.unwrap();

    let user = repository.fetch_user("user-1").await.unwrap().unwrap();
    assert_eq!(user.profile.weight_kg, 78.5);
}

#[tokio::test]
async fn set_premium_marks_user() {
    let repository = UserRepositoryImpl::new(connect().await);
    repository.store_user(&sample_user()).await.unwrap();

    repository
        .set_premium(
            "user-1",
            "annual",
            "card",
            Utc.with_ymd_and_hms(2025, 4, 11, 9, 30, 0).unwrap(),
        )
        .await
        .unwrap();

    let user = repository.fetch_user("user-1").await.unwrap().unwrap();
    assert!(user.is_premium);
    assert_eq!(user.premium_plan.as_deref(), Some("annual"));
}

fn sample_food_entry(id: &str, meal_type: MealType, calories: f64) -> FoodEntry {
    FoodEntry {
        id: id.to_owned(),
        user_id: "user-1".to_owned(),
        name: "Oatmeal".to_owned(),
        meal_type,
        amount_g: 150.0,
        calories,
        protein_g: 12.3,
        carbs_g: 45.6,
        fat_g: 7.8,
        date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 10, 8, 15, 0).unwrap(),
    }
}

#[tokio::test]
async fn food_log_round_trip_and_delete() {
    let repository = FoodLogRepositoryImpl::new(connect().await);
    let breakfast = sample_food_entry("food-1", MealType::Breakfast, 225.5);
    let lunch = sample_food_entry("food-2", MealType::Lunch, 430.0);

    repository.store_entry(&breakfast).await.unwrap();
    repository.store_entry(&lunch).await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let entries = repository.fetch_by_date("user-1", date).await.unwrap();
    assert_eq!(entries, vec![breakfast.clone(), lunch.clone()]);

    let other_day = NaiveDate::from_ymd_opt(2025, 4, 11).unwrap();
    assert!(repository
        .fetch_by_date("user-1", other_day)
        .await
        .unwrap()
        .is_empty());

    let deleted = repository.delete_entry("food-1").await.unwrap();
    assert_eq!(deleted, Some(breakfast));
    assert_eq!(repository.delete_entry("food-1").await.unwrap(), None);
    assert_eq!(
        repository.fetch_by_date("user-1", date).await.unwrap(),
        vec![lunch]
    );
}

#[tokio::test]
async fn workout_log_keeps_strength_details() {
    let repository = WorkoutRepositoryImpl::new(connect().await);
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let entry = WorkoutEntry {
        id: "workout-1".to_owned(),
        user_id: "user-1".to_owned(),
        name: "Bench press".to_owned(),
        workout_type: WorkoutType::Strength,
        duration_min: 45,
        calories_burned: 280,
        sets: Some(5),
        reps: Some(8),
        weight_kg: Some(72.5),
        notes: "Felt strong".to_owned(),
        date,
        created_at: Utc.with_ymd_and_hms(2025, 4, 10, 18, 0, 0).unwrap(),
    };
    let run = WorkoutEntry {
        id: "workout-2".to_owned(),
        user_id: "user-1".to_owned(),
        name: "Evening run".to_owned(),
        workout_type: WorkoutType::Cardio,
        duration_min: 30,
        calories_burned: 320,
        sets: None,
        reps: None,
        weight_kg: None,
        notes: String::new(),
        date,
        created_at: Utc.with_ymd_and_hms(2025, 4, 10, 19, 0, 0).unwrap(),
    };

    repository.store_entry(&entry).await.unwrap();
    repository.store_entry(&run).await.unwrap();

    let entries = repository.fetch_by_date("user-1", date).await.unwrap();
    assert_eq!(entries, vec![entry, run.clone()]);

    repository.delete_entry("workout-1").await.unwrap();
    assert_eq!(
        repository.fetch_by_date("user-1", date).await.unwrap(),
        vec![run]
    );
}

#[tokio::test]
async fn weight_history_is_ordered_by_date() {
    let repository = WeightRepositoryImpl::new(connect().await);
    let later = WeightEntry {
        id: "weight-2".to_owned(),
        user_id: "user-1".to_owned(),
        weight_kg: 78.2,
        date: NaiveDate::from_ymd_opt(2025, 4, 17).unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 17, 7, 0, 0).unwrap(),
    };
    let earlier = WeightEntry {
        id: "weight-1".to_owned(),
        user_id: "user-1".to_owned(),
        weight_kg: 80.0,
        date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 10, 7, 0, 0).unwrap(),
    };

    repository.store_entry(&later).await.unwrap();
    repository.store_entry(&earlier).await.unwrap();

    assert_eq!(
        repository.fetch_history("user-1").await.unwrap(),
        vec![earlier, later]
    );
    assert!(repository.fetch_history("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn daily_calories_accumulate_and_clamp_at_zero() {
    let repository = DailyStatsRepositoryImpl::new(connect().await);
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();

    assert_eq!(
        repository.fetch("user-1", date).await.unwrap(),
        DailyStats::default()
    );

    let stats = repository.add_calories("user-1", date, 420.5).await.unwrap();
    assert_eq!(stats.calories, 420.5);

    let stats = repository.add_calories("user-1", date, 100.0).await.unwrap();
    assert_eq!(stats.calories, 520.5);

    // Deleting more than was ever logged must not go negative.
    let stats = repository
        .add_calories("user-1", date, -1000.0)
        .await
        .unwrap();
    assert_eq!(stats.calories, 0.0);
}

#[tokio::test]
async fn steps_upsert_preserves_calories() {
    let repository = DailyStatsRepositoryImpl::new(connect().await);
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();

    repository.add_calories("user-1", date, 300.0).await.unwrap();
    repository.set_steps("user-1", date, 6543).await.unwrap();
    repository.set_steps("user-1", date, 7001).await.unwrap();

    assert_eq!(
        repository.fetch("user-1", date).await.unwrap(),
        DailyStats {
            calories: 300.0,
            steps: 7001,
        }
    );
}
