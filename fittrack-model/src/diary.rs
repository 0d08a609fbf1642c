use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString)
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString)
)]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    #[cfg_attr(feature = "serde", serde(rename = "HIIT"), strum(serialize = "HIIT"))]
    Hiit,
}

/// One logged food: nutrition already scaled to the eaten serving.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FoodEntry {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub meal_type: MealType,
    #[cfg_attr(feature = "serde", serde(rename = "amount"))]
    pub amount_g: f64,
    pub calories: f64,
    #[cfg_attr(feature = "serde", serde(rename = "protein"))]
    pub protein_g: f64,
    #[cfg_attr(feature = "serde", serde(rename = "carbs"))]
    pub carbs_g: f64,
    #[cfg_attr(feature = "serde", serde(rename = "fat"))]
    pub fat_g: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One logged workout. Sets, reps and weight are only present for
/// strength work.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct WorkoutEntry {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub workout_type: WorkoutType,
    #[cfg_attr(feature = "serde", serde(rename = "duration"))]
    pub duration_min: u32,
    pub calories_burned: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub sets: Option<u32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub reps: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "weight", skip_serializing_if = "Option::is_none", default)
    )]
    pub weight_kg: Option<f64>,
    pub notes: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct WeightEntry {
    pub id: String,
    pub user_id: String,
    #[cfg_attr(feature = "serde", serde(rename = "weight"))]
    pub weight_kg: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Running totals for one user-day: calories eaten and steps walked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyStats {
    pub calories: f64,
    pub steps: i64,
}
