use chrono::{DateTime, Utc};

use crate::goals::FitnessTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString)
)]
pub enum Sex {
    Male,
    Female,
    Other,
}

/// Self-reported activity level, ordered from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString)
)]
pub enum ActivityLevel {
    Sedentary,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Lightly Active"),
        strum(serialize = "Lightly Active")
    )]
    LightlyActive,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Moderately Active"),
        strum(serialize = "Moderately Active")
    )]
    ModeratelyActive,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Very Active"),
        strum(serialize = "Very Active")
    )]
    VeryActive,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Super Active"),
        strum(serialize = "Super Active")
    )]
    SuperActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::SuperActive,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString)
)]
pub enum Goal {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Lose Weight"),
        strum(serialize = "Lose Weight")
    )]
    LoseWeight,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Maintain Weight"),
        strum(serialize = "Maintain Weight")
    )]
    MaintainWeight,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Gain Weight"),
        strum(serialize = "Gain Weight")
    )]
    GainWeight,
}

/// Body metrics and stated objective collected during onboarding.
///
/// Wire field names follow the onboarding documents (`gender`, `height`,
/// `weight`, `lifestyle`, `goal`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub age: u32,
    #[cfg_attr(feature = "serde", serde(rename = "gender"))]
    pub sex: Sex,
    #[cfg_attr(feature = "serde", serde(rename = "height"))]
    pub height_cm: f64,
    #[cfg_attr(feature = "serde", serde(rename = "weight"))]
    pub weight_kg: f64,
    #[cfg_attr(feature = "serde", serde(rename = "lifestyle"))]
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// A user document: identity, profile, computed targets and premium state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct User {
    pub uid: String,
    pub name: String,
    pub email: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub profile: Profile,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub target: FitnessTarget,
    pub is_premium: bool,
    pub premium_plan: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn activity_level_labels_round_trip() {
        let test_data = [
            (ActivityLevel::Sedentary, "Sedentary"),
            (ActivityLevel::LightlyActive, "Lightly Active"),
            (ActivityLevel::ModeratelyActive, "Moderately Active"),
            (ActivityLevel::VeryActive, "Very Active"),
            (ActivityLevel::SuperActive, "Super Active"),
        ];

        for (i, (level, label)) in test_data.into_iter().enumerate() {
            assert_eq!(level.to_string(), label, "Test case #{}", i);
            assert_eq!(
                ActivityLevel::from_str(label),
                Ok(level),
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn unknown_activity_label_is_rejected() {
        // Labels outside the table are rejected outright, never defaulted.
        assert!(ActivityLevel::from_str("Extra Active").is_err());
        assert!(ActivityLevel::from_str("").is_err());
    }

    #[test]
    fn goal_labels_round_trip() {
        let test_data = [
            (Goal::LoseWeight, "Lose Weight"),
            (Goal::MaintainWeight, "Maintain Weight"),
            (Goal::GainWeight, "Gain Weight"),
        ];

        for (i, (goal, label)) in test_data.into_iter().enumerate() {
            assert_eq!(goal.to_string(), label, "Test case #{}", i);
            assert_eq!(Goal::from_str(label), Ok(goal), "Test case #{}", i);
        }
        assert!(Goal::from_str("Bulk").is_err());
    }
}
