use crate::user::{ActivityLevel, Goal, Profile, Sex};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Share of the daily calorie goal allocated to each macronutrient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Daily nutrition and activity targets derived from a profile.
///
/// Wire names match the stored user documents (`calorieGoal`, `protein`,
/// `carbs`, `fats`, `stepGoal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessTarget {
    #[cfg_attr(feature = "serde", serde(rename = "calorieGoal"))]
    pub calorie_goal: i32,
    #[cfg_attr(feature = "serde", serde(rename = "protein"))]
    pub protein_g: i32,
    #[cfg_attr(feature = "serde", serde(rename = "carbs"))]
    pub carbs_g: i32,
    #[cfg_attr(feature = "serde", serde(rename = "fats"))]
    pub fat_g: i32,
    #[cfg_attr(feature = "serde", serde(rename = "stepGoal"))]
    pub step_goal: u32,
}

impl ActivityLevel {
    pub fn tdee_factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::SuperActive => 1.9,
        }
    }

    pub fn base_step_goal(self) -> u32 {
        match self {
            ActivityLevel::Sedentary => 5000,
            ActivityLevel::LightlyActive => 7000,
            ActivityLevel::ModeratelyActive => 9000,
            ActivityLevel::VeryActive => 11000,
            ActivityLevel::SuperActive => 13000,
        }
    }
}

impl Goal {
    pub fn calorie_offset(self) -> f64 {
        match self {
            Goal::LoseWeight => -500.0,
            Goal::MaintainWeight => 0.0,
            Goal::GainWeight => 500.0,
        }
    }

    pub fn macro_split(self) -> MacroSplit {
        match self {
            Goal::LoseWeight => MacroSplit {
                protein: 0.40,
                carbs: 0.40,
                fat: 0.20,
            },
            Goal::MaintainWeight => MacroSplit {
                protein: 0.30,
                carbs: 0.50,
                fat: 0.20,
            },
            Goal::GainWeight => MacroSplit {
                protein: 0.35,
                carbs: 0.45,
                fat: 0.20,
            },
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate, kcal/day. The third sex option
/// shares the female constant.
pub fn basal_metabolic_rate(profile: &Profile) -> f64 {
    let age = profile.age as f64;
    match profile.sex {
        Sex::Male => 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * age + 5.0,
        Sex::Female | Sex::Other => {
            10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * age - 161.0
        }
    }
}

/// Derive daily calorie, macro and step targets from a profile.
///
/// Pure and total over well-formed profiles: no I/O, no shared state,
/// identical input always yields identical output. Macro grams are computed
/// from the unrounded calorie goal and rounded independently of each other,
/// so they need not re-sum to the calorie goal exactly.
pub fn compute_goals(profile: &Profile) -> FitnessTarget {
    let bmr = basal_metabolic_rate(profile);
    let tdee = bmr * profile.activity_level.tdee_factor();
    let calorie_goal = tdee + profile.goal.calorie_offset();

    let split = profile.goal.macro_split();
    let base_steps = profile.activity_level.base_step_goal();
    let step_goal = match profile.goal {
        Goal::LoseWeight => base_steps + 2000,
        Goal::MaintainWeight | Goal::GainWeight => base_steps,
    };

    FitnessTarget {
        calorie_goal: (calorie_goal).round() as i32,
        protein_g: (calorie_goal * split.protein / KCAL_PER_GRAM_PROTEIN).round() as i32,
        carbs_g: (calorie_goal * split.carbs / KCAL_PER_GRAM_CARBS).round() as i32,
        fat_g: (calorie_goal * split.fat / KCAL_PER_GRAM_FAT).round() as i32,
        step_goal,
    }
}

/// Body mass index, or None when either measurement is non-positive.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}
