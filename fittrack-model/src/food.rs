/// A candidate food from the nutrition database, energy and macros per 100 g.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FoodCandidate {
    pub fdc_id: i64,
    pub description: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Nutrition for a concrete serving, scaled from per-100 g values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServingNutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodCandidate {
    /// Scale the per-100 g values to a serving, rounding each to the two
    /// decimals the diary displays.
    pub fn for_serving(&self, grams: f64) -> ServingNutrients {
        ServingNutrients {
            calories: scale(self.calories, grams),
            protein: scale(self.protein, grams),
            carbs: scale(self.carbs, grams),
            fat: scale(self.fat, grams),
        }
    }
}

fn scale(per_100g: f64, grams: f64) -> f64 {
    (per_100g * grams / 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serving_scales_from_100g_base() {
        let candidate = FoodCandidate {
            fdc_id: 173944,
            description: "Egg, whole, raw".to_owned(),
            calories: 143.0,
            protein: 12.56,
            carbs: 0.72,
            fat: 9.5,
        };

        let serving = candidate.for_serving(50.0);
        assert_eq!(serving.calories, 71.5);
        assert_eq!(serving.protein, 6.28);
        assert_eq!(serving.carbs, 0.36);
        assert_eq!(serving.fat, 4.75);

        let full = candidate.for_serving(100.0);
        assert_eq!(full.calories, candidate.calories);
        assert_eq!(full.protein, candidate.protein);
    }

    #[test]
    fn serving_values_round_to_two_decimals() {
        let candidate = FoodCandidate {
            fdc_id: 1,
            description: "Test".to_owned(),
            calories: 33.333,
            protein: 1.111,
            carbs: 2.222,
            fat: 0.999,
        };

        let serving = candidate.for_serving(30.0);
        assert_eq!(serving.calories, 10.0);
        assert_eq!(serving.protein, 0.33);
        assert_eq!(serving.carbs, 0.67);
        assert_eq!(serving.fat, 0.3);
    }
}
