use serde::{Deserialize, Serialize};

use crate::models::diet::{canonical_approach_id, MealType};
use crate::models::ingredient::Nutrition;

/// Serving weight assumed when a recipe carries neither per-serving nutrition nor a weight.
pub const DEFAULT_SERVING_WEIGHT_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    pub amount: f64,
    pub unit: String,
    /// Optional ingredients may be dropped instead of disqualifying the recipe.
    #[serde(default)]
    pub optional: bool,
}

impl RecipeIngredient {
    pub fn new(ingredient_id: &str, amount: f64, unit: &str) -> Self {
        Self {
            ingredient_id: ingredient_id.to_string(),
            amount,
            unit: unit.to_string(),
            optional: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Meal types this recipe can fill.
    pub categories: Vec<MealType>,
    pub dietary_approach_ids: Vec<String>,
    pub nutrition_per_100g: Nutrition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_per_serving: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_weight_grams: Option<f64>,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }

    /// Nutrition for one default serving.
    pub fn per_serving(&self) -> Nutrition {
        match &self.nutrition_per_serving {
            Some(n) => n.clone(),
            None => {
                let grams = self
                    .serving_weight_grams
                    .unwrap_or(DEFAULT_SERVING_WEIGHT_GRAMS);
                self.nutrition_per_100g.scaled(grams / 100.0)
            }
        }
    }

    /// Case-insensitive, with approach aliases ("balanced") matching their canonical id.
    pub fn supports_approach(&self, approach_id: &str) -> bool {
        let wanted = canonical_approach_id(approach_id);
        self.dietary_approach_ids
            .iter()
            .any(|id| canonical_approach_id(id) == wanted)
    }

    pub fn fits_meal(&self, meal_type: MealType) -> bool {
        self.categories.contains(&meal_type)
    }

    /// Basic validation: at least one serving and non-negative nutrition.
    pub fn is_valid(&self) -> bool {
        self.servings >= 1
            && self.nutrition_per_100g.is_non_negative()
            && self
                .nutrition_per_serving
                .as_ref()
                .map(|n| n.is_non_negative())
                .unwrap_or(true)
            && self.ingredients.iter().all(|i| i.amount >= 0.0)
    }

    /// Canonical key for lookups (lowercase id).
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omelette() -> Recipe {
        Recipe {
            id: "omelette".to_string(),
            title: "Omelet med spinat".to_string(),
            ingredients: vec![RecipeIngredient::new("egg", 3.0, "stk")],
            prep_time_minutes: 5,
            cook_time_minutes: 10,
            servings: 1,
            categories: vec![MealType::Breakfast],
            dietary_approach_ids: vec!["keto".to_string()],
            nutrition_per_100g: Nutrition::new(150.0, 11.0, 1.0, 11.0),
            nutrition_per_serving: None,
            serving_weight_grams: Some(250.0),
        }
    }

    #[test]
    fn test_per_serving_from_weight() {
        let recipe = omelette();
        let serving = recipe.per_serving();
        assert!((serving.calories - 375.0).abs() < 1e-9);
        assert!((serving.protein - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_explicit_per_serving_wins() {
        let mut recipe = omelette();
        recipe.nutrition_per_serving = Some(Nutrition::new(280.0, 20.0, 2.0, 21.0));
        assert!((recipe.per_serving().calories - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_valid() {
        let recipe = omelette();
        assert!(recipe.is_valid());

        let mut invalid = omelette();
        invalid.servings = 0;
        assert!(!invalid.is_valid());

        let mut negative = omelette();
        negative.nutrition_per_100g.fat = -1.0;
        assert!(!negative.is_valid());
    }

    #[test]
    fn test_supports_approach_case_insensitive() {
        let recipe = omelette();
        assert!(recipe.supports_approach("KETO"));
        assert!(!recipe.supports_approach("sense"));
    }

    #[test]
    fn test_supports_approach_through_aliases() {
        let mut recipe = omelette();
        recipe.dietary_approach_ids = vec!["Balanced".to_string(), "5-2".to_string()];
        assert!(recipe.supports_approach("sense"));
        assert!(recipe.supports_approach("balanced"));
        assert!(recipe.supports_approach("alternate-day-fasting"));
        assert!(!recipe.supports_approach("lchf-paleo"));
    }

    #[test]
    fn test_total_time_saturates() {
        let mut recipe = omelette();
        recipe.prep_time_minutes = u32::MAX;
        recipe.cook_time_minutes = 30;
        assert_eq!(recipe.total_time_minutes(), u32::MAX);
    }
}
