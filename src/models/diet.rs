use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ingredient::{Ingredient, IngredientCategory};

/// Alternative names accepted for the built-in approach ids.
pub const APPROACH_ALIASES: [(&str, &str); 3] = [
    ("balanced", "sense"),
    ("low-carb-paleo", "lchf-paleo"),
    ("alternate-day-fasting", "5-2"),
];

/// Lowercase approach id with aliases mapped to their canonical id.
pub fn canonical_approach_id(id: &str) -> String {
    let key = id.trim().to_lowercase();
    APPROACH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

/// A {min, target, max} percentage band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl PercentRange {
    pub const fn new(min: f64, target: f64, max: f64) -> Self {
        Self { min, target, max }
    }

    /// `min <= target <= max`.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.target && self.target <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatio {
    pub carbohydrates: PercentRange,
    pub protein: PercentRange,
    pub fat: PercentRange,
}

impl MacroRatio {
    pub fn target_sum(&self) -> f64 {
        self.carbohydrates.target + self.protein.target + self.fat.target
    }

    pub fn ranges_ordered(&self) -> bool {
        self.carbohydrates.is_ordered() && self.protein.is_ordered() && self.fat.is_ordered()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("unknown meal type '{}'", other)),
        }
    }
}

/// One configured meal of an approach: its portion size in kcal and macro split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDistribution {
    pub meal_type: MealType,
    pub macro_distribution: MacroRatio,
    pub target_calories: f64,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastingPeriod {
    pub days_per_week: u32,
    /// Percent of the normal intake removed on a fasting day (75 for 5:2).
    pub calorie_reduction_percent: f64,
    #[serde(default)]
    pub description: String,
}

impl FastingPeriod {
    /// Multiplier applied to every slot target on a fasting day.
    pub fn scale(&self) -> f64 {
        (1.0 - self.calorie_reduction_percent / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealStructure {
    pub meals: Vec<MealDistribution>,
    pub snacks_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fasting: Option<FastingPeriod>,
}

impl MealStructure {
    /// Meal types in configured order.
    pub fn meal_types(&self, include_optional: bool) -> Vec<MealType> {
        self.meals
            .iter()
            .filter(|m| include_optional || !m.optional)
            .map(|m| m.meal_type)
            .collect()
    }

    pub fn distribution(&self, meal_type: MealType) -> Option<&MealDistribution> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }

    pub fn daily_portion_calories(&self, include_optional: bool) -> f64 {
        self.meals
            .iter()
            .filter(|m| include_optional || !m.optional)
            .map(|m| m.target_calories)
            .sum()
    }
}

/// Food groups a dietary approach can restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodCategory {
    Vegetables,
    Fruits,
    Grains,
    Proteins,
    Dairy,
    Fats,
    Nuts,
    Seeds,
    Legumes,
    ProcessedFoods,
    Sugars,
    Alcohol,
    Meat,
}

impl FoodCategory {
    fn ingredient_category(&self) -> Option<IngredientCategory> {
        match self {
            FoodCategory::Vegetables => Some(IngredientCategory::Vegetable),
            FoodCategory::Fruits => Some(IngredientCategory::Fruit),
            FoodCategory::Grains => Some(IngredientCategory::Grain),
            FoodCategory::Proteins => Some(IngredientCategory::Protein),
            FoodCategory::Dairy => Some(IngredientCategory::Dairy),
            FoodCategory::Fats => Some(IngredientCategory::Fat),
            FoodCategory::Nuts => Some(IngredientCategory::Nut),
            FoodCategory::Seeds => Some(IngredientCategory::Seed),
            FoodCategory::Legumes => Some(IngredientCategory::Legume),
            FoodCategory::ProcessedFoods => Some(IngredientCategory::ProcessedFood),
            FoodCategory::Sugars => Some(IngredientCategory::Sweetener),
            FoodCategory::Alcohol | FoodCategory::Meat => None,
        }
    }

    /// Exclusion tags that also place an ingredient in this group.
    fn tags(&self) -> &'static [&'static str] {
        match self {
            FoodCategory::Grains => &["grain", "gluten"],
            FoodCategory::Dairy => &["dairy", "lactose"],
            FoodCategory::Sugars => &["sugar"],
            FoodCategory::ProcessedFoods => &["processed"],
            FoodCategory::Alcohol => &["alcohol"],
            FoodCategory::Meat => &["meat", "pork", "beef", "lamb", "poultry"],
            FoodCategory::Legumes => &["legume"],
            _ => &[],
        }
    }

    /// Whether an ingredient falls in this group, by registry category or exclusion tag.
    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        if self.ingredient_category() == Some(ingredient.category) {
            return true;
        }
        let tags = self.tags();
        ingredient
            .exclusion_tags
            .iter()
            .any(|t| tags.iter().any(|c| t.eq_ignore_ascii_case(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Avoid,
    Limit,
    Eliminate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRestriction {
    pub category: FoodCategory,
    pub strictness: Strictness,
    #[serde(default)]
    pub reason: String,
    /// Ingredient ids that may stand in for an ingredient of this category.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionalPriority {
    pub nutrient: String,
    /// 1-10.
    pub importance: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<String>,
    #[serde(default)]
    pub reason: String,
}

/// A named dietary approach. Plain data, built once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryApproach {
    pub id: String,
    pub name: String,
    pub description: String,
    pub macro_ratio: MacroRatio,
    pub meal_structure: MealStructure,
    #[serde(default)]
    pub nutritional_priorities: Vec<NutritionalPriority>,
    #[serde(default)]
    pub restrictions: Vec<FoodRestriction>,
    #[serde(default)]
    pub allowed_food_categories: BTreeSet<FoodCategory>,
    #[serde(default)]
    pub special_considerations: Vec<String>,
    /// Hard carbohydrate cap on recipe nutrition per 100 g.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_carbs_per_100g: Option<f64>,
}

impl DietaryApproach {
    pub fn eliminated_categories(&self) -> impl Iterator<Item = &FoodRestriction> {
        self.restrictions
            .iter()
            .filter(|r| r.strictness == Strictness::Eliminate)
    }

    /// First eliminate-strictness restriction the ingredient violates.
    pub fn eliminating_restriction(&self, ingredient: &Ingredient) -> Option<&FoodRestriction> {
        self.eliminated_categories()
            .find(|r| r.category.contains(ingredient))
    }

    /// Importance of a nutrient among the priorities, 0 if not listed.
    pub fn priority_of(&self, nutrient: &str) -> u8 {
        self.nutritional_priorities
            .iter()
            .filter(|p| p.nutrient.eq_ignore_ascii_case(nutrient))
            .map(|p| p.importance)
            .max()
            .unwrap_or(0)
    }

    pub fn is_fasting(&self) -> bool {
        self.meal_structure.fasting.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ingredient::Ingredient;

    #[test]
    fn test_range_ordering() {
        assert!(PercentRange::new(5.0, 5.0, 10.0).is_ordered());
        assert!(!PercentRange::new(10.0, 5.0, 12.0).is_ordered());
    }

    #[test]
    fn test_food_category_matches_by_category_or_tag() {
        let rice = Ingredient::new("rice", "Rice", IngredientCategory::Grain);
        let mut bacon = Ingredient::new("bacon", "Bacon", IngredientCategory::Protein);
        bacon.exclusion_tags.insert("pork".to_string());

        assert!(FoodCategory::Grains.contains(&rice));
        assert!(!FoodCategory::Grains.contains(&bacon));
        assert!(FoodCategory::Meat.contains(&bacon));
        assert!(FoodCategory::Proteins.contains(&bacon));
    }

    #[test]
    fn test_fasting_scale() {
        let fasting = FastingPeriod {
            days_per_week: 2,
            calorie_reduction_percent: 75.0,
            description: String::new(),
        };
        assert!((fasting.scale() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_meal_type_round_trips_through_str() {
        for meal in [MealType::Breakfast, MealType::Lunch, MealType::Dinner, MealType::Snack] {
            assert_eq!(meal.to_string().parse::<MealType>().unwrap(), meal);
        }
    }
}
