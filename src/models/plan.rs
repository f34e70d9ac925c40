use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::diet::{DietaryApproach, MealType};
use crate::models::ingredient::Nutrition;
use crate::models::profile::UserProfile;
use crate::models::recipe::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyNeeds {
    pub bmr: f64,
    pub tdee: f64,
    /// Rounded to the nearest kcal.
    pub target_calories: f64,
    /// Positive for a deficit, negative for a surplus.
    pub deficit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: f64,
    pub protein_grams: f64,
    pub carb_grams: f64,
    pub fat_grams: f64,
    pub protein_percent: f64,
    pub carb_percent: f64,
    pub fat_percent: f64,
}

/// Calorie and macro goal for one (day, meal type) slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotTarget {
    pub meal_type: MealType,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeScore {
    pub macro_alignment: f64,
    pub ingredient_compatibility: f64,
    pub time_compatibility: f64,
    pub variety: f64,
    pub overall: f64,
}

/// A recipe ingredient swapped for an alternative, or dropped when optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub original_ingredient_id: String,
    /// `None` when the ingredient was simply left out.
    pub replacement_ingredient_id: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealAssignment {
    pub meal_type: MealType,
    pub recipe: Recipe,
    pub serving_multiplier: f64,
    /// Per-serving nutrition times the multiplier.
    pub adjusted: Nutrition,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    pub score: RecipeScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotFailure {
    pub meal_type: MealType,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// 1-based position within its week.
    pub day_number: u32,
    pub fasting_day: bool,
    pub calorie_target: f64,
    pub meals: Vec<MealAssignment>,
    pub totals: Nutrition,
    #[serde(default)]
    pub failures: Vec<SlotFailure>,
}

impl DayPlan {
    pub fn new(date: NaiveDate, day_number: u32, fasting_day: bool, calorie_target: f64) -> Self {
        Self {
            date,
            day_number,
            fasting_day,
            calorie_target,
            meals: Vec::new(),
            totals: Nutrition::default(),
            failures: Vec::new(),
        }
    }

    /// Recompute `totals` as the sum of every assignment's adjusted values.
    pub fn recompute_totals(&mut self) {
        let mut totals = Nutrition::default();
        for meal in &self.meals {
            totals.accumulate(&meal.adjusted);
        }
        self.totals = totals;
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&MealAssignment> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub ingredient_id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCategory {
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub week_number: u32,
    pub categories: Vec<ShoppingCategory>,
}

impl ShoppingList {
    pub fn items(&self) -> impl Iterator<Item = &ShoppingItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Total for one ingredient in one unit, summed across categories.
    pub fn amount_of(&self, ingredient_id: &str, unit: &str) -> f64 {
        self.items()
            .filter(|i| i.ingredient_id.eq_ignore_ascii_case(ingredient_id) && i.unit == unit)
            .map(|i| i.amount)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionalDeficiency {
    pub nutrient: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub severity: Severity,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyNutrition {
    pub days: u32,
    /// Mean of the daily totals.
    pub daily_average: Nutrition,
    pub weekly_totals: Nutrition,
    pub deficiencies: Vec<NutritionalDeficiency>,
    /// Nutrients meeting their target, best coverage first.
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week_number: u32,
    pub days: Vec<DayPlan>,
    pub shopping_list: ShoppingList,
    pub weekly_nutrition: WeeklyNutrition,
}

impl WeekPlan {
    pub fn assignments(&self) -> impl Iterator<Item = &MealAssignment> {
        self.days.iter().flat_map(|d| d.meals.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path such as `week1.day3.lunch`.
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Generated,
    Validated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_profile: UserProfile,
    pub dietary_approach: DietaryApproach,
    pub energy_needs: EnergyNeeds,
    pub macro_targets: MacroTargets,
    pub weeks: Vec<WeekPlan>,
    pub excluded_ingredients: Vec<String>,
    pub allergies: Vec<String>,
    pub status: PlanStatus,
    pub validation: ValidationReport,
}

impl MealPlan {
    pub fn days(&self) -> impl Iterator<Item = &DayPlan> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn assignment_count(&self) -> usize {
        self.days().map(|d| d.meals.len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.days().map(|d| d.failures.len()).sum()
    }
}
