pub mod diet;
pub mod ingredient;
pub mod plan;
pub mod profile;
pub mod recipe;

pub use diet::{
    canonical_approach_id, DietaryApproach, FastingPeriod, FoodCategory, FoodRestriction,
    MacroRatio, MealDistribution, MealStructure, MealType, NutritionalPriority, PercentRange,
    Strictness, APPROACH_ALIASES,
};
pub use ingredient::{Ingredient, IngredientCategory, Nutrition};
pub use plan::{
    DayPlan, EnergyNeeds, MacroTargets, MealAssignment, MealPlan, NutritionalDeficiency,
    PlanStatus, RecipeScore, Severity, ShoppingCategory, ShoppingItem, ShoppingList, SlotFailure,
    SlotTarget, Substitution, ValidationIssue, ValidationReport, WeekPlan, WeeklyNutrition,
};
pub use profile::{ActivityLevel, Gender, UserProfile, WeightGoal};
pub use recipe::{Recipe, RecipeIngredient};
