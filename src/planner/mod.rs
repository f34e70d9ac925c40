pub mod assembler;
pub mod constants;
pub mod energy;
pub mod index;
pub mod nutrition;
pub mod scoring;
pub mod shopping;
pub mod slot;
pub mod units;
pub mod validation;

pub use assembler::{
    evenly_spaced_fasting_days, FastingDaySpec, MealPlanner, PlanRequest, DAYS_PER_WEEK,
    DEFAULT_HORIZON_DAYS,
};
pub use energy::{
    approach_macro_targets, bmi, bmi_category, bmr, energy_needs, ideal_weight_range,
    macro_targets_from_calories, slot_target, tdee, validate_macro_ratio,
    weight_change_timeline, BmiCategory, WeightTimeline,
};
pub use index::IngredientIndex;
pub use nutrition::weekly_nutrition;
pub use scoring::{score_recipe, ScoredRecipe, ScoringContext};
pub use shopping::build_shopping_list;
pub use slot::{SlotFiller, SlotRequest, UsedRecipes};
pub use validation::{validate_weeks, CalorieGoal};
