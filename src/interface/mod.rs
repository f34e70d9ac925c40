pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, fuzzy_approach_matches, prompt_approach, prompt_list, prompt_yes_no,
    resolve_approach, split_list, PartialProfile,
};
pub use render::{
    display_approaches, display_body_metrics, display_energy, display_meal_plan,
    display_shopping_list, display_validation, display_weekly_nutrition,
};
