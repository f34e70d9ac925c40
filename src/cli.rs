use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::interface::PartialProfile;
use crate::models::{ActivityLevel, Gender, WeightGoal};

/// MealPlanner: personalized meal plans for a dietary approach.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Profile fields. Anything left out is asked for interactively.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// male or female.
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// Height in centimetres.
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kilograms.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Activity level name (e.g. moderately-active) or multiplier (e.g. 1.55).
    #[arg(long)]
    pub activity: Option<ActivityLevel>,

    /// weight-loss, maintenance or muscle-gain.
    #[arg(long)]
    pub goal: Option<WeightGoal>,
}

impl ProfileArgs {
    pub fn to_partial(&self) -> PartialProfile {
        PartialProfile {
            gender: self.gender,
            age_years: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity,
            goal: self.goal,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a meal plan.
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Dietary approach id (fuzzy matched; prompted if omitted).
        #[arg(short, long)]
        approach: Option<String>,

        /// Path to the recipe catalog JSON file.
        #[arg(long, default_value = "recipes.json")]
        recipes: String,

        /// Path to the ingredient registry JSON file.
        #[arg(long, default_value = "ingredients.json")]
        ingredients: String,

        /// Path to a planner config JSON file.
        #[arg(short, long)]
        config: Option<String>,

        /// Exclusion tags or ingredient ids, comma separated.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Allergen tags, comma separated.
        #[arg(long, value_delimiter = ',')]
        allergy: Vec<String>,

        /// Number of days to plan.
        #[arg(short, long, default_value_t = 7)]
        days: u32,

        /// Fasting weekday indices (0 = first day of each week), comma separated.
        #[arg(long, value_delimiter = ',')]
        fasting_days: Vec<u32>,

        /// First plan date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Write the full plan as JSON.
        #[arg(short, long)]
        output: Option<String>,

        /// Write the shopping lists as CSV.
        #[arg(long)]
        shopping_csv: Option<String>,

        /// Pick randomly among the top candidates with this seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Candidate pool size for seeded selection.
        #[arg(long, default_value_t = 3)]
        top_n: usize,
    },

    /// Show BMR, TDEE, calorie target and macro grams.
    Energy {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Dietary approach id for macro grams.
        #[arg(short, long)]
        approach: Option<String>,

        /// Goal weight in kilograms, for a timeline estimate.
        #[arg(long)]
        target_weight: Option<f64>,
    },

    /// List the available dietary approaches.
    Diets,
}

impl Default for Command {
    fn default() -> Self {
        Command::Diets
    }
}
