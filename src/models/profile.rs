use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Biological sex, used only by the BMR formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Activity level for TDEE. Exactly five fixed multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    /// Accepts the kebab-case name or the multiplier itself ("1.55").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let by_name = match normalized.as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly-active" | "light" => Some(ActivityLevel::LightlyActive),
            "moderately-active" | "moderate" => Some(ActivityLevel::ModeratelyActive),
            "very-active" => Some(ActivityLevel::VeryActive),
            "extra-active" | "extremely-active" => Some(ActivityLevel::ExtraActive),
            _ => None,
        };
        if let Some(level) = by_name {
            return Ok(level);
        }

        normalized
            .parse::<f64>()
            .ok()
            .and_then(|m| {
                ActivityLevel::ALL
                    .into_iter()
                    .find(|level| (level.multiplier() - m).abs() < 1e-9)
            })
            .ok_or_else(|| format!("unknown activity level '{}'", s))
    }
}

/// What the calorie target should steer toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightGoal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl fmt::Display for WeightGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeightGoal::WeightLoss => "weight-loss",
            WeightGoal::Maintenance => "maintenance",
            WeightGoal::MuscleGain => "muscle-gain",
        };
        f.write_str(label)
    }
}

impl FromStr for WeightGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "weight-loss" | "lose" | "loss" => Ok(WeightGoal::WeightLoss),
            "maintenance" | "maintain" => Ok(WeightGoal::Maintenance),
            "muscle-gain" | "gain" => Ok(WeightGoal::MuscleGain),
            other => Err(format!("unknown goal '{}'", other)),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Physiology snapshot for one generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    /// Carried for display; no formula reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
}

impl UserProfile {
    pub fn new(
        gender: Gender,
        age_years: u32,
        height_cm: f64,
        weight_kg: f64,
        activity_level: ActivityLevel,
        goal: WeightGoal,
    ) -> Self {
        Self {
            gender,
            age_years,
            height_cm,
            weight_kg,
            activity_level,
            goal,
            body_fat_percent: None,
        }
    }
}
