use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::planner::constants::{
    CALORIE_TOLERANCE, DEFICIENCY_THRESHOLD, EXCLUSION_PENALTY, MAX_COOK_MINUTES,
    MAX_PREP_MINUTES, MAX_SERVING_MULTIPLIER, MIN_SERVING_MULTIPLIER,
    SEVERE_DEFICIENCY_THRESHOLD, VARIETY_USED,
};

/// Where a slot's calorie target comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotCalorieBasis {
    /// The approach's declared portion size for the meal.
    #[default]
    PortionSize,
    /// Portion sizes rescaled so a full day sums to the user's calorie target.
    ScaledToTarget,
}

/// What to do with a recipe that references an ingredient the registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownIngredientPolicy {
    #[default]
    Fail,
    SkipRecipe,
}

/// How the slot filler picks among ranked candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Always the top-ranked candidate.
    #[default]
    Best,
    /// Seeded random pick among the top `n`, preferring recipes not yet on the same day.
    SeededTopN { n: usize, seed: u64 },
}

/// Runtime-configurable planner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub max_prep_minutes: u32,
    pub max_cook_minutes: u32,
    pub min_serving_multiplier: f64,
    pub max_serving_multiplier: f64,
    pub exclusion_penalty: f64,
    pub used_variety_score: f64,
    /// Fractional deviation of a day's calories before a warning is raised.
    pub calorie_tolerance: f64,
    pub deficiency_threshold: f64,
    pub severe_deficiency_threshold: f64,
    pub slot_calorie_basis: SlotCalorieBasis,
    pub include_optional_meals: bool,
    pub unknown_ingredients: UnknownIngredientPolicy,
    pub selection: SelectionStrategy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_prep_minutes: MAX_PREP_MINUTES,
            max_cook_minutes: MAX_COOK_MINUTES,
            min_serving_multiplier: MIN_SERVING_MULTIPLIER,
            max_serving_multiplier: MAX_SERVING_MULTIPLIER,
            exclusion_penalty: EXCLUSION_PENALTY,
            used_variety_score: VARIETY_USED,
            calorie_tolerance: CALORIE_TOLERANCE,
            deficiency_threshold: DEFICIENCY_THRESHOLD,
            severe_deficiency_threshold: SEVERE_DEFICIENCY_THRESHOLD,
            slot_calorie_basis: SlotCalorieBasis::default(),
            include_optional_meals: true,
            unknown_ingredients: UnknownIngredientPolicy::default(),
            selection: SelectionStrategy::default(),
        }
    }
}

impl PlannerConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn max_total_minutes(&self) -> u32 {
        self.max_prep_minutes.saturating_add(self.max_cook_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_total_minutes() == 0 {
            return Err(PlanError::InvalidInput(
                "time budget must be positive".to_string(),
            ));
        }
        if !(self.min_serving_multiplier > 0.0
            && self.min_serving_multiplier <= self.max_serving_multiplier)
        {
            return Err(PlanError::InvalidInput(format!(
                "serving bounds {}..{} are not a positive range",
                self.min_serving_multiplier, self.max_serving_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.severe_deficiency_threshold)
            || self.severe_deficiency_threshold > self.deficiency_threshold
        {
            return Err(PlanError::InvalidInput(
                "deficiency thresholds must satisfy 0 <= severe <= threshold".to_string(),
            ));
        }
        if let SelectionStrategy::SeededTopN { n: 0, .. } = self.selection {
            return Err(PlanError::InvalidInput(
                "seeded selection needs n >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Format the settings as a compact string for display.
    pub fn display(&self) -> String {
        format!(
            "time<={}+{}min serving={:.1}..{:.1} tol={:.0}% basis={:?} selection={:?}",
            self.max_prep_minutes,
            self.max_cook_minutes,
            self.min_serving_multiplier,
            self.max_serving_multiplier,
            self.calorie_tolerance * 100.0,
            self.slot_calorie_basis,
            self.selection
        )
    }
}
