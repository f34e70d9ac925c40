//! Energy-balance formulas: BMR, TDEE, calorie targets and macro grams.
//!
//! Everything here is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{
    DietaryApproach, EnergyNeeds, Gender, MacroRatio, MacroTargets, MealDistribution, SlotTarget,
    UserProfile, WeightGoal,
};
use crate::planner::constants::*;

fn check_profile(profile: &UserProfile) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(profile.weight_kg) {
        return Err(PlanError::InvalidProfile(format!(
            "weight must be positive, got {}",
            profile.weight_kg
        )));
    }
    if !valid(profile.height_cm) {
        return Err(PlanError::InvalidProfile(format!(
            "height must be positive, got {}",
            profile.height_cm
        )));
    }
    if profile.age_years == 0 {
        return Err(PlanError::InvalidProfile("age must be positive".to_string()));
    }
    Ok(())
}

/// Mifflin-St Jeor basal metabolic rate (kcal/day).
pub fn bmr(profile: &UserProfile) -> Result<f64> {
    check_profile(profile)?;
    let base = 10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * profile.age_years as f64;
    Ok(match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    })
}

/// Total daily energy expenditure: BMR times the activity multiplier.
pub fn tdee(profile: &UserProfile) -> Result<f64> {
    Ok(bmr(profile)? * profile.activity_level.multiplier())
}

/// BMR, TDEE and the goal-adjusted calorie target.
///
/// `deficit` is `tdee - target`, rounded, so a surplus comes out negative.
pub fn energy_needs(profile: &UserProfile) -> Result<EnergyNeeds> {
    let bmr = bmr(profile)?;
    let tdee = bmr * profile.activity_level.multiplier();
    let raw_target = match profile.goal {
        WeightGoal::WeightLoss => tdee * WEIGHT_LOSS_FACTOR,
        WeightGoal::Maintenance => tdee,
        WeightGoal::MuscleGain => tdee * MUSCLE_GAIN_FACTOR,
    };
    Ok(EnergyNeeds {
        bmr,
        tdee,
        target_calories: raw_target.round(),
        deficit: (tdee - raw_target).round(),
    })
}

/// Gram targets for a calorie budget split by the ratio's target percentages.
pub fn macro_targets_from_calories(calories: f64, ratio: &MacroRatio) -> MacroTargets {
    let grams =
        |percent: f64, kcal_per_gram: f64| (calories * percent / 100.0 / kcal_per_gram).round();
    MacroTargets {
        calories,
        protein_grams: grams(ratio.protein.target, KCAL_PER_GRAM_PROTEIN),
        carb_grams: grams(ratio.carbohydrates.target, KCAL_PER_GRAM_CARBS),
        fat_grams: grams(ratio.fat.target, KCAL_PER_GRAM_FAT),
        protein_percent: ratio.protein.target,
        carb_percent: ratio.carbohydrates.target,
        fat_percent: ratio.fat.target,
    }
}

/// Whole-plan macro targets for a profile under an approach.
pub fn approach_macro_targets(
    profile: &UserProfile,
    approach: &DietaryApproach,
) -> Result<MacroTargets> {
    let needs = energy_needs(profile)?;
    Ok(macro_targets_from_calories(
        needs.target_calories,
        &approach.macro_ratio,
    ))
}

/// True iff the three target percentages sum to 98-102.
pub fn validate_macro_ratio(ratio: &MacroRatio) -> bool {
    let sum = ratio.target_sum();
    (MACRO_SUM_MIN..=MACRO_SUM_MAX).contains(&sum)
}

/// Per-slot target from a meal distribution, with calories scaled by `scale`.
///
/// Gram values are left unrounded so scoring compares like with like.
pub fn slot_target(distribution: &MealDistribution, scale: f64) -> SlotTarget {
    let calories = distribution.target_calories * scale;
    let ratio = &distribution.macro_distribution;
    SlotTarget {
        meal_type: distribution.meal_type,
        calories,
        protein: calories * ratio.protein.target / 100.0 / KCAL_PER_GRAM_PROTEIN,
        carbs: calories * ratio.carbohydrates.target / 100.0 / KCAL_PER_GRAM_CARBS,
        fat: calories * ratio.fat.target / 100.0 / KCAL_PER_GRAM_FAT,
    }
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    if meters <= 0.0 {
        return 0.0;
    }
    weight_kg / (meters * meters)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Healthy weight range in whole kilograms for a height.
pub fn ideal_weight_range(height_cm: f64) -> (f64, f64) {
    let meters = height_cm / 100.0;
    let squared = meters * meters;
    (
        (HEALTHY_BMI_MIN * squared).round(),
        (HEALTHY_BMI_MAX * squared).round(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTimeline {
    pub weeks: u32,
    /// Kilograms per week, two decimals.
    pub weekly_change_kg: f64,
}

/// Weeks to move from `current_kg` to `target_kg` at a daily calorie deficit.
///
/// A negative deficit is a surplus and moves weight up. Returns `None` when
/// the deficit is zero or points away from the target.
pub fn weight_change_timeline(
    current_kg: f64,
    target_kg: f64,
    daily_deficit: f64,
) -> Option<WeightTimeline> {
    let change = current_kg - target_kg;
    if change == 0.0 {
        return Some(WeightTimeline {
            weeks: 0,
            weekly_change_kg: 0.0,
        });
    }
    if daily_deficit == 0.0 || change.signum() != daily_deficit.signum() {
        return None;
    }
    let weekly_kcal = daily_deficit.abs() * 7.0;
    let weekly_kg = weekly_kcal / KCAL_PER_KG_BODY_WEIGHT;
    let weeks = (change.abs() * KCAL_PER_KG_BODY_WEIGHT / weekly_kcal).ceil();
    Some(WeightTimeline {
        weeks: weeks as u32,
        weekly_change_kg: (weekly_kg * 100.0).round() / 100.0,
    })
}
