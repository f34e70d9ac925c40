use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::diets::DietaryApproachRegistry;
use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, DietaryApproach, Gender, UserProfile, WeightGoal};

/// Similarity above which an approach is offered as a match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Profile fields given on the command line; `None` fields are prompted for.
#[derive(Debug, Clone, Default)]
pub struct PartialProfile {
    pub gender: Option<Gender>,
    pub age_years: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<WeightGoal>,
}

fn prompt_number<T: FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number '{}'", input.trim())))
}

pub fn prompt_gender() -> Result<Gender> {
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&["male", "female"])
        .default(0)
        .interact()?;
    Ok(if selection == 0 { Gender::Male } else { Gender::Female })
}

pub fn prompt_age() -> Result<u32> {
    prompt_number("Age (years)", "30")
}

pub fn prompt_height() -> Result<f64> {
    prompt_number("Height (cm)", "175")
}

pub fn prompt_weight() -> Result<f64> {
    prompt_number("Weight (kg)", "70")
}

pub fn prompt_activity_level() -> Result<ActivityLevel> {
    let options: Vec<String> = ActivityLevel::ALL
        .iter()
        .map(|a| format!("{:.3}  {}", a.multiplier(), a.description()))
        .collect();

    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(2)
        .interact()?;
    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal() -> Result<WeightGoal> {
    let goals = [
        WeightGoal::WeightLoss,
        WeightGoal::Maintenance,
        WeightGoal::MuscleGain,
    ];
    let labels: Vec<String> = goals.iter().map(|g| g.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&labels)
        .default(1)
        .interact()?;
    Ok(goals[selection])
}

/// Fill in whatever the command line left out.
pub fn collect_profile(partial: PartialProfile) -> Result<UserProfile> {
    let gender = match partial.gender {
        Some(g) => g,
        None => prompt_gender()?,
    };
    let age = match partial.age_years {
        Some(a) => a,
        None => prompt_age()?,
    };
    let height = match partial.height_cm {
        Some(h) => h,
        None => prompt_height()?,
    };
    let weight = match partial.weight_kg {
        Some(w) => w,
        None => prompt_weight()?,
    };
    let activity = match partial.activity_level {
        Some(a) => a,
        None => prompt_activity_level()?,
    };
    let goal = match partial.goal {
        Some(g) => g,
        None => prompt_goal()?,
    };

    Ok(UserProfile::new(gender, age, height, weight, activity, goal))
}

/// Approaches resembling `input` by id or name, best first.
pub fn fuzzy_approach_matches<'r>(
    registry: &'r DietaryApproachRegistry,
    input: &str,
) -> Vec<(&'r DietaryApproach, f64)> {
    let needle = input.trim().to_lowercase();
    let mut candidates: Vec<(&DietaryApproach, f64)> = registry
        .all()
        .into_iter()
        .map(|a| {
            let by_id = jaro_winkler(&a.id.to_lowercase(), &needle);
            let by_name = jaro_winkler(&a.name.to_lowercase(), &needle);
            (a, by_id.max(by_name))
        })
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
}

/// Resolve an approach id typed by the user, asking when it is not exact.
pub fn resolve_approach(registry: &DietaryApproachRegistry, input: &str) -> Result<String> {
    if let Ok(approach) = registry.get(input) {
        return Ok(approach.id.clone());
    }

    let candidates = fuzzy_approach_matches(registry, input);
    match candidates.as_slice() {
        [] => Err(PlanError::UnknownApproach(input.to_string())),
        [(approach, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}' ({})?", approach.id, approach.name))
                .default(true)
                .interact()?;
            if confirm {
                Ok(approach.id.clone())
            } else {
                Err(PlanError::UnknownApproach(input.to_string()))
            }
        }
        many => {
            let options: Vec<String> = many
                .iter()
                .take(5)
                .map(|(a, _)| format!("{} ({})", a.id, a.name))
                .collect();
            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                Ok(many[selection].0.id.clone())
            } else {
                Err(PlanError::UnknownApproach(input.to_string()))
            }
        }
    }
}

/// Pick an approach from the registry's list.
pub fn prompt_approach(registry: &DietaryApproachRegistry) -> Result<String> {
    let approaches = registry.all();
    let options: Vec<String> = approaches
        .iter()
        .map(|a| format!("{:<18} {}", a.id, a.name))
        .collect();
    let selection = Select::new()
        .with_prompt("Dietary approach")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(approaches[selection].id.clone())
}

/// Split a comma-separated answer into trimmed, non-empty entries.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn prompt_list(prompt: &str) -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(split_list(&input))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match_finds_typos() {
        let registry = DietaryApproachRegistry::new();
        let matches = fuzzy_approach_matches(&registry, "mediteranean");
        assert_eq!(matches[0].0.id, "mediterranean");
    }

    #[test]
    fn test_fuzzy_match_rejects_nonsense() {
        let registry = DietaryApproachRegistry::new();
        assert!(fuzzy_approach_matches(&registry, "qqqqqqqq").is_empty());
    }

    #[test]
    fn test_exact_and_alias_resolve_without_prompt() {
        let registry = DietaryApproachRegistry::new();
        assert_eq!(resolve_approach(&registry, "KETO").unwrap(), "keto");
        assert_eq!(resolve_approach(&registry, "balanced").unwrap(), "sense");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" pork, ,shellfish "), vec!["pork", "shellfish"]);
        assert!(split_list("").is_empty());
    }
}
