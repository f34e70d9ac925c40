use std::cmp::Ordering;

use crate::config::PlannerConfig;
use crate::models::{Ingredient, Nutrition, Recipe, RecipeScore, SlotTarget, Substitution};
use crate::planner::constants::{REASON_THRESHOLD, VARIETY_UNUSED};

/// One axis of macro alignment, 0-100.
///
/// A zero target is met only by a zero value.
fn alignment(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return if value <= 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 - (value - target).abs() / target * 100.0).max(0.0)
}

/// Mean alignment of calories, protein, carbs and fat against the slot target.
pub fn macro_alignment(per_serving: &Nutrition, target: &SlotTarget) -> f64 {
    let axes = [
        alignment(per_serving.calories, target.calories),
        alignment(per_serving.protein, target.protein),
        alignment(per_serving.carbs, target.carbs),
        alignment(per_serving.fat, target.fat),
    ];
    axes.iter().sum::<f64>() / axes.len() as f64
}

/// 100 minus `penalty` per ingredient matching an excluded tag or id, floored at 0.
pub fn ingredient_compatibility(
    ingredients: &[&Ingredient],
    excluded: &[String],
    penalty: f64,
) -> f64 {
    let violations = ingredients
        .iter()
        .filter(|i| {
            i.is_excluded_by(excluded)
                || excluded.iter().any(|e| e.trim().eq_ignore_ascii_case(&i.id))
        })
        .count();
    (100.0 - penalty * violations as f64).max(0.0)
}

/// Faster is better within budget (never below 50); over budget drops linearly to 0.
pub fn time_compatibility(total_minutes: u32, budget_minutes: u32) -> f64 {
    if budget_minutes == 0 {
        return if total_minutes == 0 { 100.0 } else { 0.0 };
    }
    let total = total_minutes as f64;
    let budget = budget_minutes as f64;
    if total <= budget {
        100.0 - (total / budget) * 50.0
    } else {
        (100.0 - (total - budget) / budget * 100.0).max(0.0)
    }
}

pub fn variety(already_used: bool, used_score: f64) -> f64 {
    if already_used { used_score } else { VARIETY_UNUSED }
}

/// Inputs shared by every candidate of one slot.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub target: &'a SlotTarget,
    pub excluded: &'a [String],
    pub config: &'a PlannerConfig,
}

/// Score a recipe on all four axes.
///
/// `ingredients` are the resolved ingredients the recipe will actually use,
/// after substitutions.
pub fn score_recipe(
    recipe: &Recipe,
    ingredients: &[&Ingredient],
    already_used: bool,
    ctx: &ScoringContext<'_>,
) -> RecipeScore {
    let macro_alignment = macro_alignment(&recipe.per_serving(), ctx.target);
    let ingredient_compatibility =
        ingredient_compatibility(ingredients, ctx.excluded, ctx.config.exclusion_penalty);
    let time_compatibility =
        time_compatibility(recipe.total_time_minutes(), ctx.config.max_total_minutes());
    let variety = variety(already_used, ctx.config.used_variety_score);
    let overall = (macro_alignment + ingredient_compatibility + time_compatibility + variety) / 4.0;

    RecipeScore {
        macro_alignment,
        ingredient_compatibility,
        time_compatibility,
        variety,
        overall,
    }
}

/// Human-readable reasons for a pick, one per strong axis.
pub fn score_reasons(score: &RecipeScore) -> Vec<String> {
    let mut reasons = Vec::new();
    if score.macro_alignment > REASON_THRESHOLD {
        reasons.push("Good macro alignment".to_string());
    }
    if score.ingredient_compatibility > REASON_THRESHOLD {
        reasons.push("Compatible ingredients".to_string());
    }
    if score.time_compatibility > REASON_THRESHOLD {
        reasons.push("Quick to prepare".to_string());
    }
    if score.variety > REASON_THRESHOLD {
        reasons.push("Adds variety".to_string());
    }
    reasons
}

/// A candidate that survived the hard filters, with its score.
#[derive(Debug, Clone)]
pub struct ScoredRecipe<'a> {
    pub recipe: &'a Recipe,
    pub score: RecipeScore,
    pub substitutions: Vec<Substitution>,
}

/// Overall descending, then total time ascending, then id ascending.
pub fn rank_order(a: &ScoredRecipe<'_>, b: &ScoredRecipe<'_>) -> Ordering {
    b.score
        .overall
        .total_cmp(&a.score.overall)
        .then_with(|| {
            a.recipe
                .total_time_minutes()
                .cmp(&b.recipe.total_time_minutes())
        })
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}

pub fn rank(candidates: &mut [ScoredRecipe<'_>]) {
    candidates.sort_by(rank_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IngredientCategory, MealType, RecipeIngredient};

    fn target() -> SlotTarget {
        SlotTarget {
            meal_type: MealType::Lunch,
            calories: 600.0,
            protein: 45.0,
            carbs: 7.5,
            fat: 43.0,
        }
    }

    fn recipe(id: &str, calories: f64, prep: u32, cook: u32) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            ingredients: vec![RecipeIngredient::new("egg", 2.0, "stk")],
            prep_time_minutes: prep,
            cook_time_minutes: cook,
            servings: 1,
            categories: vec![MealType::Lunch],
            dietary_approach_ids: vec!["keto".to_string()],
            nutrition_per_100g: Nutrition::new(calories, 45.0, 7.5, 43.0),
            nutrition_per_serving: None,
            serving_weight_grams: None,
        }
    }

    #[test]
    fn test_exact_match_scores_100() {
        let exact = Nutrition::new(600.0, 45.0, 7.5, 43.0);
        assert!((macro_alignment(&exact, &target()) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_alignment_decreases_with_divergence() {
        let t = target();
        let mut previous = 100.0;
        for calories in [620.0, 700.0, 900.0, 1150.0] {
            let n = Nutrition::new(calories, 45.0, 7.5, 43.0);
            let score = macro_alignment(&n, &t);
            assert!(score < previous);
            previous = score;
        }
        // Calorie axis floors at 0, the other three stay at 100.
        let far = Nutrition::new(5000.0, 45.0, 7.5, 43.0);
        assert!((macro_alignment(&far, &t) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_target_axis() {
        assert_eq!(alignment(0.0, 0.0), 100.0);
        assert_eq!(alignment(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_exclusion_penalty_floors_at_zero() {
        let mut bacon = Ingredient::new("bacon", "Bacon", IngredientCategory::Protein);
        bacon.exclusion_tags.insert("pork".to_string());
        let egg = Ingredient::new("egg", "Æg", IngredientCategory::Protein);
        let excluded = vec!["pork".to_string()];

        assert_eq!(ingredient_compatibility(&[&egg], &excluded, 20.0), 100.0);
        assert_eq!(ingredient_compatibility(&[&bacon, &egg], &excluded, 20.0), 80.0);
        let many = vec![&bacon; 6];
        assert_eq!(ingredient_compatibility(&many, &excluded, 20.0), 0.0);
        // Excluding by id works too.
        assert_eq!(ingredient_compatibility(&[&egg], &["EGG".to_string()], 20.0), 80.0);
    }

    #[test]
    fn test_time_compatibility() {
        assert_eq!(time_compatibility(0, 90), 100.0);
        assert_eq!(time_compatibility(45, 90), 75.0);
        assert_eq!(time_compatibility(90, 90), 50.0);
        assert_eq!(time_compatibility(135, 90), 50.0);
        assert_eq!(time_compatibility(180, 90), 0.0);
        assert_eq!(time_compatibility(500, 90), 0.0);
    }

    #[test]
    fn test_ranking_tie_breaks() {
        let config = PlannerConfig::default();
        let t = target();
        let ctx = ScoringContext {
            target: &t,
            excluded: &[],
            config: &config,
        };
        let slow = recipe("a-slow", 600.0, 20, 40);
        let fast_b = recipe("b-fast", 600.0, 10, 10);
        let fast_a = recipe("a-fast", 600.0, 10, 10);
        let egg = Ingredient::new("egg", "Æg", IngredientCategory::Protein);

        let mut candidates: Vec<ScoredRecipe> = [&slow, &fast_b, &fast_a]
            .into_iter()
            .map(|r| ScoredRecipe {
                recipe: r,
                score: score_recipe(r, &[&egg], false, &ctx),
                substitutions: Vec::new(),
            })
            .collect();
        // Force an overall tie so only time and id decide.
        for c in candidates.iter_mut() {
            c.score.overall = 80.0;
        }
        rank(&mut candidates);
        let order: Vec<&str> = candidates.iter().map(|c| c.recipe.id.as_str()).collect();
        assert_eq!(order, vec!["a-fast", "b-fast", "a-slow"]);
    }

    #[test]
    fn test_used_recipe_loses_variety() {
        let config = PlannerConfig::default();
        let t = target();
        let ctx = ScoringContext {
            target: &t,
            excluded: &[],
            config: &config,
        };
        let r = recipe("r", 600.0, 10, 10);
        let fresh = score_recipe(&r, &[], false, &ctx);
        let reused = score_recipe(&r, &[], true, &ctx);
        assert_eq!(fresh.variety, 100.0);
        assert_eq!(reused.variety, 50.0);
        assert!((fresh.overall - reused.overall - 12.5).abs() < 1e-9);
        assert!(score_reasons(&fresh).contains(&"Adds variety".to_string()));
    }
}
