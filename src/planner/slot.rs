use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{PlannerConfig, SelectionStrategy};
use crate::error::{PlanError, Result};
use crate::models::{
    DietaryApproach, Ingredient, MealAssignment, Recipe, SlotTarget, Substitution,
};
use crate::planner::index::IngredientIndex;
use crate::planner::scoring::{rank, score_recipe, ScoredRecipe, ScoringContext};

/// Recipe ids already assigned in a generation run, lowercase.
#[derive(Debug, Clone, Default)]
pub struct UsedRecipes {
    ids: HashSet<String>,
}

impl UsedRecipes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.ids.contains(&recipe_id.to_lowercase())
    }

    pub fn mark(&mut self, recipe_id: &str) {
        self.ids.insert(recipe_id.to_lowercase());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Everything needed to fill one (day, meal type) slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest<'a> {
    pub target: SlotTarget,
    pub approach: &'a DietaryApproach,
    pub excluded: &'a [String],
    pub allergies: &'a [String],
    /// Pre-fetched catalog results for this meal type.
    pub candidates: &'a [Recipe],
    /// Recipe ids already placed on the same day.
    pub same_day: &'a [String],
    /// Recipe id that must not be picked (slot regeneration).
    pub avoid: Option<&'a str>,
}

/// Why candidates were dropped before scoring.
#[derive(Debug, Default)]
struct FilterTally {
    wrong_approach: usize,
    unresolved: usize,
    allergen: usize,
    eliminated: usize,
    carb_cap: usize,
}

impl FilterTally {
    fn describe(&self, total: usize) -> String {
        if total == 0 {
            return "catalog has no recipes for this meal type".to_string();
        }
        format!(
            "{} candidates, {} wrong approach, {} unresolved, {} allergen, {} eliminated, \
             {} over carb cap",
            total,
            self.wrong_approach,
            self.unresolved,
            self.allergen,
            self.eliminated,
            self.carb_cap
        )
    }
}

/// Ingredients a recipe will actually use once restrictions are applied.
struct Adapted<'i> {
    ingredients: Vec<&'i Ingredient>,
    substitutions: Vec<Substitution>,
}

enum Verdict<'i> {
    Eligible(Adapted<'i>),
    Unresolved,
    Allergen,
    Eliminated,
}

/// Picks one recipe per slot and solves its serving multiplier.
pub struct SlotFiller<'a> {
    index: &'a IngredientIndex,
    config: &'a PlannerConfig,
    rng: Option<StdRng>,
}

impl<'a> SlotFiller<'a> {
    pub fn new(index: &'a IngredientIndex, config: &'a PlannerConfig) -> Self {
        let rng = match config.selection {
            SelectionStrategy::Best => None,
            SelectionStrategy::SeededTopN { seed, .. } => Some(StdRng::seed_from_u64(seed)),
        };
        Self { index, config, rng }
    }

    fn is_allergen_free(ingredient: &Ingredient, allergies: &[String]) -> bool {
        !ingredient.triggers_allergy(allergies)
    }

    /// Apply allergen and eliminate-strictness rules to one recipe.
    fn adapt(
        &self,
        recipe: &Recipe,
        approach: &DietaryApproach,
        allergies: &[String],
    ) -> Verdict<'a> {
        let index: &'a IngredientIndex = self.index;
        let mut adapted = Adapted {
            ingredients: Vec::with_capacity(recipe.ingredients.len()),
            substitutions: Vec::new(),
        };

        for item in &recipe.ingredients {
            let Some(ingredient) = index.get(&item.ingredient_id) else {
                return Verdict::Unresolved;
            };
            if !Self::is_allergen_free(ingredient, allergies) {
                return Verdict::Allergen;
            }

            let Some(restriction) = approach.eliminating_restriction(ingredient) else {
                adapted.ingredients.push(ingredient);
                continue;
            };

            if item.optional {
                adapted.substitutions.push(Substitution {
                    original_ingredient_id: ingredient.id.clone(),
                    replacement_ingredient_id: None,
                    reason: format!("omitted: {}", restriction.reason),
                });
                continue;
            }

            let replacement = restriction.alternatives.iter().find_map(|alt| {
                index.get(alt).filter(|candidate| {
                    approach.eliminating_restriction(candidate).is_none()
                        && Self::is_allergen_free(candidate, allergies)
                })
            });
            match replacement {
                Some(substitute) => {
                    adapted.substitutions.push(Substitution {
                        original_ingredient_id: ingredient.id.clone(),
                        replacement_ingredient_id: Some(substitute.id.clone()),
                        reason: restriction.reason.clone(),
                    });
                    adapted.ingredients.push(substitute);
                }
                None => return Verdict::Eliminated,
            }
        }

        Verdict::Eligible(adapted)
    }

    /// Hard filters, scoring and ranking. Best candidate first.
    pub fn ranked_candidates<'r>(
        &self,
        request: &SlotRequest<'r>,
        used: &UsedRecipes,
    ) -> Result<Vec<ScoredRecipe<'r>>> {
        let approach = request.approach;
        let ctx = ScoringContext {
            target: &request.target,
            excluded: request.excluded,
            config: self.config,
        };
        let mut tally = FilterTally::default();
        let mut scored = Vec::new();

        for recipe in request.candidates {
            if !recipe.supports_approach(&approach.id)
                || !recipe.fits_meal(request.target.meal_type)
            {
                tally.wrong_approach += 1;
                continue;
            }
            if request
                .avoid
                .is_some_and(|id| recipe.id.eq_ignore_ascii_case(id))
            {
                continue;
            }
            if self.index.is_skipped(recipe) {
                tally.unresolved += 1;
                continue;
            }
            if let Some(cap) = approach.max_carbs_per_100g {
                if recipe.nutrition_per_100g.carbs > cap {
                    tally.carb_cap += 1;
                    continue;
                }
            }

            let adapted = match self.adapt(recipe, approach, request.allergies) {
                Verdict::Eligible(adapted) => adapted,
                Verdict::Unresolved => {
                    tally.unresolved += 1;
                    continue;
                }
                Verdict::Allergen => {
                    tally.allergen += 1;
                    continue;
                }
                Verdict::Eliminated => {
                    tally.eliminated += 1;
                    continue;
                }
            };

            let already_used = used.contains(&recipe.id);
            let score = score_recipe(recipe, &adapted.ingredients, already_used, &ctx);
            scored.push(ScoredRecipe {
                recipe,
                score,
                substitutions: adapted.substitutions,
            });
        }

        if scored.is_empty() {
            return Err(PlanError::NoEligibleRecipe {
                meal_type: request.target.meal_type,
                reason: tally.describe(request.candidates.len()),
            });
        }

        rank(&mut scored);
        Ok(scored)
    }

    /// Index of the pick within the ranked list.
    fn select(&mut self, ranked: &[ScoredRecipe<'_>], same_day: &[String]) -> usize {
        let (n, rng) = match (self.config.selection, self.rng.as_mut()) {
            (SelectionStrategy::SeededTopN { n, .. }, Some(rng)) => (n.max(1), rng),
            _ => return 0,
        };

        let fresh: Vec<usize> = ranked
            .iter()
            .enumerate()
            .filter(|(_, c)| !same_day.iter().any(|id| c.recipe.id.eq_ignore_ascii_case(id)))
            .map(|(i, _)| i)
            .take(n)
            .collect();
        let pool: Vec<usize> = if fresh.is_empty() {
            (0..ranked.len().min(n)).collect()
        } else {
            fresh
        };
        pool[rng.gen_range(0..pool.len())]
    }

    /// Serving multiplier that brings one serving closest to the slot's calories.
    pub fn serving_multiplier(&self, target_calories: f64, serving_calories: f64) -> f64 {
        if serving_calories <= 0.0 || target_calories <= 0.0 {
            return 1.0;
        }
        let raw = (target_calories / serving_calories).clamp(
            self.config.min_serving_multiplier,
            self.config.max_serving_multiplier,
        );
        (raw * 10.0).round() / 10.0
    }

    /// Fill one slot and mark the chosen recipe as used.
    pub fn fill(
        &mut self,
        request: &SlotRequest<'_>,
        used: &mut UsedRecipes,
    ) -> Result<MealAssignment> {
        let ranked = self.ranked_candidates(request, used)?;
        let pick = self.select(&ranked, request.same_day);
        let chosen = &ranked[pick];

        let per_serving = chosen.recipe.per_serving();
        let multiplier = self.serving_multiplier(request.target.calories, per_serving.calories);
        debug!(
            meal = %request.target.meal_type,
            recipe = %chosen.recipe.id,
            overall = chosen.score.overall,
            multiplier,
            candidates = ranked.len(),
            "slot filled"
        );

        used.mark(&chosen.recipe.id);
        Ok(MealAssignment {
            meal_type: request.target.meal_type,
            recipe: chosen.recipe.clone(),
            serving_multiplier: multiplier,
            adjusted: per_serving.scaled(multiplier),
            substitutions: chosen.substitutions.clone(),
            score: chosen.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diets::builtin;
    use crate::models::{IngredientCategory, MealType, Nutrition, RecipeIngredient};

    fn ingredient(id: &str, category: IngredientCategory) -> Ingredient {
        Ingredient::new(id, id, category)
    }

    fn index() -> IngredientIndex {
        let mut peanut = ingredient("peanut", IngredientCategory::Nut);
        peanut.allergen_tags.insert("peanut".to_string());
        let mut bacon = ingredient("bacon", IngredientCategory::Protein);
        bacon.exclusion_tags.insert("pork".to_string());
        IngredientIndex::new(vec![
            ingredient("egg", IngredientCategory::Protein),
            ingredient("rice", IngredientCategory::Grain),
            ingredient("bread", IngredientCategory::Grain),
            ingredient("cauliflower-rice", IngredientCategory::Vegetable),
            ingredient("honey", IngredientCategory::Sweetener),
            peanut,
            bacon,
        ])
    }

    fn recipe(id: &str, kcal: f64, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            ingredients,
            prep_time_minutes: 10,
            cook_time_minutes: 15,
            servings: 1,
            categories: vec![MealType::Lunch],
            dietary_approach_ids: vec!["keto".to_string()],
            nutrition_per_100g: Nutrition::new(kcal, 20.0, 4.0, 22.0),
            nutrition_per_serving: None,
            serving_weight_grams: None,
        }
    }

    fn lunch_target() -> SlotTarget {
        SlotTarget {
            meal_type: MealType::Lunch,
            calories: 600.0,
            protein: 45.0,
            carbs: 7.5,
            fat: 43.3,
        }
    }

    fn request<'a>(
        approach: &'a DietaryApproach,
        candidates: &'a [Recipe],
        allergies: &'a [String],
        excluded: &'a [String],
    ) -> SlotRequest<'a> {
        SlotRequest {
            target: lunch_target(),
            approach,
            excluded,
            allergies,
            candidates,
            same_day: &[],
            avoid: None,
        }
    }

    #[test]
    fn test_serving_multiplier_example() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let candidates = vec![recipe(
            "eggs",
            280.0,
            vec![RecipeIngredient::new("egg", 3.0, "stk")],
        )];
        let mut filler = SlotFiller::new(&index, &config);
        let mut used = UsedRecipes::new();

        let assignment = filler
            .fill(&request(&keto, &candidates, &[], &[]), &mut used)
            .unwrap();
        assert!((assignment.serving_multiplier - 2.1).abs() < 1e-9);
        assert!((assignment.adjusted.calories - 588.0).abs() < 1e-6);
        assert!(used.contains("EGGS"));
    }

    #[test]
    fn test_multiplier_clamps() {
        let index = index();
        let config = PlannerConfig::default();
        let filler = SlotFiller::new(&index, &config);
        assert_eq!(filler.serving_multiplier(600.0, 2000.0), 0.5);
        assert_eq!(filler.serving_multiplier(600.0, 50.0), 3.0);
        assert_eq!(filler.serving_multiplier(600.0, 0.0), 1.0);
    }

    #[test]
    fn test_allergen_recipe_never_chosen() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let mut satay = recipe("satay", 600.0, vec![RecipeIngredient::new("peanut", 50.0, "g")]);
        satay.nutrition_per_100g = Nutrition::new(600.0, 45.0, 7.5, 43.3);
        let eggs = recipe("eggs", 300.0, vec![RecipeIngredient::new("egg", 3.0, "stk")]);
        let candidates = vec![satay, eggs];
        let allergies = vec!["Peanut".to_string()];
        let mut filler = SlotFiller::new(&index, &config);

        let assignment = filler
            .fill(&request(&keto, &candidates, &allergies, &[]), &mut UsedRecipes::new())
            .unwrap();
        assert_eq!(assignment.recipe.id, "eggs");
    }

    #[test]
    fn test_grain_substituted_or_eliminated() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let candidates = vec![recipe(
            "fried-rice",
            500.0,
            vec![
                RecipeIngredient::new("egg", 2.0, "stk"),
                RecipeIngredient::new("rice", 150.0, "g"),
            ],
        )];
        let mut filler = SlotFiller::new(&index, &config);

        let assignment = filler
            .fill(&request(&keto, &candidates, &[], &[]), &mut UsedRecipes::new())
            .unwrap();
        assert_eq!(assignment.substitutions.len(), 1);
        assert_eq!(
            assignment.substitutions[0].replacement_ingredient_id.as_deref(),
            Some("cauliflower-rice")
        );

        // Sugars have no alternative under keto.
        let candidates = vec![recipe(
            "honey-glaze",
            500.0,
            vec![RecipeIngredient::new("honey", 20.0, "g")],
        )];
        let result = filler.fill(&request(&keto, &candidates, &[], &[]), &mut UsedRecipes::new());
        assert!(matches!(
            result,
            Err(PlanError::NoEligibleRecipe { meal_type: MealType::Lunch, .. })
        ));
    }

    #[test]
    fn test_optional_eliminated_ingredient_is_dropped() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let mut honey = RecipeIngredient::new("honey", 10.0, "g");
        honey.optional = true;
        let candidates = vec![recipe(
            "eggs-honey",
            400.0,
            vec![RecipeIngredient::new("egg", 3.0, "stk"), honey],
        )];
        let mut filler = SlotFiller::new(&index, &config);
        let assignment = filler
            .fill(&request(&keto, &candidates, &[], &[]), &mut UsedRecipes::new())
            .unwrap();
        assert_eq!(assignment.substitutions[0].replacement_ingredient_id, None);
    }

    #[test]
    fn test_excluded_tag_lowers_score_but_keeps_recipe() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let candidates = vec![recipe(
            "bacon-eggs",
            600.0,
            vec![
                RecipeIngredient::new("bacon", 50.0, "g"),
                RecipeIngredient::new("egg", 2.0, "stk"),
            ],
        )];
        let excluded = vec!["pork".to_string()];
        let mut filler = SlotFiller::new(&index, &config);
        let assignment = filler
            .fill(&request(&keto, &candidates, &[], &excluded), &mut UsedRecipes::new())
            .unwrap();
        assert_eq!(assignment.score.ingredient_compatibility, 80.0);
    }

    #[test]
    fn test_keto_carb_cap() {
        let index = index();
        let config = PlannerConfig::default();
        let keto = builtin::keto();
        let mut starchy = recipe("starchy", 600.0, vec![RecipeIngredient::new("egg", 1.0, "stk")]);
        starchy.nutrition_per_100g.carbs = 25.0;
        let candidates = vec![starchy];
        let mut filler = SlotFiller::new(&index, &config);
        let err = filler
            .fill(&request(&keto, &candidates, &[], &[]), &mut UsedRecipes::new())
            .unwrap_err();
        assert!(err.to_string().contains("1 over carb cap"));
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let index = index();
        let config = PlannerConfig {
            selection: SelectionStrategy::SeededTopN { n: 3, seed: 42 },
            ..Default::default()
        };
        let keto = builtin::keto();
        let candidates: Vec<Recipe> = (0..6)
            .map(|i| {
                recipe(
                    &format!("r{}", i),
                    250.0 + i as f64 * 40.0,
                    vec![RecipeIngredient::new("egg", 2.0, "stk")],
                )
            })
            .collect();

        let picks = |config: &PlannerConfig| {
            let mut filler = SlotFiller::new(&index, config);
            let mut used = UsedRecipes::new();
            (0..5)
                .map(|_| {
                    filler
                        .fill(&request(&keto, &candidates, &[], &[]), &mut used)
                        .unwrap()
                        .recipe
                        .id
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(&config), picks(&config));
    }
}
