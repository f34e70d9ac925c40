use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::catalog::IngredientRegistry;
use crate::config::UnknownIngredientPolicy;
use crate::error::{PlanError, Result};
use crate::models::{DietaryApproach, Ingredient, Recipe};

/// Ingredients resolved once per run, keyed by lowercase id.
///
/// Also remembers recipes dropped because an ingredient could not be resolved.
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    ingredients: HashMap<String, Ingredient>,
    skipped_recipes: HashSet<String>,
}

impl IngredientIndex {
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut index = Self::default();
        for ingredient in ingredients {
            index.insert(ingredient);
        }
        index
    }

    pub fn insert(&mut self, ingredient: Ingredient) {
        self.ingredients.insert(ingredient.key(), ingredient);
    }

    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(&id.to_lowercase())
    }

    pub fn is_skipped(&self, recipe: &Recipe) -> bool {
        self.skipped_recipes.contains(&recipe.key())
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Resolve every ingredient the recipes reference, plus the approach's
    /// restriction alternatives.
    ///
    /// Unknown recipe ingredients follow `policy`. Unknown alternatives are
    /// ignored; they just never qualify as substitutes. Registry failures other
    /// than an unknown id are always returned.
    pub fn build<'a, R, I>(
        registry: &R,
        recipes: I,
        approach: &DietaryApproach,
        policy: UnknownIngredientPolicy,
    ) -> Result<Self>
    where
        R: IngredientRegistry + ?Sized,
        I: IntoIterator<Item = &'a Recipe>,
    {
        let mut index = Self::default();
        let mut missing: HashSet<String> = HashSet::new();

        for recipe in recipes {
            for item in &recipe.ingredients {
                let key = item.ingredient_id.to_lowercase();
                if index.ingredients.contains_key(&key) {
                    continue;
                }
                if missing.contains(&key) {
                    index.skipped_recipes.insert(recipe.key());
                    continue;
                }
                match registry.resolve(&item.ingredient_id) {
                    Ok(ingredient) => {
                        // Keep the reference id as key even when resolved by name.
                        index.ingredients.insert(key, ingredient);
                    }
                    Err(PlanError::UnknownIngredient(id)) => match policy {
                        UnknownIngredientPolicy::Fail => {
                            return Err(PlanError::UnknownIngredient(id));
                        }
                        UnknownIngredientPolicy::SkipRecipe => {
                            warn!(
                                recipe = %recipe.id,
                                ingredient = %id,
                                "unknown ingredient, skipping recipe"
                            );
                            missing.insert(key);
                            index.skipped_recipes.insert(recipe.key());
                        }
                    },
                    Err(e) => return Err(e),
                }
            }
        }

        for restriction in &approach.restrictions {
            for alternative in &restriction.alternatives {
                let key = alternative.to_lowercase();
                if index.ingredients.contains_key(&key) {
                    continue;
                }
                match registry.resolve(alternative) {
                    Ok(ingredient) => {
                        index.ingredients.insert(key, ingredient);
                    }
                    Err(PlanError::UnknownIngredient(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryIngredientRegistry;
    use crate::diets::builtin;
    use crate::models::{IngredientCategory, MealType, Nutrition, RecipeIngredient};

    fn recipe(id: &str, ingredient_ids: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: id.to_string(),
            ingredients: ingredient_ids
                .iter()
                .map(|i| RecipeIngredient::new(i, 100.0, "g"))
                .collect(),
            prep_time_minutes: 10,
            cook_time_minutes: 10,
            servings: 1,
            categories: vec![MealType::Lunch],
            dietary_approach_ids: vec!["keto".to_string()],
            nutrition_per_100g: Nutrition::new(200.0, 15.0, 3.0, 14.0),
            nutrition_per_serving: None,
            serving_weight_grams: None,
        }
    }

    fn registry() -> InMemoryIngredientRegistry {
        InMemoryIngredientRegistry::new(vec![
            Ingredient::new("egg", "Æg", IngredientCategory::Protein),
            Ingredient::new("cauliflower-rice", "Blomkålsris", IngredientCategory::Vegetable),
        ])
    }

    #[test]
    fn test_build_resolves_recipes_and_alternatives() {
        let recipes = vec![recipe("omelette", &["egg"])];
        let index = IngredientIndex::build(
            &registry(),
            &recipes,
            &builtin::keto(),
            UnknownIngredientPolicy::Fail,
        )
        .unwrap();
        assert!(index.get("EGG").is_some());
        assert!(index.get("cauliflower-rice").is_some());
        // cauliflower-mash is not registered; it is silently left out.
        assert!(index.get("cauliflower-mash").is_none());
    }

    #[test]
    fn test_unknown_ingredient_fails_by_default() {
        let recipes = vec![recipe("mystery", &["egg", "dragonfruit"])];
        let result = IngredientIndex::build(
            &registry(),
            &recipes,
            &builtin::keto(),
            UnknownIngredientPolicy::Fail,
        );
        assert!(matches!(result, Err(PlanError::UnknownIngredient(id)) if id == "dragonfruit"));
    }

    #[test]
    fn test_skip_policy_marks_every_affected_recipe() {
        let recipes = vec![
            recipe("a", &["dragonfruit"]),
            recipe("b", &["egg", "dragonfruit"]),
            recipe("c", &["egg"]),
        ];
        let index = IngredientIndex::build(
            &registry(),
            &recipes,
            &builtin::keto(),
            UnknownIngredientPolicy::SkipRecipe,
        )
        .unwrap();
        assert!(index.is_skipped(&recipes[0]));
        assert!(index.is_skipped(&recipes[1]));
        assert!(!index.is_skipped(&recipes[2]));
    }
}
