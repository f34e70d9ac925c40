use std::collections::HashMap;

use tracing::warn;

use crate::catalog::{IngredientRegistry, RecipeCatalog};
use crate::error::{PlanError, Result};
use crate::models::{Ingredient, MealType, Recipe};

/// Ingredient registry held in memory, keyed by lowercase id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIngredientRegistry {
    ingredients: HashMap<String, Ingredient>,
}

impl InMemoryIngredientRegistry {
    /// Later entries with the same id replace earlier ones.
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let mut map = HashMap::new();
        for ingredient in ingredients {
            map.insert(ingredient.key(), ingredient);
        }
        Self { ingredients: map }
    }

    /// Get an ingredient by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(&id.to_lowercase())
    }

    /// Find by display name or common name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Ingredient> {
        let name = name.trim();
        let mut matches: Vec<&Ingredient> = self
            .ingredients
            .values()
            .filter(|i| i.answers_to(name))
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        matches.first().copied()
    }

    pub fn all(&self) -> Vec<&Ingredient> {
        let mut all: Vec<&Ingredient> = self.ingredients.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn to_ingredients(&self) -> Vec<Ingredient> {
        self.all().into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl IngredientRegistry for InMemoryIngredientRegistry {
    fn resolve(&self, ingredient_id: &str) -> Result<Ingredient> {
        self.get(ingredient_id)
            .or_else(|| self.find_by_name(ingredient_id))
            .cloned()
            .ok_or_else(|| PlanError::UnknownIngredient(ingredient_id.to_string()))
    }
}

/// Recipe catalog held in memory, keyed by lowercase id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeCatalog {
    recipes: HashMap<String, Recipe>,
}

impl InMemoryRecipeCatalog {
    /// Invalid recipes (no servings, negative nutrition) are dropped with a warning.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let mut map = HashMap::new();
        for recipe in recipes {
            if !recipe.is_valid() {
                warn!(recipe = %recipe.id, "skipping invalid recipe");
                continue;
            }
            map.insert(recipe.key(), recipe);
        }
        Self { recipes: map }
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(&id.to_lowercase())
    }

    /// All recipes sorted by id.
    pub fn all(&self) -> Vec<&Recipe> {
        let mut all: Vec<&Recipe> = self.recipes.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeCatalog for InMemoryRecipeCatalog {
    fn find_by_approach_and_category(
        &self,
        approach_id: &str,
        meal_type: MealType,
    ) -> Result<Vec<Recipe>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|r| r.supports_approach(approach_id) && r.fits_meal(meal_type))
            .cloned()
            .collect())
    }
}
