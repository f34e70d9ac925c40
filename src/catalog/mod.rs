mod memory;
mod persistence;

use crate::error::Result;
use crate::models::{Ingredient, MealType, Recipe};

pub use memory::{InMemoryIngredientRegistry, InMemoryRecipeCatalog};
pub use persistence::{
    load_ingredients, load_recipes, save_plan, write_shopping_csv, SHOPPING_CSV_HEADER,
};

/// Source of candidate recipes. Read-only during a generation run.
pub trait RecipeCatalog {
    /// Recipes valid for `approach_id` that can fill `meal_type`.
    fn find_by_approach_and_category(
        &self,
        approach_id: &str,
        meal_type: MealType,
    ) -> Result<Vec<Recipe>>;
}

/// Resolves ingredient references to registry entries.
pub trait IngredientRegistry {
    /// Fails with `UnknownIngredient` for ids the registry does not know.
    fn resolve(&self, ingredient_id: &str) -> Result<Ingredient>;
}

impl<T: RecipeCatalog + ?Sized> RecipeCatalog for &T {
    fn find_by_approach_and_category(
        &self,
        approach_id: &str,
        meal_type: MealType,
    ) -> Result<Vec<Recipe>> {
        (**self).find_by_approach_and_category(approach_id, meal_type)
    }
}

impl<T: IngredientRegistry + ?Sized> IngredientRegistry for &T {
    fn resolve(&self, ingredient_id: &str) -> Result<Ingredient> {
        (**self).resolve(ingredient_id)
    }
}
