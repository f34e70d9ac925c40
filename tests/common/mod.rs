#![allow(dead_code)]

use meal_planner_rs::catalog::{InMemoryIngredientRegistry, InMemoryRecipeCatalog};
use meal_planner_rs::models::{
    ActivityLevel, Gender, Ingredient, IngredientCategory, MealType, Nutrition, Recipe,
    RecipeIngredient, UserProfile, WeightGoal,
};

pub const SERVING_GRAMS: f64 = 300.0;

pub fn profile() -> UserProfile {
    UserProfile::new(
        Gender::Male,
        25,
        175.0,
        70.0,
        ActivityLevel::ModeratelyActive,
        WeightGoal::WeightLoss,
    )
}

fn ingredient(id: &str, name: &str, category: IngredientCategory, tags: &[&str]) -> Ingredient {
    let mut ingredient = Ingredient::new(id, name, category);
    ingredient.exclusion_tags = tags.iter().map(|t| t.to_string()).collect();
    ingredient
}

pub fn ingredients() -> Vec<Ingredient> {
    let mut peanut_butter =
        ingredient("peanut-butter", "Peanut butter", IngredientCategory::Nut, &[]);
    peanut_butter.allergen_tags.insert("peanut".to_string());

    vec![
        ingredient("egg", "Egg", IngredientCategory::Protein, &[]),
        ingredient("bacon", "Bacon", IngredientCategory::Protein, &["pork", "meat"]),
        ingredient("salmon", "Salmon", IngredientCategory::Protein, &["fish"]),
        ingredient("chicken", "Chicken thigh", IngredientCategory::Protein, &["poultry"]),
        ingredient("spinach", "Spinach", IngredientCategory::Vegetable, &[]),
        ingredient("avocado", "Avocado", IngredientCategory::Fruit, &[]),
        ingredient("butter", "Butter", IngredientCategory::Fat, &["dairy"]),
        ingredient("cheese", "Cheddar", IngredientCategory::Dairy, &["dairy"]),
        ingredient("olive-oil", "Olive oil", IngredientCategory::Fat, &[]),
        ingredient("rice", "Rice", IngredientCategory::Grain, &["grain"]),
        ingredient("cauliflower-rice", "Cauliflower rice", IngredientCategory::Vegetable, &[]),
        peanut_butter,
    ]
}

/// A keto and 5:2 recipe with `kcal` per serving and grams of each ingredient.
pub fn recipe(
    id: &str,
    meals: &[MealType],
    kcal: f64,
    macros: (f64, f64, f64),
    items: &[(&str, f64)],
) -> Recipe {
    let per_serving = Nutrition::new(kcal, macros.0, macros.1, macros.2);
    Recipe {
        id: id.to_string(),
        title: id.replace('-', " "),
        ingredients: items
            .iter()
            .map(|(ingredient, grams)| RecipeIngredient::new(ingredient, *grams, "g"))
            .collect(),
        prep_time_minutes: 10,
        cook_time_minutes: 20,
        servings: 1,
        categories: meals.to_vec(),
        dietary_approach_ids: vec!["keto".to_string(), "5-2".to_string()],
        nutrition_per_100g: per_serving.scaled(100.0 / SERVING_GRAMS),
        nutrition_per_serving: Some(per_serving),
        serving_weight_grams: Some(SERVING_GRAMS),
    }
}

pub fn recipes() -> Vec<Recipe> {
    use MealType::*;
    vec![
        recipe(
            "bacon-eggs",
            &[Breakfast],
            500.0,
            (28.0, 3.0, 41.0),
            &[("egg", 120.0), ("bacon", 50.0), ("butter", 10.0)],
        ),
        recipe(
            "spinach-omelette",
            &[Breakfast, Lunch],
            450.0,
            (30.0, 5.0, 34.0),
            &[("egg", 150.0), ("spinach", 60.0), ("cheese", 30.0)],
        ),
        recipe(
            "avocado-egg-bowl",
            &[Breakfast],
            480.0,
            (20.0, 8.0, 40.0),
            &[("avocado", 150.0), ("egg", 100.0)],
        ),
        recipe(
            "salmon-salad",
            &[Lunch, Dinner],
            600.0,
            (40.0, 6.0, 46.0),
            &[("salmon", 150.0), ("spinach", 80.0), ("olive-oil", 15.0)],
        ),
        recipe(
            "chicken-cauliflower-rice",
            &[Lunch, Dinner],
            650.0,
            (45.0, 12.0, 46.0),
            &[("chicken", 180.0), ("rice", 150.0), ("butter", 15.0)],
        ),
        recipe(
            "pork-belly-plate",
            &[Dinner],
            700.0,
            (35.0, 5.0, 60.0),
            &[("bacon", 200.0), ("spinach", 100.0)],
        ),
        recipe(
            "satay-chicken",
            &[Lunch, Dinner],
            650.0,
            (48.0, 10.0, 46.0),
            &[("chicken", 150.0), ("peanut-butter", 40.0)],
        ),
        recipe(
            "cheese-board",
            &[Lunch],
            550.0,
            (30.0, 6.0, 45.0),
            &[("cheese", 100.0), ("avocado", 100.0)],
        ),
    ]
}

pub fn catalog() -> InMemoryRecipeCatalog {
    InMemoryRecipeCatalog::new(recipes())
}

pub fn registry() -> InMemoryIngredientRegistry {
    InMemoryIngredientRegistry::new(ingredients())
}
