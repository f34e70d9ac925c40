use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{Ingredient, MealPlan, Recipe};

pub const SHOPPING_CSV_HEADER: [&str; 6] =
    ["week", "category", "ingredient_id", "name", "amount", "unit"];

/// Load recipes from a JSON array.
///
/// Deduplicates by lowercase id (last occurrence wins); output is sorted by id.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, Recipe> = HashMap::new();
    for recipe in recipes {
        seen.insert(recipe.key(), recipe);
    }

    let mut deduped: Vec<Recipe> = seen.into_values().collect();
    deduped.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(deduped)
}

/// Load ingredients from a JSON array, deduplicated like [`load_recipes`].
pub fn load_ingredients<P: AsRef<Path>>(path: P) -> Result<Vec<Ingredient>> {
    let content = fs::read_to_string(path)?;
    let ingredients: Vec<Ingredient> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, Ingredient> = HashMap::new();
    for ingredient in ingredients {
        seen.insert(ingredient.key(), ingredient);
    }

    let mut deduped: Vec<Ingredient> = seen.into_values().collect();
    deduped.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(deduped)
}

/// Write the whole plan as pretty JSON.
pub fn save_plan<P: AsRef<Path>>(path: P, plan: &MealPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write every week's shopping list as CSV rows.
pub fn write_shopping_csv<P: AsRef<Path>>(path: P, plan: &MealPlan) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(SHOPPING_CSV_HEADER)?;

    for week in &plan.weeks {
        for category in &week.shopping_list.categories {
            for item in &category.items {
                wtr.write_record([
                    week.week_number.to_string(),
                    category.name.clone(),
                    item.ingredient_id.clone(),
                    item.name.clone(),
                    format!("{:.1}", item.amount),
                    item.unit.clone(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
