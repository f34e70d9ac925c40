use std::collections::BTreeMap;

use crate::models::{
    DayPlan, Ingredient, IngredientCategory, MealAssignment, RecipeIngredient, ShoppingCategory,
    ShoppingItem, ShoppingList,
};
use crate::planner::index::IngredientIndex;
use crate::planner::units::normalize;

pub const PROTEIN_SECTION: &str = "Protein";
pub const VEGETABLE_SECTION: &str = "Vegetables";
pub const OTHER_SECTION: &str = "Other";

fn section_for(category: Option<IngredientCategory>) -> &'static str {
    match category {
        Some(IngredientCategory::Protein) => PROTEIN_SECTION,
        Some(IngredientCategory::Vegetable | IngredientCategory::Fruit) => VEGETABLE_SECTION,
        _ => OTHER_SECTION,
    }
}

/// Ingredient id actually bought for a recipe line, or `None` if it was left out.
fn effective_id<'m>(assignment: &'m MealAssignment, item: &'m RecipeIngredient) -> Option<&'m str> {
    match assignment
        .substitutions
        .iter()
        .find(|s| s.original_ingredient_id.eq_ignore_ascii_case(&item.ingredient_id))
    {
        Some(sub) => sub.replacement_ingredient_id.as_deref(),
        None => Some(item.ingredient_id.as_str()),
    }
}

struct Line<'i> {
    ingredient: Option<&'i Ingredient>,
    id: String,
    amount: f64,
    unit: String,
}

/// Consolidated, categorized shopping list for one week.
///
/// Each line is `amount x serving_multiplier`, normalized, summed per
/// (ingredient, unit).
pub fn build_shopping_list(
    week_number: u32,
    days: &[DayPlan],
    index: &IngredientIndex,
) -> ShoppingList {
    let mut totals: BTreeMap<(String, String), Line> = BTreeMap::new();

    for assignment in days.iter().flat_map(|d| d.meals.iter()) {
        for item in &assignment.recipe.ingredients {
            let Some(id) = effective_id(assignment, item) else {
                continue;
            };
            let ingredient = index.get(id);
            let scaled = item.amount * assignment.serving_multiplier;
            let (amount, unit) = normalize(scaled, &item.unit, ingredient);
            let key = (id.to_lowercase(), unit.clone());

            totals
                .entry(key)
                .or_insert_with(|| Line {
                    ingredient,
                    id: ingredient.map(|i| i.id.clone()).unwrap_or_else(|| id.to_string()),
                    amount: 0.0,
                    unit,
                })
                .amount += amount;
        }
    }

    let mut sections: BTreeMap<&'static str, Vec<ShoppingItem>> = BTreeMap::new();
    for line in totals.into_values() {
        let section = section_for(line.ingredient.map(|i| i.category));
        sections.entry(section).or_default().push(ShoppingItem {
            name: line
                .ingredient
                .map(|i| i.name.clone())
                .unwrap_or_else(|| line.id.clone()),
            ingredient_id: line.id,
            amount: line.amount,
            unit: line.unit,
        });
    }

    let categories = [PROTEIN_SECTION, VEGETABLE_SECTION, OTHER_SECTION]
        .into_iter()
        .filter_map(|name| {
            let mut items = sections.remove(name)?;
            items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.unit.cmp(&b.unit)));
            Some(ShoppingCategory {
                name: name.to_string(),
                items,
            })
        })
        .collect();

    ShoppingList {
        week_number,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, Nutrition, Recipe, RecipeScore, Substitution};
    use chrono::NaiveDate;

    fn index() -> IngredientIndex {
        let mut egg = Ingredient::new("egg", "Æg", IngredientCategory::Protein);
        egg.grams_per_piece = Some(60.0);
        IngredientIndex::new(vec![
            egg,
            Ingredient::new("spinach", "Spinat", IngredientCategory::Vegetable),
            Ingredient::new("apple", "Æble", IngredientCategory::Fruit),
            Ingredient::new("butter", "Smør", IngredientCategory::Fat),
            Ingredient::new("rice", "Ris", IngredientCategory::Grain),
            Ingredient::new("cauliflower-rice", "Blomkålsris", IngredientCategory::Vegetable),
        ])
    }

    fn assignment(items: Vec<RecipeIngredient>, multiplier: f64) -> MealAssignment {
        MealAssignment {
            meal_type: MealType::Lunch,
            recipe: Recipe {
                id: "r".to_string(),
                title: "R".to_string(),
                ingredients: items,
                prep_time_minutes: 5,
                cook_time_minutes: 5,
                servings: 1,
                categories: vec![MealType::Lunch],
                dietary_approach_ids: vec!["keto".to_string()],
                nutrition_per_100g: Nutrition::default(),
                nutrition_per_serving: None,
                serving_weight_grams: None,
            },
            serving_multiplier: multiplier,
            adjusted: Nutrition::default(),
            substitutions: Vec::new(),
            score: RecipeScore::default(),
        }
    }

    fn day(meals: Vec<MealAssignment>) -> DayPlan {
        let mut day = DayPlan::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 1, false, 1800.0);
        day.meals = meals;
        day
    }

    #[test]
    fn test_sums_scaled_amounts_per_ingredient() {
        let days = vec![
            day(vec![assignment(vec![RecipeIngredient::new("spinach", 100.0, "g")], 1.5)]),
            day(vec![assignment(vec![RecipeIngredient::new("spinach", 0.2, "kg")], 2.0)]),
        ];
        let list = build_shopping_list(1, &days, &index());
        assert!((list.amount_of("spinach", "g") - 550.0).abs() < 1e-9);
        assert_eq!(list.categories.len(), 1);
        assert_eq!(list.categories[0].name, VEGETABLE_SECTION);
    }

    #[test]
    fn test_pieces_convert_with_piece_weight() {
        let days = vec![day(vec![
            assignment(vec![RecipeIngredient::new("egg", 2.0, "stk")], 1.0),
            assignment(vec![RecipeIngredient::new("egg", 60.0, "g")], 1.0),
        ])];
        let list = build_shopping_list(1, &days, &index());
        assert!((list.amount_of("egg", "g") - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_sections_and_ordering() {
        let days = vec![day(vec![assignment(
            vec![
                RecipeIngredient::new("butter", 10.0, "g"),
                RecipeIngredient::new("spinach", 50.0, "g"),
                RecipeIngredient::new("apple", 1.0, "stk"),
                RecipeIngredient::new("egg", 1.0, "stk"),
            ],
            1.0,
        )])];
        let list = build_shopping_list(2, &days, &index());
        let names: Vec<&str> = list.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Protein", "Vegetables", "Other"]);
        let vegetables: Vec<&str> =
            list.categories[1].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(vegetables, vec!["Spinat", "Æble"]);
        assert_eq!(list.week_number, 2);
    }

    #[test]
    fn test_substitution_replaces_and_omits() {
        let mut swapped = assignment(
            vec![
                RecipeIngredient::new("rice", 150.0, "g"),
                RecipeIngredient::new("butter", 10.0, "g"),
            ],
            2.0,
        );
        swapped.substitutions = vec![
            Substitution {
                original_ingredient_id: "rice".to_string(),
                replacement_ingredient_id: Some("cauliflower-rice".to_string()),
                reason: "High carbohydrate content".to_string(),
            },
            Substitution {
                original_ingredient_id: "butter".to_string(),
                replacement_ingredient_id: None,
                reason: "omitted".to_string(),
            },
        ];
        let list = build_shopping_list(1, &[day(vec![swapped])], &index());
        assert!((list.amount_of("cauliflower-rice", "g") - 300.0).abs() < 1e-9);
        assert_eq!(list.amount_of("rice", "g"), 0.0);
        assert_eq!(list.amount_of("butter", "g"), 0.0);
    }
}
