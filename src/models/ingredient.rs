use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Fruit,
    Grain,
    Dairy,
    Fat,
    Nut,
    Seed,
    Legume,
    ProcessedFood,
    Sweetener,
    Beverage,
    Spice,
    Herb,
    Other,
}

/// Nutrient amounts for some quantity of food. Macros in grams, sodium in mg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default)]
    pub sodium: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vitamins: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub minerals: BTreeMap<String, f64>,
}

impl Nutrition {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            ..Default::default()
        }
    }

    /// Every value scaled by `factor`, micronutrients included.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
            sodium: self.sodium * factor,
            vitamins: self.vitamins.iter().map(|(k, v)| (k.clone(), v * factor)).collect(),
            minerals: self.minerals.iter().map(|(k, v)| (k.clone(), v * factor)).collect(),
        }
    }

    pub fn accumulate(&mut self, other: &Nutrition) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
        self.sodium += other.sodium;
        for (k, v) in &other.vitamins {
            *self.vitamins.entry(k.clone()).or_insert(0.0) += v;
        }
        for (k, v) in &other.minerals {
            *self.minerals.entry(k.clone()).or_insert(0.0) += v;
        }
    }

    pub fn is_non_negative(&self) -> bool {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar,
            self.sodium,
        ]
        .iter()
        .chain(self.vitamins.values())
        .chain(self.minerals.values())
        .all(|v| *v >= 0.0)
    }
}

/// Registry entry for one ingredient. Read-only to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_names: Vec<String>,
    pub category: IngredientCategory,
    /// Soft markers ("pork", "dairy", "gluten") matched against excluded ingredients.
    #[serde(default)]
    pub exclusion_tags: BTreeSet<String>,
    /// Hard markers matched against the allergy list.
    #[serde(default)]
    pub allergen_tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_per_100g: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams_per_piece: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams_per_ml: Option<f64>,
}

impl Ingredient {
    pub fn new(id: &str, name: &str, category: IngredientCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            common_names: Vec::new(),
            category,
            exclusion_tags: BTreeSet::new(),
            allergen_tags: BTreeSet::new(),
            nutrition_per_100g: None,
            grams_per_piece: None,
            grams_per_ml: None,
        }
    }

    /// Canonical key for lookups (lowercase id).
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }

    /// Case-insensitive match on name or any common name.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.common_names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Whether any exclusion tag appears in `excluded` (case-insensitive).
    pub fn is_excluded_by(&self, excluded: &[String]) -> bool {
        tags_intersect(&self.exclusion_tags, excluded)
    }

    pub fn triggers_allergy(&self, allergies: &[String]) -> bool {
        tags_intersect(&self.allergen_tags, allergies)
    }
}

fn tags_intersect(tags: &BTreeSet<String>, wanted: &[String]) -> bool {
    tags.iter()
        .any(|t| wanted.iter().any(|w| t.eq_ignore_ascii_case(w.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn butter() -> Ingredient {
        let mut butter = Ingredient::new("butter", "Smør", IngredientCategory::Fat);
        butter.common_names.push("Butter".to_string());
        butter.exclusion_tags.insert("dairy".to_string());
        butter.allergen_tags.insert("milk".to_string());
        butter
    }

    #[test]
    fn test_answers_to_common_names() {
        let butter = butter();
        assert!(butter.answers_to("smør"));
        assert!(butter.answers_to("BUTTER"));
        assert!(!butter.answers_to("margarine"));
    }

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        let butter = butter();
        assert!(butter.is_excluded_by(&["Dairy".to_string()]));
        assert!(butter.triggers_allergy(&["MILK".to_string()]));
        assert!(!butter.triggers_allergy(&["peanut".to_string()]));
    }

    #[test]
    fn test_scaled_and_accumulate() {
        let mut base = Nutrition::new(100.0, 10.0, 5.0, 4.0);
        base.minerals.insert("iron".to_string(), 2.0);

        let doubled = base.scaled(2.0);
        assert!((doubled.calories - 200.0).abs() < 1e-9);
        assert!((doubled.minerals["iron"] - 4.0).abs() < 1e-9);

        let mut total = Nutrition::default();
        total.accumulate(&base);
        total.accumulate(&doubled);
        assert!((total.protein - 30.0).abs() < 1e-9);
        assert!((total.minerals["iron"] - 6.0).abs() < 1e-9);
    }
}
