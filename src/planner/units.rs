//! Unit normalization for shopping quantities.
//!
//! Mass goes to grams, volume to millilitres and counts to pieces ("stk").
//! Volume and count become grams when the ingredient carries a density or
//! piece weight. Unknown units pass through lowercased.

use crate::models::Ingredient;

pub const GRAMS: &str = "g";
pub const MILLILITRES: &str = "ml";
pub const PIECES: &str = "stk";

/// Millilitres per teaspoon / tablespoon / cup.
pub const ML_PER_TSP: f64 = 5.0;
pub const ML_PER_TBSP: f64 = 15.0;
pub const ML_PER_CUP: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Volume,
    Count,
    Other,
}

/// Dimension of a unit and its factor to the dimension's base unit.
pub fn classify(unit: &str) -> (Dimension, f64) {
    match unit.trim().to_lowercase().trim_end_matches('.') {
        "mg" => (Dimension::Mass, 0.001),
        "g" | "gr" | "gram" | "grams" => (Dimension::Mass, 1.0),
        "kg" | "kilo" => (Dimension::Mass, 1000.0),
        "ml" => (Dimension::Volume, 1.0),
        "cl" => (Dimension::Volume, 10.0),
        "dl" => (Dimension::Volume, 100.0),
        "l" | "liter" | "litre" => (Dimension::Volume, 1000.0),
        "tsk" | "tsp" | "teaspoon" => (Dimension::Volume, ML_PER_TSP),
        "spsk" | "tbsp" | "tablespoon" => (Dimension::Volume, ML_PER_TBSP),
        "cup" | "cups" => (Dimension::Volume, ML_PER_CUP),
        "stk" | "pcs" | "pc" | "piece" | "pieces" | "stykke" | "stykker" => {
            (Dimension::Count, 1.0)
        }
        _ => (Dimension::Other, 1.0),
    }
}

/// Normalize `amount unit` for an ingredient, returning the new amount and unit.
pub fn normalize(amount: f64, unit: &str, ingredient: Option<&Ingredient>) -> (f64, String) {
    let (dimension, factor) = classify(unit);
    let base = amount * factor;
    match dimension {
        Dimension::Mass => (base, GRAMS.to_string()),
        Dimension::Volume => match ingredient.and_then(|i| i.grams_per_ml) {
            Some(density) => (base * density, GRAMS.to_string()),
            None => (base, MILLILITRES.to_string()),
        },
        Dimension::Count => match ingredient.and_then(|i| i.grams_per_piece) {
            Some(weight) => (base * weight, GRAMS.to_string()),
            None => (base, PIECES.to_string()),
        },
        Dimension::Other => (amount, unit.trim().to_lowercase()),
    }
}
