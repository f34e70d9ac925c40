use std::collections::HashMap;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Energy
// ─────────────────────────────────────────────────────────────────────────────

/// Energy density of protein and carbohydrate (kcal/g).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Energy density of fat (kcal/g).
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Weight-loss target is TDEE minus 20%.
pub const WEIGHT_LOSS_FACTOR: f64 = 0.8;

/// Muscle-gain target is TDEE plus 15%.
pub const MUSCLE_GAIN_FACTOR: f64 = 1.15;

/// Energy stored in one kilogram of body weight.
pub const KCAL_PER_KG_BODY_WEIGHT: f64 = 7700.0;

/// BMI bounds used for the ideal weight range.
pub const HEALTHY_BMI_MIN: f64 = 18.5;
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Accepted sum of the three macro targets (percent).
pub const MACRO_SUM_MIN: f64 = 98.0;
pub const MACRO_SUM_MAX: f64 = 102.0;

// ─────────────────────────────────────────────────────────────────────────────
// Scoring and slot filling
// ─────────────────────────────────────────────────────────────────────────────

/// Default preparation and cooking time budget (minutes).
pub const MAX_PREP_MINUTES: u32 = 30;
pub const MAX_COOK_MINUTES: u32 = 60;

/// Points removed per ingredient hitting an excluded tag.
pub const EXCLUSION_PENALTY: f64 = 20.0;

/// Variety axis for a recipe not yet used / already used in the run.
pub const VARIETY_UNUSED: f64 = 100.0;
pub const VARIETY_USED: f64 = 50.0;

/// Serving multiplier bounds.
pub const MIN_SERVING_MULTIPLIER: f64 = 0.5;
pub const MAX_SERVING_MULTIPLIER: f64 = 3.0;

/// Axis value above which a reason is reported for a pick.
pub const REASON_THRESHOLD: f64 = 80.0;

// ─────────────────────────────────────────────────────────────────────────────
// Validation and rollup
// ─────────────────────────────────────────────────────────────────────────────

/// Day calories further than this fraction from target raise a warning.
pub const CALORIE_TOLERANCE: f64 = 0.2;

/// Coverage below which a deficiency is reported.
pub const DEFICIENCY_THRESHOLD: f64 = 0.9;

/// Coverage below which a deficiency is high severity.
pub const SEVERE_DEFICIENCY_THRESHOLD: f64 = 0.75;

/// Priority importance at or above which a nutrient counts as critical.
pub const CRITICAL_IMPORTANCE: u8 = 8;

pub const FIBER_TARGET_GRAMS: f64 = 25.0;
pub const SODIUM_LIMIT_MG: f64 = 2300.0;

/// Sodium above this fraction of the limit is flagged.
pub const SODIUM_EXCESS_FACTOR: f64 = 1.2;

/// Number of strengths kept in a weekly summary.
pub const MAX_STRENGTHS: usize = 3;

/// Daily reference intake for a micronutrient.
#[derive(Debug, Clone, Copy)]
pub struct MicronutrientTarget {
    pub amount: f64,
    pub unit: &'static str,
    pub advice: &'static str,
}

const fn target(amount: f64, unit: &'static str, advice: &'static str) -> MicronutrientTarget {
    MicronutrientTarget {
        amount,
        unit,
        advice,
    }
}

/// Vitamin targets keyed by letter ("A", "C", ...).
pub static VITAMIN_TARGETS: LazyLock<HashMap<&'static str, MicronutrientTarget>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert(
            "A",
            target(900.0, "IU", "Eat liver, fish liver oil, eggs, and dark green leafy vegetables"),
        );
        m.insert(
            "C",
            target(90.0, "mg", "Eat citrus fruits, berries, tomatoes, and green vegetables"),
        );
        m.insert(
            "D",
            target(20.0, "IU", "Sun exposure, fatty fish, eggs, and fortified foods"),
        );
        m.insert(
            "E",
            target(15.0, "IU", "Eat nuts, seeds, vegetable oils, and green leafy vegetables"),
        );
        m.insert(
            "K",
            target(120.0, "mcg", "Eat leafy green vegetables, broccoli, and fortified foods"),
        );
        m
    });

/// Mineral targets keyed by lowercase name.
pub static MINERAL_TARGETS: LazyLock<HashMap<&'static str, MicronutrientTarget>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert(
            "calcium",
            target(1000.0, "mg", "Eat dairy products, leafy green vegetables, and fortified foods"),
        );
        m.insert(
            "iron",
            target(18.0, "mg", "Eat red meat, poultry, fish, beans, and iron-fortified cereals"),
        );
        m.insert(
            "magnesium",
            target(400.0, "mg", "Eat whole grains, nuts, seeds, and green leafy vegetables"),
        );
        m.insert(
            "phosphorus",
            target(1200.0, "mg", "Eat meat, fish, poultry, and dairy products"),
        );
        m.insert(
            "potassium",
            target(4700.0, "mg", "Eat bananas, oranges, potatoes, and leafy green vegetables"),
        );
        m.insert(
            "sodium",
            target(2300.0, "mg", "Read nutrition labels and reduce processed foods"),
        );
        m.insert("zinc", target(11.0, "mg", "Eat oysters, beef, pork, and fortified cereals"));
        m.insert("copper", target(0.9, "mg", "Eat shellfish, nuts, and whole grains"));
        m.insert(
            "manganese",
            target(2.3, "mg", "Eat whole grains, nuts, and green leafy vegetables"),
        );
        m.insert(
            "selenium",
            target(55.0, "mcg", "Eat Brazil nuts, seafood, and fortified foods"),
        );
        m
    });

/// Vitamin letter from "A", "a", "vitamin a" or "vitamin_a".
pub fn vitamin_letter(key: &str) -> String {
    let lowered = key.trim().to_lowercase();
    lowered
        .strip_prefix("vitamin")
        .unwrap_or(&lowered)
        .trim_start_matches(['_', ' ', '-'])
        .to_uppercase()
}

pub fn vitamin_target(key: &str) -> Option<&'static MicronutrientTarget> {
    VITAMIN_TARGETS.get(vitamin_letter(key).as_str())
}

pub fn mineral_target(key: &str) -> Option<&'static MicronutrientTarget> {
    MINERAL_TARGETS.get(key.trim().to_lowercase().as_str())
}
