//! The seven built-in dietary approaches.

use std::collections::BTreeSet;

use crate::models::{
    DietaryApproach, FastingPeriod, FoodCategory, FoodRestriction, MacroRatio, MealDistribution,
    MealStructure, MealType, NutritionalPriority, PercentRange, Strictness,
};

/// Keto recipes above this carbohydrate density are never eligible.
pub const KETO_MAX_CARBS_PER_100G: f64 = 10.0;

type Band = (f64, f64, f64);

fn ratio(carbs: Band, protein: Band, fat: Band) -> MacroRatio {
    MacroRatio {
        carbohydrates: PercentRange::new(carbs.0, carbs.1, carbs.2),
        protein: PercentRange::new(protein.0, protein.1, protein.2),
        fat: PercentRange::new(fat.0, fat.1, fat.2),
    }
}

fn meal(meal_type: MealType, calories: f64, split: MacroRatio) -> MealDistribution {
    MealDistribution {
        meal_type,
        macro_distribution: split,
        target_calories: calories,
        optional: false,
    }
}

fn priority(nutrient: &str, importance: u8, reason: &str) -> NutritionalPriority {
    NutritionalPriority {
        nutrient: nutrient.to_string(),
        importance,
        target_amount: None,
        reason: reason.to_string(),
    }
}

fn restrict(category: FoodCategory, strictness: Strictness, reason: &str) -> FoodRestriction {
    FoodRestriction {
        category,
        strictness,
        reason: reason.to_string(),
        alternatives: Vec::new(),
    }
}

fn with_alternatives(mut restriction: FoodRestriction, ids: &[&str]) -> FoodRestriction {
    restriction.alternatives = ids.iter().map(|s| s.to_string()).collect();
    restriction
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn categories(items: &[FoodCategory]) -> BTreeSet<FoodCategory> {
    items.iter().copied().collect()
}

const ALL_WHOLE_FOODS: [FoodCategory; 9] = [
    FoodCategory::Vegetables,
    FoodCategory::Fruits,
    FoodCategory::Grains,
    FoodCategory::Proteins,
    FoodCategory::Dairy,
    FoodCategory::Fats,
    FoodCategory::Nuts,
    FoodCategory::Seeds,
    FoodCategory::Legumes,
];

/// Four-meal structure (breakfast, lunch, dinner, snack) at 400/500/500/200 kcal,
/// with lunch and dinner taking `main_protein` instead of the day's protein band.
fn four_meals(day: MacroRatio, main_protein: Band) -> MealStructure {
    let mut main = day;
    main.protein = PercentRange::new(main_protein.0, main_protein.1, main_protein.2);
    MealStructure {
        meals: vec![
            meal(MealType::Breakfast, 400.0, day),
            meal(MealType::Lunch, 500.0, main),
            meal(MealType::Dinner, 500.0, main),
            meal(MealType::Snack, 200.0, day),
        ],
        snacks_allowed: true,
        fasting: None,
    }
}

pub fn keto() -> DietaryApproach {
    let main = ratio((5.0, 5.0, 10.0), (25.0, 30.0, 35.0), (60.0, 65.0, 70.0));
    let mut breakfast = meal(
        MealType::Breakfast,
        500.0,
        ratio((5.0, 5.0, 10.0), (20.0, 25.0, 30.0), (65.0, 70.0, 75.0)),
    );
    breakfast.optional = true;

    DietaryApproach {
        id: "keto".to_string(),
        name: "Ketogenic Diet".to_string(),
        description: "High-fat, adequate-protein, low-carbohydrate diet that forces the body \
                      to burn fats rather than carbohydrates."
            .to_string(),
        macro_ratio: ratio((5.0, 5.0, 10.0), (15.0, 20.0, 25.0), (70.0, 75.0, 80.0)),
        meal_structure: MealStructure {
            meals: vec![
                breakfast,
                meal(MealType::Lunch, 600.0, main),
                meal(MealType::Dinner, 700.0, main),
            ],
            snacks_allowed: true,
            fasting: None,
        },
        nutritional_priorities: vec![
            priority("Omega-3 fatty acids", 8, "Anti-inflammatory benefits"),
            priority("Electrolytes", 9, "Prevent keto flu"),
            priority("Fiber", 7, "Digestive health"),
        ],
        restrictions: vec![
            with_alternatives(
                restrict(FoodCategory::Grains, Strictness::Eliminate, "High carbohydrate content"),
                &["cauliflower-rice", "cauliflower-mash"],
            ),
            restrict(FoodCategory::Sugars, Strictness::Eliminate, "Disrupts ketosis"),
            restrict(
                FoodCategory::ProcessedFoods,
                Strictness::Avoid,
                "Often contain hidden carbs",
            ),
        ],
        allowed_food_categories: categories(&[
            FoodCategory::Vegetables,
            FoodCategory::Proteins,
            FoodCategory::Fats,
            FoodCategory::Dairy,
            FoodCategory::Nuts,
            FoodCategory::Seeds,
        ]),
        special_considerations: strings(&[
            "Focus on non-starchy vegetables",
            "Include adequate electrolytes",
            "Monitor ketone levels during adaptation",
        ]),
        max_carbs_per_100g: Some(KETO_MAX_CARBS_PER_100G),
    }
}

pub fn sense() -> DietaryApproach {
    let day = ratio((40.0, 45.0, 50.0), (20.0, 25.0, 30.0), (25.0, 30.0, 35.0));
    DietaryApproach {
        id: "sense".to_string(),
        name: "Sense Diet".to_string(),
        description: "Mindful eating approach focused on whole foods, balanced nutrition, \
                      and sustainable lifestyle changes."
            .to_string(),
        macro_ratio: day,
        meal_structure: four_meals(day, (25.0, 30.0, 35.0)),
        nutritional_priorities: vec![
            priority("Fiber", 9, "Satiety and digestive health"),
            priority("Omega-3 fatty acids", 7, "Anti-inflammatory benefits"),
            priority("Antioxidants", 8, "Overall health and wellness"),
        ],
        restrictions: vec![
            restrict(FoodCategory::ProcessedFoods, Strictness::Limit, "Focus on whole foods"),
            restrict(FoodCategory::Sugars, Strictness::Limit, "Blood sugar stability"),
        ],
        allowed_food_categories: categories(&ALL_WHOLE_FOODS),
        special_considerations: strings(&[
            "Emphasize mindful eating practices",
            "Focus on food quality over quantity",
            "Include variety for nutritional completeness",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn lchf_paleo() -> DietaryApproach {
    let day = ratio((25.0, 30.0, 35.0), (35.0, 40.0, 45.0), (25.0, 30.0, 35.0));
    let mut main = day;
    main.protein = PercentRange::new(40.0, 45.0, 50.0);
    DietaryApproach {
        id: "lchf-paleo".to_string(),
        name: "LCHF/Paleo".to_string(),
        description: "Low-carb, high-fat approach based on paleo principles with emphasis on \
                      whole, unprocessed foods."
            .to_string(),
        macro_ratio: day,
        meal_structure: MealStructure {
            meals: vec![
                meal(MealType::Breakfast, 500.0, day),
                meal(MealType::Lunch, 600.0, main),
                meal(MealType::Dinner, 700.0, main),
            ],
            snacks_allowed: true,
            fasting: None,
        },
        nutritional_priorities: vec![
            priority("Protein", 9, "Muscle maintenance and satiety"),
            priority("Fiber", 8, "Digestive health"),
            priority("Omega-3 fatty acids", 7, "Anti-inflammatory benefits"),
        ],
        restrictions: vec![
            restrict(FoodCategory::ProcessedFoods, Strictness::Eliminate, "Paleo principles"),
            with_alternatives(
                restrict(FoodCategory::Grains, Strictness::Eliminate, "Paleo principles"),
                &["cauliflower-rice", "cauliflower-mash"],
            ),
            restrict(FoodCategory::Legumes, Strictness::Eliminate, "Paleo principles"),
            restrict(FoodCategory::Dairy, Strictness::Limit, "Paleo principles"),
        ],
        allowed_food_categories: categories(&[
            FoodCategory::Vegetables,
            FoodCategory::Fruits,
            FoodCategory::Proteins,
            FoodCategory::Fats,
            FoodCategory::Nuts,
            FoodCategory::Seeds,
        ]),
        special_considerations: strings(&[
            "Focus on quality protein sources",
            "Include healthy fats from natural sources",
            "Emphasize whole, unprocessed foods",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn anti_inflammatory() -> DietaryApproach {
    let day = ratio((35.0, 40.0, 45.0), (20.0, 25.0, 30.0), (30.0, 35.0, 40.0));
    DietaryApproach {
        id: "anti-inflammatory".to_string(),
        name: "Anti-inflammatory Diet".to_string(),
        description: "Focuses on foods that reduce inflammation and promote overall health."
            .to_string(),
        macro_ratio: day,
        meal_structure: four_meals(day, (25.0, 30.0, 35.0)),
        nutritional_priorities: vec![
            priority("Omega-3 fatty acids", 9, "Anti-inflammatory properties"),
            priority("Antioxidants", 9, "Reduce oxidative stress"),
            priority("Fiber", 8, "Gut health and inflammation reduction"),
        ],
        restrictions: vec![
            restrict(
                FoodCategory::ProcessedFoods,
                Strictness::Avoid,
                "Often contain inflammatory ingredients",
            ),
            restrict(FoodCategory::Sugars, Strictness::Limit, "Can promote inflammation"),
            restrict(FoodCategory::Alcohol, Strictness::Limit, "Can promote inflammation"),
        ],
        allowed_food_categories: categories(&[
            FoodCategory::Vegetables,
            FoodCategory::Fruits,
            FoodCategory::Grains,
            FoodCategory::Proteins,
            FoodCategory::Fats,
            FoodCategory::Nuts,
            FoodCategory::Seeds,
            FoodCategory::Legumes,
        ]),
        special_considerations: strings(&[
            "Emphasize anti-inflammatory spices (turmeric, ginger)",
            "Include fatty fish for omega-3",
            "Focus on colorful fruits and vegetables",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn mediterranean() -> DietaryApproach {
    let day = ratio((40.0, 45.0, 50.0), (15.0, 20.0, 25.0), (30.0, 35.0, 40.0));
    DietaryApproach {
        id: "mediterranean".to_string(),
        name: "Mediterranean Diet".to_string(),
        description: "Heart-healthy diet based on traditional Mediterranean eating patterns."
            .to_string(),
        macro_ratio: day,
        meal_structure: four_meals(day, (20.0, 25.0, 30.0)),
        nutritional_priorities: vec![
            priority("Omega-3 fatty acids", 9, "Heart health"),
            priority("Fiber", 8, "Digestive health"),
            priority("Antioxidants", 8, "Overall health"),
        ],
        restrictions: vec![
            restrict(FoodCategory::ProcessedFoods, Strictness::Limit, "Focus on whole foods"),
            restrict(FoodCategory::Sugars, Strictness::Limit, "Blood sugar stability"),
        ],
        allowed_food_categories: categories(&ALL_WHOLE_FOODS),
        special_considerations: strings(&[
            "Emphasize olive oil as primary fat source",
            "Include moderate wine consumption",
            "Focus on fish and seafood",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn flexitarian() -> DietaryApproach {
    let day = ratio((45.0, 50.0, 55.0), (15.0, 20.0, 25.0), (25.0, 30.0, 35.0));
    DietaryApproach {
        id: "flexitarian".to_string(),
        name: "Flexitarian Diet".to_string(),
        description: "Primarily plant-based diet with occasional meat consumption.".to_string(),
        macro_ratio: day,
        meal_structure: four_meals(day, (20.0, 25.0, 30.0)),
        nutritional_priorities: vec![
            priority("Fiber", 9, "Plant-based nutrition"),
            priority("Protein", 8, "Ensure adequate protein from plant sources"),
            priority("Iron", 8, "Plant-based iron absorption"),
        ],
        restrictions: vec![
            restrict(FoodCategory::ProcessedFoods, Strictness::Limit, "Focus on whole foods"),
            restrict(FoodCategory::Meat, Strictness::Limit, "Flexitarian approach"),
        ],
        allowed_food_categories: categories(&ALL_WHOLE_FOODS),
        special_considerations: strings(&[
            "Emphasize plant-based protein sources",
            "Include variety for nutritional completeness",
            "Occasional meat consumption is acceptable",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn five_two() -> DietaryApproach {
    let day = ratio((40.0, 45.0, 50.0), (20.0, 25.0, 30.0), (25.0, 30.0, 35.0));
    let mut main = day;
    main.protein = PercentRange::new(25.0, 30.0, 35.0);
    DietaryApproach {
        id: "5-2".to_string(),
        name: "5:2 Intermittent Fasting".to_string(),
        description: "5 days of normal eating, 2 days of calorie restriction \
                      (500 calories for women, 600 for men)."
            .to_string(),
        macro_ratio: day,
        meal_structure: MealStructure {
            meals: vec![
                meal(MealType::Breakfast, 300.0, day),
                meal(MealType::Lunch, 400.0, main),
                meal(MealType::Dinner, 500.0, main),
            ],
            snacks_allowed: false,
            fasting: Some(FastingPeriod {
                days_per_week: 2,
                calorie_reduction_percent: 75.0,
                description: "Two days per week with 500-600 calories".to_string(),
            }),
        },
        nutritional_priorities: vec![
            priority("Protein", 9, "Preserve muscle mass during fasting"),
            priority("Fiber", 8, "Satiety during fasting days"),
            priority("Electrolytes", 7, "Maintain hydration during fasting"),
        ],
        restrictions: vec![
            restrict(
                FoodCategory::ProcessedFoods,
                Strictness::Limit,
                "Focus on nutrient-dense foods",
            ),
            restrict(FoodCategory::Sugars, Strictness::Limit, "Blood sugar stability"),
        ],
        allowed_food_categories: categories(&ALL_WHOLE_FOODS),
        special_considerations: strings(&[
            "Special handling required for fasting days",
            "Focus on nutrient-dense foods on fasting days",
            "Normal eating on non-fasting days",
        ]),
        max_carbs_per_100g: None,
    }
}

pub fn all() -> Vec<DietaryApproach> {
    vec![
        keto(),
        sense(),
        lchf_paleo(),
        anti_inflammatory(),
        mediterranean(),
        flexitarian(),
        five_two(),
    ]
}
